// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoint; no bearer token required.

pub mod login; // POST /api/auth/login - authenticate and get JWT

pub use login::{login_post, LoginRequest, LoginResponse};
