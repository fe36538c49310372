// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Routes: /, /health, /api/auth/login

pub mod auth;
pub mod health;

pub use auth::*;
pub use health::{health, root};
