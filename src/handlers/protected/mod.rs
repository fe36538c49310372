// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Security Level: bearer token
// Route Prefix: /api/students
// Middleware: jwt_auth_middleware (route layer, runs before extractors)

pub mod students;
