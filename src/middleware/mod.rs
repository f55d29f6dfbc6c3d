//! Middleware
//!
//! JWT-Authentifizierung und CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
