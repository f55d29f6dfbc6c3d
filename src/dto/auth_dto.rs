//! DTOs für den Mitarbeiter-Login

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login-Request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,
}

/// Login-Response mit JWT
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub full_name: String,
    pub expires_in: u64,
}
