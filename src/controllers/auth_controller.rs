//! Login für das Verleih-Personal

use sqlx::PgPool;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::common::ApiResponse;
use crate::services::auth_service::AuthService;
use crate::utils::errors::AppResult;
use crate::utils::jwt::JwtConfig;

pub struct AuthController {
    auth_service: AuthService,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            auth_service: AuthService::new(pool, JwtConfig::from(config)),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
        request.validate()?;

        let response = self.auth_service.login(&request).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Login erfolgreich".to_string(),
        ))
    }
}
