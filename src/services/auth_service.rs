//! Mitarbeiter-Login
//!
//! Passwortprüfung mit bcrypt, danach Ausstellung eines JWT. Mehr
//! Session-Verwaltung gibt es bewusst nicht; der Token trägt alles.

use bcrypt::verify;
use sqlx::PgPool;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthService {
    user_repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            user_repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Ungültige Zugangsdaten".to_string()))?;

        let password_ok = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Passwortprüfung fehlgeschlagen: {}", e)))?;

        if !password_ok {
            log::warn!("🔐 Fehlgeschlagener Login für {}", request.email);
            return Err(AppError::Unauthorized("Ungültige Zugangsdaten".to_string()));
        }

        let token = generate_token(user.id, &user.email, &self.jwt_config)?;

        log::info!("🔓 Login erfolgreich: {}", user.email);

        Ok(LoginResponse {
            token,
            user_id: user.id.to_string(),
            full_name: user.full_name,
            expires_in: self.jwt_config.expiration,
        })
    }
}
