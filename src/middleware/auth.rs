//! JWT-Middleware
//!
//! Alle API-Routen außer Login und Healthcheck verlangen einen gültigen
//! Bearer-Token. Die Claims des Mitarbeiters werden als Extension an
//! den Handler durchgereicht.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Authentifizierter Mitarbeiter, aus den JWT-Claims rekonstruiert
#[derive(Debug, Clone)]
pub struct AuthenticatedStaff {
    pub user_id: Uuid,
    pub email: String,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization-Header fehlt".to_string()))?;

    let token = extract_token_from_header(auth_header)
        .map_err(|_| AppError::Unauthorized("Ungültiger Authorization-Header".to_string()))?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)
        .map_err(|_| AppError::Unauthorized("Ungültiges oder abgelaufenes Token".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Token trägt keine gültige Benutzer-ID".to_string()))?;

    request.extensions_mut().insert(AuthenticatedStaff {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
