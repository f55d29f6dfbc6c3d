//! Bild-Proxy
//!
//! Reicht extern gehostete Fotos (z.B. aus dem Object Storage) an das
//! Frontend durch, damit Canvas-Operationen nicht an fehlenden
//! CORS-Headern der Quelle scheitern.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct ImageProxyQuery {
    pub url: String,
}

pub fn create_proxy_router() -> Router<AppState> {
    Router::new().route("/image-proxy", get(proxy_image))
}

async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ImageProxyQuery>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    if !query.url.starts_with("http://") && !query.url.starts_with("https://") {
        return Err(AppError::BadRequest(
            "Nur http(s)-URLs werden durchgereicht".to_string(),
        ));
    }

    let response = state
        .http_client
        .get(&query.url)
        .send()
        .await
        .map_err(|e| AppError::BadRequest(format!("Bildquelle nicht erreichbar: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::BadRequest(format!(
            "Bildquelle lieferte Status {}",
            response.status()
        )));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Internal(format!("Bild konnte nicht gelesen werden: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );

    Ok((headers, bytes.to_vec()))
}
