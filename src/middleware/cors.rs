//! CORS-Konfiguration
//!
//! Das Back-Office-Frontend läuft auf einer anderen Origin; die
//! erlaubten Origins kommen aus der Konfiguration. Ohne konfigurierte
//! Origins (lokale Entwicklung) wird alles zugelassen.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn cors_middleware(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive();
    }

    // allow_origin ersetzt die Liste, statt anzuhängen; deshalb werden
    // alle Origins gesammelt und in einem Aufruf übergeben
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_origins(origins)))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Konfigurierte Origins in Header-Werte übersetzen; ungültige Einträge
/// werden mit Warnung übersprungen
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("⚠️ Ungültige CORS-Origin ignoriert: {}", origin);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_configured_origin_is_kept() {
        let origins = vec![
            "https://backoffice.example.com".to_string(),
            "http://localhost:5173".to_string(),
        ];

        let parsed = parse_origins(&origins);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], "https://backoffice.example.com");
        assert_eq!(parsed[1], "http://localhost:5173");
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let origins = vec![
            "https://backoffice.example.com".to_string(),
            "kein\ngültiger header".to_string(),
        ];

        let parsed = parse_origins(&origins);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], "https://backoffice.example.com");
    }
}
