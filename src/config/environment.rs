//! Konfiguration über Umgebungsvariablen
//!
//! Dieses Modul liest die gesamte Laufzeit-Konfiguration aus der Umgebung.
//! Es gibt keinen modulweiten Singleton: die Konfiguration wird einmal in
//! `main` aufgebaut und über den AppState in alle Komponenten injiziert.

use std::env;

/// Render-Backend für die PDF-Erzeugung
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBackendKind {
    /// Eingebauter Renderer (lopdf)
    Native,
    /// Externer Headless-Browser-Dienst (HTML → PDF)
    Browserless,
}

/// Umgebungs-Konfiguration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,

    // Object Storage (Fotos, Unterschriften, gerenderte PDFs)
    pub storage_url: String,
    pub storage_bucket: String,
    pub storage_api_key: String,

    // Externe Dienste
    pub browserless_url: Option<String>,
    pub webhook_url: String,
    pub render_backend: RenderBackendKind,

    // Vermieter-Stammdaten für den Vertrag
    pub landlord_name: String,
    pub landlord_address: String,
    pub bank_account_holder: String,
    pub bank_name: String,
    pub bank_iban: String,
    pub bank_bic: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .collect(),
            storage_url: env::var("STORAGE_URL").expect("STORAGE_URL must be set"),
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "rental-documents".to_string()),
            storage_api_key: env::var("STORAGE_API_KEY").expect("STORAGE_API_KEY must be set"),
            browserless_url: env::var("BROWSERLESS_URL").ok(),
            webhook_url: env::var("NOTIFY_WEBHOOK_URL").expect("NOTIFY_WEBHOOK_URL must be set"),
            render_backend: match env::var("RENDER_BACKEND").as_deref() {
                Ok("browserless") => RenderBackendKind::Browserless,
                _ => RenderBackendKind::Native,
            },
            landlord_name: env::var("LANDLORD_NAME")
                .unwrap_or_else(|_| "WoMo Verleih GbR".to_string()),
            landlord_address: env::var("LANDLORD_ADDRESS")
                .unwrap_or_else(|_| "Musterstrasse 1, 97070 Würzburg".to_string()),
            bank_account_holder: env::var("BANK_ACCOUNT_HOLDER")
                .unwrap_or_else(|_| "WoMo Verleih GbR".to_string()),
            bank_name: env::var("BANK_NAME").unwrap_or_else(|_| "Commerzbank".to_string()),
            bank_iban: env::var("BANK_IBAN")
                .unwrap_or_else(|_| "DE89370400440532013000".to_string()),
            bank_bic: env::var("BANK_BIC").unwrap_or_else(|_| "COBADEFFXXX".to_string()),
        }
    }
}

impl EnvironmentConfig {
    /// Prüfen, ob wir im Entwicklungsmodus laufen
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Prüfen, ob wir im Produktionsmodus laufen
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Server-Adresse
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
