//! Shared application state
//!
//! Dieses Modul definiert den geteilten Zustand der Anwendung, der über
//! den Axum-Router an alle Handler gereicht wird. Alle externen Clients
//! werden hier explizit konstruiert und injiziert.

use reqwest::Client;
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub http_client: Client,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            http_client: Client::new(),
        }
    }
}
