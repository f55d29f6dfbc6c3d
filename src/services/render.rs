//! Render-Backend-Schnittstelle
//!
//! Merge und Rendering sind getrennte Stufen: beide Backends arbeiten
//! auf demselben `MergedDocument`, der native Paginierer auf den
//! Layout-Blöcken, der Browserless-Pfad auf dem fertigen HTML.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{EnvironmentConfig, RenderBackendKind};
use crate::services::browserless::BrowserlessRenderer;
use crate::services::merge::MergedDocument;
use crate::services::pdf::NativePdfRenderer;
use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait PdfRenderBackend: Send + Sync {
    async fn render(&self, document: &MergedDocument) -> AppResult<Vec<u8>>;
}

/// Backend gemäß Konfiguration auswählen
pub fn build_render_backend(
    config: &EnvironmentConfig,
    client: reqwest::Client,
) -> AppResult<Arc<dyn PdfRenderBackend>> {
    match config.render_backend {
        RenderBackendKind::Native => Ok(Arc::new(NativePdfRenderer::new(client))),
        RenderBackendKind::Browserless => {
            let url = config.browserless_url.clone().ok_or_else(|| {
                AppError::Internal(
                    "RENDER_BACKEND=browserless gesetzt, aber BROWSERLESS_URL fehlt".to_string(),
                )
            })?;
            Ok(Arc::new(BrowserlessRenderer::new(client, url)))
        }
    }
}
