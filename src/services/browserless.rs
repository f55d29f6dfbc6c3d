//! HTML-zu-PDF über einen Browserless-Endpunkt
//!
//! Alternativ-Backend zum nativen Paginierer: das fertige HTML wird an
//! einen Headless-Chrome-Dienst geschickt, zurück kommt das PDF-Binary.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::services::merge::MergedDocument;
use crate::services::render::PdfRenderBackend;
use crate::utils::errors::{AppError, AppResult};

pub struct BrowserlessRenderer {
    client: Client,
    endpoint_url: String,
}

impl BrowserlessRenderer {
    pub fn new(client: Client, endpoint_url: String) -> Self {
        Self {
            client,
            endpoint_url,
        }
    }
}

#[async_trait]
impl PdfRenderBackend for BrowserlessRenderer {
    async fn render(&self, document: &MergedDocument) -> AppResult<Vec<u8>> {
        log::info!("🖨️ Sende HTML an Browserless: {}", document.title);

        let payload = json!({
            "html": document.html,
            "options": {
                "format": "A4",
                "printBackground": true,
                "margin": {
                    "top": "15mm",
                    "bottom": "15mm",
                    "left": "15mm",
                    "right": "15mm"
                }
            }
        });

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Render(format!("Browserless nicht erreichbar: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Render(format!(
                "Browserless lieferte Status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Render(format!("Browserless-Antwort abgebrochen: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
