//! Object-Storage-Anbindung für gerenderte Dokumente
//!
//! Hochgeladen wird unter einem stabilen Schlüssel je Vertrag und mit
//! Upsert: eine erneute PDF-Erzeugung überschreibt das bestehende
//! Objekt, statt verwaiste Blobs anzusammeln.

use reqwest::Client;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

pub struct StorageService {
    client: Client,
    base_url: String,
    bucket: String,
    api_key: String,
}

impl StorageService {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            base_url: config.storage_url.trim_end_matches('/').to_string(),
            bucket: config.storage_bucket.clone(),
            api_key: config.storage_api_key.clone(),
        }
    }

    /// Stabiler Objektschlüssel eines Vertragsdokuments
    pub fn contract_key(contract_id: uuid::Uuid, filename: &str) -> String {
        format!("contracts/{}/{}", contract_id, filename)
    }

    /// Stabiler Objektschlüssel eines Protokolldokuments
    pub fn protocol_key(booking_id: uuid::Uuid, filename: &str) -> String {
        format!("protocols/{}/{}", booking_id, filename)
    }

    /// Lädt Bytes in den Bucket und liefert die öffentliche URL zurück
    pub async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<String> {
        let upload_url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key);

        log::info!("📤 Lade Objekt hoch: {}/{}", self.bucket, key);

        let response = self
            .client
            .post(&upload_url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Upload fehlgeschlagen: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "Storage lieferte Status {}: {}",
                status, body
            )));
        }

        Ok(self.public_url(key))
    }

    /// Öffentlich auflösbare URL eines Objekts
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn contract_key_is_stable_per_contract() {
        let id = Uuid::nil();
        let first = StorageService::contract_key(id, "Mietvertrag_WM-1.pdf");
        let second = StorageService::contract_key(id, "Mietvertrag_WM-1.pdf");

        assert_eq!(first, second);
        assert_eq!(
            first,
            "contracts/00000000-0000-0000-0000-000000000000/Mietvertrag_WM-1.pdf"
        );
    }
}
