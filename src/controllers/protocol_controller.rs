//! Übergabe-, Rücknahme- und Reinigungsprotokolle
//!
//! Protokolle sind einmalige Aufnahmen zum Termin: pro Buchung höchstens
//! ein Übergabe- und ein Rücknahmeprotokoll, danach unveränderlich.

use std::collections::BTreeMap;

use reqwest::Client;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::common::ApiResponse;
use crate::dto::protocol_dto::{CreateCleaningProtocolRequest, CreateProtocolRequest};
use crate::models::cleaning_protocol::CleaningProtocol;
use crate::models::protocol::{Protocol, ProtocolType};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::cleaning_protocol_repository::CleaningProtocolRepository;
use crate::repositories::protocol_repository::ProtocolRepository;
use crate::services::document::{self, blocks_to_html};
use crate::services::merge::MergedDocument;
use crate::services::render::build_render_backend;
use crate::services::storage::StorageService;
use crate::utils::errors::{AppError, AppResult};

/// Response der PDF-Ablage eines Protokolls
#[derive(Debug, serde::Serialize)]
pub struct ProtocolPdfResponse {
    pub protocol_id: Uuid,
    pub pdf_url: String,
}

pub struct ProtocolController {
    repository: ProtocolRepository,
    cleaning_repository: CleaningProtocolRepository,
    booking_repository: BookingRepository,
    config: EnvironmentConfig,
    http_client: Client,
}

impl ProtocolController {
    pub fn new(pool: PgPool, config: EnvironmentConfig, http_client: Client) -> Self {
        Self {
            repository: ProtocolRepository::new(pool.clone()),
            cleaning_repository: CleaningProtocolRepository::new(pool.clone()),
            booking_repository: BookingRepository::new(pool),
            config,
            http_client,
        }
    }

    pub async fn create(
        &self,
        booking_id: Uuid,
        request: CreateProtocolRequest,
    ) -> AppResult<ApiResponse<Protocol>> {
        request.validate()?;

        let protocol_type = ProtocolType::parse(&request.protocol_type).ok_or_else(|| {
            AppError::BadRequest(format!("Unbekannter Protokolltyp: {}", request.protocol_type))
        })?;

        if self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Buchung nicht gefunden".to_string()));
        }

        if self
            .repository
            .exists_for_booking(booking_id, protocol_type)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Für diese Buchung existiert bereits ein {}",
                protocol_type.label()
            )));
        }

        let protocol = self
            .repository
            .create(booking_id, protocol_type, &request)
            .await?;

        log::info!(
            "📋 {} erfasst für Buchung {}",
            protocol_type.label(),
            booking_id
        );

        Ok(ApiResponse::success_with_message(
            protocol,
            format!("{} erfolgreich erfasst", protocol_type.label()),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Protocol> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Protokoll nicht gefunden".to_string()))
    }

    pub async fn list_by_booking(&self, booking_id: Uuid) -> AppResult<Vec<Protocol>> {
        self.repository.find_by_booking(booking_id).await
    }

    /// Rendert das Protokoll und legt es im Object Storage ab.
    /// Wiederholte Aufrufe überschreiben dieselbe Datei (stabiler Key).
    pub async fn export_pdf(&self, id: Uuid) -> AppResult<ApiResponse<ProtocolPdfResponse>> {
        let protocol = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Protokoll nicht gefunden".to_string()))?;

        let protocol_type = ProtocolType::parse(&protocol.protocol_type).ok_or_else(|| {
            AppError::Internal(format!(
                "Protokoll {} trägt unbekannten Typ: {}",
                protocol.id, protocol.protocol_type
            ))
        })?;

        let blocks = document::protocol_blocks(&protocol);
        let title = protocol_type.label().to_string();
        let html = blocks_to_html(&title, &blocks);

        let merged = MergedDocument {
            fields: BTreeMap::new(),
            html,
            blocks,
            title,
        };

        log::info!("🖨️ Rendere {} {}", protocol_type.label(), protocol.id);

        let backend = build_render_backend(&self.config, self.http_client.clone())?;
        let pdf_bytes = backend.render(&merged).await?;

        let filename = format!("Protokoll_{}_{}.pdf", protocol.protocol_type, protocol.id);
        let key = StorageService::protocol_key(protocol.booking_id, &filename);

        let storage = StorageService::new(self.http_client.clone(), &self.config);
        let pdf_url = storage.upload(&key, pdf_bytes, "application/pdf").await?;

        log::info!("📤 Protokoll-PDF abgelegt: {}", pdf_url);

        Ok(ApiResponse::success_with_message(
            ProtocolPdfResponse {
                protocol_id: protocol.id,
                pdf_url,
            },
            "PDF erfolgreich erzeugt".to_string(),
        ))
    }

    pub async fn create_cleaning(
        &self,
        booking_id: Uuid,
        request: CreateCleaningProtocolRequest,
    ) -> AppResult<ApiResponse<CleaningProtocol>> {
        request.validate()?;

        if self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Buchung nicht gefunden".to_string()));
        }

        let protocol = self.cleaning_repository.create(booking_id, &request).await?;

        log::info!("🧽 Reinigungsprotokoll erfasst für Buchung {}", booking_id);

        Ok(ApiResponse::success_with_message(
            protocol,
            "Reinigungsprotokoll erfolgreich erfasst".to_string(),
        ))
    }

    pub async fn get_cleaning_by_id(&self, id: Uuid) -> AppResult<CleaningProtocol> {
        self.cleaning_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reinigungsprotokoll nicht gefunden".to_string()))
    }

    pub async fn list_cleaning_by_booking(
        &self,
        booking_id: Uuid,
    ) -> AppResult<Vec<CleaningProtocol>> {
        self.cleaning_repository.find_by_booking(booking_id).await
    }

    pub async fn export_cleaning_pdf(
        &self,
        id: Uuid,
    ) -> AppResult<ApiResponse<ProtocolPdfResponse>> {
        let protocol = self
            .cleaning_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reinigungsprotokoll nicht gefunden".to_string()))?;

        let blocks = document::cleaning_blocks(&protocol);
        let title = "Reinigungsprotokoll".to_string();
        let html = blocks_to_html(&title, &blocks);

        let merged = MergedDocument {
            fields: BTreeMap::new(),
            html,
            blocks,
            title,
        };

        let backend = build_render_backend(&self.config, self.http_client.clone())?;
        let pdf_bytes = backend.render(&merged).await?;

        let filename = format!("Reinigungsprotokoll_{}.pdf", protocol.id);
        let key = StorageService::protocol_key(protocol.booking_id, &filename);

        let storage = StorageService::new(self.http_client.clone(), &self.config);
        let pdf_url = storage.upload(&key, pdf_bytes, "application/pdf").await?;

        log::info!("📤 Reinigungsprotokoll-PDF abgelegt: {}", pdf_url);

        Ok(ApiResponse::success_with_message(
            ProtocolPdfResponse {
                protocol_id: protocol.id,
                pdf_url,
            },
            "PDF erfolgreich erzeugt".to_string(),
        ))
    }
}
