//! Vertragsverwaltung
//!
//! Automatische Erstellung aus der Buchung, Entwurfs-Pflege,
//! Unterschriften und die PDF-Pipeline (Merge, Rendering, Ablage,
//! Kundenbenachrichtigung).

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use reqwest::Client;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::common::ApiResponse;
use crate::dto::contract_dto::{
    AddSignatureRequest, ContractResponse, GeneratePdfResponse, UpdateContractRequest,
};
use crate::models::contract::ContractStatus;
use crate::models::signature::{all_roles_signed, SignerRole};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::contract_repository::ContractRepository;
use crate::repositories::pricing_repository::PricingRepository;
use crate::repositories::signature_repository::SignatureRepository;
use crate::repositories::template_repository::TemplateRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::contract_service;
use crate::services::merge;
use crate::services::notifier::{self, HttpWebhookTransport, NotificationPayload};
use crate::services::render::build_render_backend;
use crate::services::storage::StorageService;
use crate::utils::errors::{AppError, AppResult};

pub struct ContractController {
    repository: ContractRepository,
    booking_repository: BookingRepository,
    vehicle_repository: VehicleRepository,
    pricing_repository: PricingRepository,
    template_repository: TemplateRepository,
    signature_repository: SignatureRepository,
    config: EnvironmentConfig,
    http_client: Client,
}

impl ContractController {
    pub fn new(pool: PgPool, config: EnvironmentConfig, http_client: Client) -> Self {
        Self {
            repository: ContractRepository::new(pool.clone()),
            booking_repository: BookingRepository::new(pool.clone()),
            vehicle_repository: VehicleRepository::new(pool.clone()),
            pricing_repository: PricingRepository::new(pool.clone()),
            template_repository: TemplateRepository::new(pool.clone()),
            signature_repository: SignatureRepository::new(pool),
            config,
            http_client,
        }
    }

    /// Erstellt den Vertrag zu einer Buchung. Existiert er schon, wird
    /// der vorhandene zurückgegeben (UNIQUE auf booking_id).
    pub async fn create_from_booking(
        &self,
        booking_id: Uuid,
    ) -> AppResult<ApiResponse<ContractResponse>> {
        if let Some(existing) = self.repository.find_by_booking(booking_id).await? {
            log::info!(
                "📄 Vertrag {} existiert bereits für Buchung {}",
                existing.contract_number,
                booking_id
            );
            return Ok(ApiResponse::success_with_message(
                existing.into(),
                "Für diese Buchung existiert bereits ein Vertrag".to_string(),
            ));
        }

        let booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Buchung nicht gefunden".to_string()))?;

        let vehicle = match booking.vehicle_id {
            Some(vehicle_id) => self.vehicle_repository.find_by_id(vehicle_id).await?,
            None => None,
        };

        let price_map = self.pricing_repository.active_price_map().await?;

        let snapshot =
            contract_service::assemble_contract(&booking, vehicle.as_ref(), &price_map, &self.config);

        let contract = self.repository.create(&snapshot).await?;

        log::info!(
            "📄 Vertrag {} erstellt für Buchung {}",
            contract.contract_number,
            booking.booking_number
        );

        Ok(ApiResponse::success_with_message(
            contract.into(),
            "Vertrag erfolgreich erstellt".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ContractResponse> {
        let contract = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vertrag nicht gefunden".to_string()))?;

        Ok(contract.into())
    }

    pub async fn list(&self) -> AppResult<Vec<ContractResponse>> {
        let contracts = self.repository.find_all().await?;
        Ok(contracts.into_iter().map(Into::into).collect())
    }

    /// Entwurfs-Felder pflegen; nach Unterzeichnung eingefroren
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateContractRequest,
    ) -> AppResult<ApiResponse<ContractResponse>> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vertrag nicht gefunden".to_string()))?;

        if current.is_signed() {
            return Err(AppError::Conflict(
                "Unterzeichnete Verträge können nicht mehr bearbeitet werden".to_string(),
            ));
        }

        let contract = self.repository.update_draft_fields(&current, &request).await?;

        Ok(ApiResponse::success_with_message(
            contract.into(),
            "Vertrag erfolgreich aktualisiert".to_string(),
        ))
    }

    /// Unterschrift anhängen. Sobald beide Rollen unterschrieben haben,
    /// wechselt der Vertrag auf "signed"; weitere Unterschriften sind
    /// danach weiterhin erlaubt.
    pub async fn add_signature(
        &self,
        id: Uuid,
        request: AddSignatureRequest,
    ) -> AppResult<ApiResponse<ContractResponse>> {
        request.validate()?;

        let role = SignerRole::parse(&request.signer_role).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unbekannte Unterzeichner-Rolle: {}",
                request.signer_role
            ))
        })?;

        let mut contract = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vertrag nicht gefunden".to_string()))?;

        self.signature_repository
            .insert(id, role, &request.signer_name, &request.signature_data)
            .await?;

        log::info!(
            "✍️ Unterschrift ({}) angehängt an Vertrag {}",
            role.as_str(),
            contract.contract_number
        );

        if !contract.is_signed() {
            let signatures = self.signature_repository.find_by_contract(id).await?;

            if all_roles_signed(&signatures) {
                if let Some(updated) =
                    self.repository.set_status(id, ContractStatus::Signed).await?
                {
                    log::info!("✅ Vertrag {} ist vollständig unterzeichnet", updated.contract_number);
                    contract = updated;
                }
            }
        }

        Ok(ApiResponse::success_with_message(
            contract.into(),
            "Unterschrift erfolgreich gespeichert".to_string(),
        ))
    }

    /// PDF-Pipeline: Merge, Rendering, Ablage, Benachrichtigung.
    ///
    /// Die Antwort kommt nach dem Speichern des Dokuments; der Versand
    /// an den Kunden läuft als Hintergrund-Task weiter.
    pub async fn generate_pdf(&self, id: Uuid) -> AppResult<ApiResponse<GeneratePdfResponse>> {
        let contract = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vertrag nicht gefunden".to_string()))?;

        let template = self
            .template_repository
            .find_active()
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Kein aktives Vertrags-Template vorhanden".to_string())
            })?;

        let signatures = self.signature_repository.find_by_contract(id).await?;
        let signature_date = Utc::now().date_naive();

        let document = merge::merge_contract(
            &contract,
            &template.template_html,
            &signatures,
            signature_date,
            &merge::LandlordInfo::from(&self.config),
        );

        log::info!("🖨️ Rendere Vertrag {}", contract.contract_number);

        let backend = build_render_backend(&self.config, self.http_client.clone())?;
        let pdf_bytes = backend.render(&document).await?;

        let filename = format!("Mietvertrag_{}.pdf", contract.contract_number);
        let key = StorageService::contract_key(contract.id, &filename);

        let storage = StorageService::new(self.http_client.clone(), &self.config);
        let pdf_url = storage
            .upload(&key, pdf_bytes.clone(), "application/pdf")
            .await?;

        self.repository
            .update_pdf_url(id, &pdf_url)
            .await?
            .ok_or_else(|| AppError::NotFound("Vertrag nicht gefunden".to_string()))?;

        log::info!("📤 Vertrags-PDF abgelegt: {}", pdf_url);

        let notification = match &contract.customer_email {
            Some(email) => {
                let payload = NotificationPayload {
                    customer_email: email.clone(),
                    customer_name: contract.customer_name.clone(),
                    booking_id: contract.booking_id,
                    contract_id: Some(contract.id),
                    contract_number: Some(contract.contract_number.clone()),
                    filename,
                    pdf_base64: BASE64.encode(&pdf_bytes),
                };

                let transport =
                    Arc::new(HttpWebhookTransport::new(self.config.webhook_url.clone()));
                notifier::spawn_notification(transport, payload);

                "Versand an den Kunden gestartet".to_string()
            }
            None => "Keine Kunden-E-Mail hinterlegt, kein Versand".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            GeneratePdfResponse {
                contract_id: contract.id,
                pdf_url,
                notification,
            },
            "PDF erfolgreich erzeugt".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let contract = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vertrag nicht gefunden".to_string()))?;

        if contract.is_signed() {
            return Err(AppError::Conflict(
                "Unterzeichnete Verträge können nicht gelöscht werden".to_string(),
            ));
        }

        self.repository.delete(id).await?;

        log::info!("🗑️ Vertrag gelöscht: {}", contract.contract_number);
        Ok(())
    }
}
