//! Fahrzeugverwaltung

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        request.validate()?;

        if self
            .repository
            .license_plate_exists(&request.license_plate)
            .await?
        {
            return Err(AppError::Conflict(
                "Ein Fahrzeug mit diesem Kennzeichen existiert bereits".to_string(),
            ));
        }

        let vehicle = self.repository.create(&request).await?;

        log::info!("🚐 Fahrzeug angelegt: {}", vehicle.license_plate);

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Fahrzeug erfolgreich angelegt".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fahrzeug nicht gefunden".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.repository.find_all().await?;
        Ok(vehicles.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        request.validate()?;

        if let Some(status) = &request.status {
            if VehicleStatus::parse(status).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Unbekannter Fahrzeugstatus: {}",
                    status
                )));
            }
        }

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fahrzeug nicht gefunden".to_string()))?;

        let vehicle = self.repository.update(&current, &request).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Fahrzeug erfolgreich aktualisiert".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Fahrzeug nicht gefunden".to_string()));
        }

        log::info!("🗑️ Fahrzeug gelöscht: {}", id);
        Ok(())
    }
}
