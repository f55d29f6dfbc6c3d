//! Buchungsverwaltung
//!
//! Abgeschlossene und stornierte Buchungen sind eingefroren - an ihnen
//! sind nur noch Statuswechsel erlaubt.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{
    BookingResponse, CreateBookingRequest, UpdateBookingRequest, UpdateBookingStatusRequest,
};
use crate::dto::common::ApiResponse;
use crate::models::booking::BookingStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct BookingController {
    repository: BookingRepository,
    vehicle_repository: VehicleRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BookingRepository::new(pool.clone()),
            vehicle_repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateBookingRequest,
    ) -> AppResult<ApiResponse<BookingResponse>> {
        request.validate()?;

        if request.end_date < request.start_date {
            return Err(AppError::BadRequest(
                "Das Enddatum darf nicht vor dem Startdatum liegen".to_string(),
            ));
        }

        if let Some(vehicle_id) = request.vehicle_id {
            if self.vehicle_repository.find_by_id(vehicle_id).await?.is_none() {
                return Err(AppError::NotFound("Fahrzeug nicht gefunden".to_string()));
            }
        }

        let booking = self.repository.create(&request).await?;

        log::info!("📅 Buchung angelegt: {}", booking.booking_number);

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Buchung erfolgreich angelegt".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookingResponse> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Buchung nicht gefunden".to_string()))?;

        Ok(booking.into())
    }

    pub async fn list(&self) -> AppResult<Vec<BookingResponse>> {
        let bookings = self.repository.find_all().await?;
        Ok(bookings.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateBookingRequest,
    ) -> AppResult<ApiResponse<BookingResponse>> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Buchung nicht gefunden".to_string()))?;

        match BookingStatus::parse(&current.status) {
            Some(BookingStatus::Completed) | Some(BookingStatus::Cancelled) => {
                return Err(AppError::Conflict(
                    "Abgeschlossene oder stornierte Buchungen können nicht mehr bearbeitet werden"
                        .to_string(),
                ));
            }
            _ => {}
        }

        let start_date = request.start_date.unwrap_or(current.start_date);
        let end_date = request.end_date.unwrap_or(current.end_date);
        if end_date < start_date {
            return Err(AppError::BadRequest(
                "Das Enddatum darf nicht vor dem Startdatum liegen".to_string(),
            ));
        }

        if let Some(vehicle_id) = request.vehicle_id {
            if self.vehicle_repository.find_by_id(vehicle_id).await?.is_none() {
                return Err(AppError::NotFound("Fahrzeug nicht gefunden".to_string()));
            }
        }

        let booking = self.repository.update(&current, &request).await?;

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Buchung erfolgreich aktualisiert".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> AppResult<ApiResponse<BookingResponse>> {
        let status = BookingStatus::parse(&request.status).ok_or_else(|| {
            AppError::BadRequest(format!("Unbekannter Buchungsstatus: {}", request.status))
        })?;

        let booking = self
            .repository
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Buchung nicht gefunden".to_string()))?;

        log::info!(
            "📅 Buchung {} ist jetzt '{}'",
            booking.booking_number,
            booking.status
        );

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Buchungsstatus aktualisiert".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Buchung nicht gefunden".to_string()))?;

        if BookingStatus::parse(&current.status) == Some(BookingStatus::Active) {
            return Err(AppError::Conflict(
                "Laufende Buchungen können nicht gelöscht werden".to_string(),
            ));
        }

        self.repository.delete(id).await?;

        log::info!("🗑️ Buchung gelöscht: {}", current.booking_number);
        Ok(())
    }
}
