//! Datenzugriff für Übergabe- und Rücknahmeprotokolle

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::protocol_dto::CreateProtocolRequest;
use crate::models::protocol::{Protocol, ProtocolType};
use crate::utils::errors::AppResult;

pub struct ProtocolRepository {
    pool: PgPool,
}

impl ProtocolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        booking_id: Uuid,
        protocol_type: ProtocolType,
        req: &CreateProtocolRequest,
    ) -> AppResult<Protocol> {
        let protocol = sqlx::query_as::<_, Protocol>(
            r#"
            INSERT INTO protocols (id, booking_id, protocol_type, mileage, fuel_level,
                                   fresh_water_tank, waste_water_tank, exterior_condition,
                                   interior_condition, equipment_checklist, damage_notes,
                                   additional_notes, photo_urls, id_card_photos,
                                   drivers_license_photos, customer_signature, staff_signature,
                                   completed_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(protocol_type.as_str())
        .bind(req.mileage)
        .bind(&req.fuel_level)
        .bind(&req.fresh_water_tank)
        .bind(&req.waste_water_tank)
        .bind(&req.exterior_condition)
        .bind(&req.interior_condition)
        .bind(&req.equipment_checklist)
        .bind(&req.damage_notes)
        .bind(&req.additional_notes)
        .bind(&req.photo_urls)
        .bind(&req.id_card_photos)
        .bind(&req.drivers_license_photos)
        .bind(&req.customer_signature)
        .bind(&req.staff_signature)
        .bind(&req.completed_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(protocol)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Protocol>> {
        let protocol = sqlx::query_as::<_, Protocol>("SELECT * FROM protocols WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(protocol)
    }

    pub async fn find_by_booking(&self, booking_id: Uuid) -> AppResult<Vec<Protocol>> {
        let protocols = sqlx::query_as::<_, Protocol>(
            "SELECT * FROM protocols WHERE booking_id = $1 ORDER BY created_at ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(protocols)
    }

    /// Prüft, ob für die Buchung bereits ein Protokoll dieses Typs existiert
    pub async fn exists_for_booking(
        &self,
        booking_id: Uuid,
        protocol_type: ProtocolType,
    ) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM protocols WHERE booking_id = $1 AND protocol_type = $2)",
        )
        .bind(booking_id)
        .bind(protocol_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}
