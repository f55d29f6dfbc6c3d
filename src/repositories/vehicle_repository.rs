//! Datenzugriff für Fahrzeuge

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::AppResult;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, req: &CreateVehicleRequest) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, manufacturer, model, license_plate, vin, seats, sleeps,
                                  mileage, daily_rate_default, deposit_default, equipment, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.manufacturer)
        .bind(&req.model)
        .bind(&req.license_plate)
        .bind(&req.vin)
        .bind(req.seats)
        .bind(req.sleeps)
        .bind(req.mileage)
        .bind(req.daily_rate_default)
        .bind(req.deposit_default)
        .bind(&req.equipment)
        .bind(VehicleStatus::Available.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    pub async fn license_plate_exists(&self, license_plate: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1)")
                .bind(license_plate)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Aktualisiert ein Fahrzeug; nicht gesetzte Felder behalten den
    /// bisherigen Wert
    pub async fn update(&self, current: &Vehicle, req: &UpdateVehicleRequest) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET manufacturer = $2, model = $3, license_plate = $4, vin = $5, seats = $6,
                sleeps = $7, mileage = $8, daily_rate_default = $9, deposit_default = $10,
                equipment = $11, status = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(req.manufacturer.as_ref().unwrap_or(&current.manufacturer))
        .bind(req.model.as_ref().unwrap_or(&current.model))
        .bind(req.license_plate.as_ref().unwrap_or(&current.license_plate))
        .bind(req.vin.as_ref().or(current.vin.as_ref()))
        .bind(req.seats.or(current.seats))
        .bind(req.sleeps.or(current.sleeps))
        .bind(req.mileage.or(current.mileage))
        .bind(req.daily_rate_default.or(current.daily_rate_default))
        .bind(req.deposit_default.or(current.deposit_default))
        .bind(req.equipment.as_ref().or(current.equipment.as_ref()))
        .bind(req.status.as_ref().unwrap_or(&current.status))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
