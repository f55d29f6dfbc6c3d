//! DTOs für Fahrzeuge

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request zum Anlegen eines Fahrzeugs
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub manufacturer: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 4, max = 20))]
    pub license_plate: String,

    pub vin: Option<String>,

    #[validate(range(min = 1, max = 12))]
    pub seats: Option<i32>,

    #[validate(range(min = 1, max = 12))]
    pub sleeps: Option<i32>,

    pub mileage: Option<i32>,
    pub daily_rate_default: Option<Decimal>,
    pub deposit_default: Option<Decimal>,
    pub equipment: Option<Vec<String>>,
}

/// Request zum Aktualisieren eines Fahrzeugs
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub manufacturer: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 4, max = 20))]
    pub license_plate: Option<String>,

    pub vin: Option<String>,
    pub seats: Option<i32>,
    pub sleeps: Option<i32>,
    pub mileage: Option<i32>,
    pub daily_rate_default: Option<Decimal>,
    pub deposit_default: Option<Decimal>,
    pub equipment: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Fahrzeug-Response der API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub manufacturer: String,
    pub model: String,
    pub license_plate: String,
    pub vin: Option<String>,
    pub seats: Option<i32>,
    pub sleeps: Option<i32>,
    pub mileage: Option<i32>,
    pub daily_rate_default: Option<Decimal>,
    pub deposit_default: Option<Decimal>,
    pub equipment: Option<Vec<String>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            manufacturer: vehicle.manufacturer,
            model: vehicle.model,
            license_plate: vehicle.license_plate,
            vin: vehicle.vin,
            seats: vehicle.seats,
            sleeps: vehicle.sleeps,
            mileage: vehicle.mileage,
            daily_rate_default: vehicle.daily_rate_default,
            deposit_default: vehicle.deposit_default,
            equipment: vehicle.equipment,
            status: vehicle.status,
            created_at: vehicle.created_at,
        }
    }
}
