//! Modell für Fahrzeuge
//!
//! Fahrzeuge werden unabhängig verwaltet und von Buchung/Vertrag nur
//! per Id referenziert, nie eingebettet.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status des Fahrzeugs - bildet das ENUM vehicle_status ab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
    Retired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Retired => "retired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(VehicleStatus::Available),
            "rented" => Some(VehicleStatus::Rented),
            "maintenance" => Some(VehicleStatus::Maintenance),
            "retired" => Some(VehicleStatus::Retired),
            _ => None,
        }
    }
}

/// Fahrzeug - bildet die Tabelle vehicles ab
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
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
