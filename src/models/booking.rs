//! Modell für Buchungen
//!
//! Eine Buchung verbindet Kunde, Fahrzeug und Mietzeitraum. Sie wird vom
//! Personal oder einer externen Buchungsquelle angelegt; nach Abschluss
//! sind nur noch Statuswechsel erlaubt.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status der Buchung - bildet das ENUM booking_status ab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Draft,
    Confirmed,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Draft => "draft",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(BookingStatus::Draft),
            "confirmed" => Some(BookingStatus::Confirmed),
            "active" => Some(BookingStatus::Active),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// Buchung - bildet die Tabelle bookings ab
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub booking_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub customer_id_number: Option<String>,
    pub customer_drivers_license: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_rate: Option<Decimal>,
    pub service_fee: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub unlimited_km_option: bool,
    pub additional_drivers: Option<Vec<String>>,
    /// Gebuchte Extras als `[{"key": "...", "quantity": n}]`
    pub extras: Option<serde_json::Value>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
