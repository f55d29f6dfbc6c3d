//! Modell für den Preiskatalog
//!
//! Extras, Gebühren und Stornostaffeln liegen als Datensätze im Katalog,
//! nicht als Konstanten im Code. Der Katalog wird je Vorgang frisch
//! geladen; es gibt keine Cache-Schicht.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Katalogeintrag - bildet die Tabelle pricing_catalog ab
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PricingItem {
    pub id: Uuid,
    pub item_key: String,
    pub label: String,
    pub unit_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Bekannte Katalogschlüssel für den Gebühren- und Konditionenblock
/// des Vertrags
pub mod fee_keys {
    pub const PROFESSIONAL_CLEANING: &str = "fee_professional_cleaning";
    pub const TOILET_DISPOSAL: &str = "fee_toilet_disposal";
    pub const LATE_RETURN_PER_HOUR: &str = "fee_late_return_per_hour";
    pub const BOOKING_CHANGE: &str = "fee_booking_change";
    pub const SMOKING_VIOLATION: &str = "fee_smoking_violation";
    pub const REFUELING: &str = "fee_refueling";
    pub const UNLIMITED_KM: &str = "unlimited_km_fee";
    pub const INCLUDED_KM_PER_DAY: &str = "included_km_per_day";
    pub const EXTRA_KM_RATE: &str = "extra_km_rate";
    pub const DEDUCTIBLE_FULL_COVERAGE: &str = "deductible_full_coverage";
    pub const DEDUCTIBLE_PARTIAL_COVERAGE: &str = "deductible_partial_coverage";
}
