//! Modell für Mietverträge
//!
//! Ein Vertrag gehört zu genau einer Buchung (Uniqueness auf booking_id)
//! und friert Kunden-, Fahrzeug- und Preisdaten zum Zeitpunkt der
//! Erstellung ein. Nach dem Statuswechsel auf "signed" sind die
//! kommerziellen Felder unveränderlich; weitere Unterschriften dürfen
//! trotzdem angehängt werden.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status des Vertrags - bildet das ENUM contract_status ab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Draft,
    Signed,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Signed => "signed",
        }
    }
}

/// Mietvertrag - bildet die Tabelle contracts ab
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub contract_number: String,

    // Kunden-Snapshot
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub customer_id_number: Option<String>,
    pub customer_drivers_license: Option<String>,

    // Fahrzeug-Snapshot
    pub vehicle_manufacturer: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_registration: Option<String>,
    pub vehicle_vin: Option<String>,
    pub rental_start_mileage: Option<i32>,
    pub vehicle_equipment: Option<String>,

    // Mietzeitraum
    pub rental_start_date: Option<NaiveDate>,
    pub rental_end_date: Option<NaiveDate>,
    pub rental_start_time: Option<String>,
    pub rental_end_time: Option<String>,
    pub rental_days: i32,

    // Berechnete Finanzfelder
    pub daily_rate: Option<Decimal>,
    pub service_fee: Option<Decimal>,
    pub extras_total: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub down_payment: Option<Decimal>,
    pub down_payment_due_date: Option<NaiveDate>,
    pub final_payment: Option<Decimal>,
    pub final_payment_due_date: Option<NaiveDate>,

    // Bankverbindung des Vermieters
    pub bank_account_holder: Option<String>,
    pub bank_iban: Option<String>,
    pub bank_bic: Option<String>,
    pub bank_name: Option<String>,

    // Versicherung
    pub insurance_package: Option<String>,
    pub deductible_full_coverage: Option<Decimal>,
    pub deductible_partial_coverage: Option<Decimal>,

    // Nutzung
    pub additional_drivers: Option<String>,
    pub permitted_countries: Option<String>,

    // Gebührenkatalog (Werte aus dem aktiven Preiskatalog übernommen)
    pub fee_professional_cleaning: Option<Decimal>,
    pub fee_toilet_disposal: Option<Decimal>,
    pub fee_late_return_per_hour: Option<Decimal>,
    pub fee_booking_change: Option<Decimal>,
    pub fee_smoking_violation: Option<Decimal>,
    pub fee_refueling: Option<Decimal>,

    // Kilometer-Regelung
    pub included_km: Option<i32>,
    pub extra_km_rate: Option<Decimal>,
    pub unlimited_km_option: bool,
    pub unlimited_km_fee: Option<Decimal>,

    pub pdf_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Contract {
    /// Kommerzielle Felder sind nach Unterzeichnung eingefroren
    pub fn is_signed(&self) -> bool {
        self.status == ContractStatus::Signed.as_str()
    }
}
