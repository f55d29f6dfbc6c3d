//! DTOs für Mietverträge

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::contract::Contract;

/// Request zum Aktualisieren eines Vertrags (nur im Status draft)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContractRequest {
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_id_number: Option<String>,
    pub customer_drivers_license: Option<String>,
    pub rental_start_time: Option<String>,
    pub rental_end_time: Option<String>,
    pub insurance_package: Option<String>,
    pub additional_drivers: Option<String>,
    pub permitted_countries: Option<String>,
    pub deposit_amount: Option<Decimal>,
}

/// Request zum Anhängen einer Unterschrift
#[derive(Debug, Deserialize, Validate)]
pub struct AddSignatureRequest {
    /// "tenant" oder "landlord"
    pub signer_role: String,

    #[validate(length(min = 2, max = 200))]
    pub signer_name: String,

    /// Data-URL des Rasterbilds aus dem Unterschriften-Pad
    #[validate(length(min = 16))]
    pub signature_data: String,
}

/// Vertrags-Response der API
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub contract_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub vehicle_manufacturer: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_registration: Option<String>,
    pub rental_start_date: Option<NaiveDate>,
    pub rental_end_date: Option<NaiveDate>,
    pub rental_days: i32,
    pub daily_rate: Option<Decimal>,
    pub service_fee: Option<Decimal>,
    pub extras_total: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub down_payment: Option<Decimal>,
    pub down_payment_due_date: Option<NaiveDate>,
    pub final_payment: Option<Decimal>,
    pub final_payment_due_date: Option<NaiveDate>,
    pub pdf_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Contract> for ContractResponse {
    fn from(contract: Contract) -> Self {
        Self {
            id: contract.id,
            booking_id: contract.booking_id,
            contract_number: contract.contract_number,
            customer_name: contract.customer_name,
            customer_email: contract.customer_email,
            vehicle_manufacturer: contract.vehicle_manufacturer,
            vehicle_model: contract.vehicle_model,
            vehicle_registration: contract.vehicle_registration,
            rental_start_date: contract.rental_start_date,
            rental_end_date: contract.rental_end_date,
            rental_days: contract.rental_days,
            daily_rate: contract.daily_rate,
            service_fee: contract.service_fee,
            extras_total: contract.extras_total,
            total_amount: contract.total_amount,
            deposit_amount: contract.deposit_amount,
            down_payment: contract.down_payment,
            down_payment_due_date: contract.down_payment_due_date,
            final_payment: contract.final_payment,
            final_payment_due_date: contract.final_payment_due_date,
            pdf_url: contract.pdf_url,
            status: contract.status,
            created_at: contract.created_at,
        }
    }
}

/// Response nach der PDF-Erzeugung
///
/// Die Antwort kommt direkt nach dem Speichern des Dokuments zurück;
/// der Versand an den Kunden läuft als Hintergrund-Task weiter.
#[derive(Debug, Serialize)]
pub struct GeneratePdfResponse {
    pub contract_id: Uuid,
    pub pdf_url: String,
    pub notification: String,
}
