//! DTOs für Buchungen

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::Booking;

/// Ein gebuchtes Extra (Schlüssel aus dem Preiskatalog + Menge)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraItem {
    pub key: String,
    pub quantity: u32,
}

/// Request zum Anlegen einer Buchung
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 2, max = 200))]
    pub customer_name: String,

    #[validate(email)]
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
    pub unlimited_km_option: Option<bool>,
    pub additional_drivers: Option<Vec<String>>,
    pub extras: Option<Vec<ExtraItem>>,
}

/// Request zum Aktualisieren einer Buchung
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    #[validate(length(min = 2, max = 200))]
    pub customer_name: Option<String>,

    #[validate(email)]
    pub customer_email: Option<String>,

    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub customer_id_number: Option<String>,
    pub customer_drivers_license: Option<String>,

    pub vehicle_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    pub daily_rate: Option<Decimal>,
    pub service_fee: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub unlimited_km_option: Option<bool>,
    pub additional_drivers: Option<Vec<String>>,
    pub extras: Option<Vec<ExtraItem>>,
}

/// Request für einen Statuswechsel
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

/// Buchungs-Response der API
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub booking_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_rate: Option<Decimal>,
    pub service_fee: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub unlimited_km_option: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            booking_number: booking.booking_number,
            customer_name: booking.customer_name,
            customer_email: booking.customer_email,
            customer_phone: booking.customer_phone,
            customer_address: booking.customer_address,
            vehicle_id: booking.vehicle_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            daily_rate: booking.daily_rate,
            service_fee: booking.service_fee,
            deposit_amount: booking.deposit_amount,
            unlimited_km_option: booking.unlimited_km_option,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}
