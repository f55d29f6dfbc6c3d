//! Automatische Vertragserstellung aus einer Buchung
//!
//! Baut den vollständigen Vertrags-Snapshot: Kundendaten aus der
//! Buchung, Fahrzeugdaten aus dem Fahrzeugstamm, Gebühren und
//! Konditionen aus dem aktiven Preiskatalog, Bankverbindung aus der
//! Konfiguration, Finanzfelder aus der Preisberechnung.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::EnvironmentConfig;
use crate::dto::booking_dto::ExtraItem;
use crate::models::booking::Booking;
use crate::models::pricing::fee_keys;
use crate::models::vehicle::Vehicle;
use crate::repositories::contract_repository::NewContract;
use crate::services::pricing;

/// Vertragsnummer im gewachsenen Hausformat
pub fn contract_number() -> String {
    format!("WM-{}", Utc::now().timestamp_millis())
}

/// Gebuchte Extras aus dem JSONB-Feld der Buchung lesen
pub fn booked_extras(booking: &Booking) -> Vec<ExtraItem> {
    booking
        .extras
        .as_ref()
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

/// Snapshot für einen neuen Vertrag zusammensetzen
pub fn assemble_contract(
    booking: &Booking,
    vehicle: Option<&Vehicle>,
    price_map: &HashMap<String, Decimal>,
    config: &EnvironmentConfig,
) -> NewContract {
    // Buchungswerte vor Fahrzeug-Defaults
    let daily_rate = booking
        .daily_rate
        .or(vehicle.and_then(|v| v.daily_rate_default));
    let deposit_amount = booking
        .deposit_amount
        .or(vehicle.and_then(|v| v.deposit_default));
    let service_fee = booking.service_fee.unwrap_or(Decimal::ZERO);

    let extras_total = pricing::extras_total(&booked_extras(booking), price_map);

    let breakdown = pricing::compute_breakdown(
        booking.start_date,
        booking.end_date,
        daily_rate.unwrap_or(Decimal::ZERO),
        service_fee,
        extras_total,
    );

    let unlimited_km_fee = if booking.unlimited_km_option {
        price_map.get(fee_keys::UNLIMITED_KM).copied()
    } else {
        None
    };

    NewContract {
        booking_id: booking.id,
        vehicle_id: booking.vehicle_id,
        contract_number: contract_number(),

        customer_name: booking.customer_name.clone(),
        customer_email: Some(booking.customer_email.clone()),
        customer_phone: booking.customer_phone.clone(),
        customer_address: booking.customer_address.clone(),
        customer_id_number: booking.customer_id_number.clone(),
        customer_drivers_license: booking.customer_drivers_license.clone(),

        vehicle_manufacturer: vehicle.map(|v| v.manufacturer.clone()),
        vehicle_model: vehicle.map(|v| v.model.clone()),
        vehicle_registration: vehicle.map(|v| v.license_plate.clone()),
        vehicle_vin: vehicle.and_then(|v| v.vin.clone()),
        rental_start_mileage: vehicle.and_then(|v| v.mileage),
        vehicle_equipment: vehicle
            .and_then(|v| v.equipment.as_ref())
            .map(|list| list.join(", ")),

        rental_start_date: Some(booking.start_date),
        rental_end_date: Some(booking.end_date),
        rental_start_time: None,
        rental_end_time: None,
        rental_days: breakdown.rental_days,

        daily_rate,
        service_fee: booking.service_fee,
        extras_total: Some(breakdown.extras_total),
        total_amount: Some(breakdown.total_amount),
        deposit_amount,
        down_payment: Some(breakdown.down_payment),
        down_payment_due_date: breakdown.down_payment_due_date,
        final_payment: Some(breakdown.final_payment),
        final_payment_due_date: breakdown.final_payment_due_date,

        bank_account_holder: Some(config.bank_account_holder.clone()),
        bank_iban: Some(config.bank_iban.clone()),
        bank_bic: Some(config.bank_bic.clone()),
        bank_name: Some(config.bank_name.clone()),

        insurance_package: None,
        deductible_full_coverage: price_map.get(fee_keys::DEDUCTIBLE_FULL_COVERAGE).copied(),
        deductible_partial_coverage: price_map
            .get(fee_keys::DEDUCTIBLE_PARTIAL_COVERAGE)
            .copied(),

        additional_drivers: booking
            .additional_drivers
            .as_ref()
            .filter(|drivers| !drivers.is_empty())
            .map(|drivers| drivers.join(", ")),
        permitted_countries: None,

        fee_professional_cleaning: price_map.get(fee_keys::PROFESSIONAL_CLEANING).copied(),
        fee_toilet_disposal: price_map.get(fee_keys::TOILET_DISPOSAL).copied(),
        fee_late_return_per_hour: price_map.get(fee_keys::LATE_RETURN_PER_HOUR).copied(),
        fee_booking_change: price_map.get(fee_keys::BOOKING_CHANGE).copied(),
        fee_smoking_violation: price_map.get(fee_keys::SMOKING_VIOLATION).copied(),
        fee_refueling: price_map.get(fee_keys::REFUELING).copied(),

        included_km: price_map
            .get(fee_keys::INCLUDED_KM_PER_DAY)
            .and_then(|v| v.to_i32()),
        extra_km_rate: price_map.get(fee_keys::EXTRA_KM_RATE).copied(),
        unlimited_km_option: booking.unlimited_km_option,
        unlimited_km_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn booking() -> Booking {
        Booking {
            id: Uuid::new_v4(),
            booking_number: "BU-1".to_string(),
            customer_name: "Max Mustermann".to_string(),
            customer_email: "max@example.com".to_string(),
            customer_phone: None,
            customer_address: None,
            customer_id_number: None,
            customer_drivers_license: None,
            vehicle_id: None,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            daily_rate: Some(dec!(100)),
            service_fee: None,
            deposit_amount: None,
            unlimited_km_option: false,
            additional_drivers: None,
            extras: None,
            status: "confirmed".to_string(),
            created_at: Utc::now(),
        }
    }

    fn vehicle() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            manufacturer: "Knaus".to_string(),
            model: "BoxStar 600".to_string(),
            license_plate: "WÜ-WM 123".to_string(),
            vin: Some("WKN12345678901234".to_string()),
            seats: Some(4),
            sleeps: Some(3),
            mileage: Some(45210),
            daily_rate_default: Some(dec!(120)),
            deposit_default: Some(dec!(1500)),
            equipment: Some(vec!["Markise".to_string(), "Fahrradträger".to_string()]),
            status: "available".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn booking_values_take_precedence_over_vehicle_defaults() {
        let config = test_config();
        let snapshot = assemble_contract(&booking(), Some(&vehicle()), &HashMap::new(), &config);

        assert_eq!(snapshot.daily_rate, Some(dec!(100)));
        assert_eq!(snapshot.deposit_amount, Some(dec!(1500)));
        assert_eq!(snapshot.rental_days, 4);
        assert_eq!(snapshot.total_amount, Some(dec!(400)));
        assert_eq!(snapshot.down_payment, Some(dec!(120.00)));
        assert_eq!(snapshot.final_payment, Some(dec!(280.00)));
    }

    #[test]
    fn vehicle_snapshot_is_frozen_into_the_contract() {
        let config = test_config();
        let snapshot = assemble_contract(&booking(), Some(&vehicle()), &HashMap::new(), &config);

        assert_eq!(snapshot.vehicle_manufacturer.as_deref(), Some("Knaus"));
        assert_eq!(snapshot.vehicle_registration.as_deref(), Some("WÜ-WM 123"));
        assert_eq!(
            snapshot.vehicle_equipment.as_deref(),
            Some("Markise, Fahrradträger")
        );
    }

    #[test]
    fn fee_schedule_is_taken_from_the_catalog() {
        let config = test_config();
        let mut price_map = HashMap::new();
        price_map.insert(fee_keys::PROFESSIONAL_CLEANING.to_string(), dec!(139));
        price_map.insert(fee_keys::INCLUDED_KM_PER_DAY.to_string(), dec!(250));
        price_map.insert(fee_keys::UNLIMITED_KM.to_string(), dec!(240));

        let mut booking = booking();
        booking.unlimited_km_option = true;

        let snapshot = assemble_contract(&booking, None, &price_map, &config);

        assert_eq!(snapshot.fee_professional_cleaning, Some(dec!(139)));
        assert_eq!(snapshot.included_km, Some(250));
        assert_eq!(snapshot.unlimited_km_fee, Some(dec!(240)));
        assert_eq!(snapshot.fee_toilet_disposal, None);
    }

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec![],
            storage_url: "http://localhost".to_string(),
            storage_bucket: "test".to_string(),
            storage_api_key: "key".to_string(),
            browserless_url: None,
            webhook_url: "http://localhost/hook".to_string(),
            render_backend: crate::config::RenderBackendKind::Native,
            landlord_name: "WoMo Verleih GbR".to_string(),
            landlord_address: "Musterstrasse 1".to_string(),
            bank_account_holder: "WoMo Verleih GbR".to_string(),
            bank_name: "Commerzbank".to_string(),
            bank_iban: "DE89370400440532013000".to_string(),
            bank_bic: "COBADEFFXXX".to_string(),
        }
    }
}
