//! Template-Merge-Engine
//!
//! Löst alle bekannten `{{token}}`-Platzhalter eines Vertrags-Templates
//! gegen die Vertragsdaten auf. Das Schema der bekannten Felder ist
//! bewusst vollständig aufgezählt; unbekannte Tokens bleiben unverändert
//! im Dokument stehen und sind kein Fehler.
//!
//! Die Engine ist deterministisch: gleiche Eingaben ergeben ein
//! byte-identisches Ergebnis. Das Unterschriftsdatum ist deshalb ein
//! expliziter Eingabeparameter und wird nie intern erzeugt.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::EnvironmentConfig;
use crate::models::contract::Contract;
use crate::models::signature::{Signature, SignerRole};
use crate::services::document::Block;
use crate::services::pricing::round_money;
use crate::utils::format::{fmt_count, fmt_date, fmt_money, fmt_text};

/// Standardtext, wenn keine weiteren Fahrer eingetragen sind
pub const DEFAULT_ADDITIONAL_DRIVERS: &str = "Keine weiteren Fahrer";

/// Standardtext, wenn keine Ausstattung hinterlegt ist
pub const DEFAULT_EQUIPMENT: &str = "Standardausstattung";

/// Standard-Übergabe- und Rückgabezeiten
pub const DEFAULT_START_TIME: &str = "14:00";
pub const DEFAULT_END_TIME: &str = "10:00";

/// Marker für fehlende Unterschriften
pub const NOT_SIGNED_MARKER: &str = "Nicht unterschrieben";

/// Vollständig aufgelöstes Dokumentmodell
///
/// Enthält neben dem fertigen HTML auch die aufgelöste Feld-Map und die
/// Layout-Blöcke, damit Render-Backends (nativ vs. Browserless)
/// austauschbar sind, ohne die Merge-Logik anzufassen.
#[derive(Debug, Clone)]
pub struct MergedDocument {
    pub fields: BTreeMap<String, String>,
    pub html: String,
    pub blocks: Vec<Block>,
    pub title: String,
}

/// Vermieterdaten aus der Konfiguration; stehen nicht im Vertrag,
/// weil sie für alle Verträge gleich sind
#[derive(Debug, Clone)]
pub struct LandlordInfo {
    pub name: String,
    pub address: String,
}

impl From<&EnvironmentConfig> for LandlordInfo {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            name: config.landlord_name.clone(),
            address: config.landlord_address.clone(),
        }
    }
}

/// Löst jeden bekannten Platzhalter gegen den Vertrag auf.
///
/// Das ist die eine Stelle, an der das Platzhalter-Schema definiert ist:
/// jede Zeile bildet genau ein Token auf seine Formatierungsregel ab.
pub fn resolve_fields(
    contract: &Contract,
    signatures: &[Signature],
    signature_date: NaiveDate,
    landlord: &LandlordInfo,
) -> BTreeMap<String, String> {
    let rental_total = contract
        .daily_rate
        .map(|rate| round_money(rate * Decimal::from(contract.rental_days)));

    let table: Vec<(&str, String)> = vec![
        ("contract_number", contract.contract_number.clone()),
        ("signature_date", fmt_date(Some(signature_date))),
        // Vermieter
        ("landlord_name", landlord.name.clone()),
        ("landlord_address", landlord.address.clone()),
        // Mieter
        ("customer_name", contract.customer_name.clone()),
        ("customer_email", fmt_text(contract.customer_email.as_deref(), "-")),
        ("customer_phone", fmt_text(contract.customer_phone.as_deref(), "-")),
        ("customer_address", fmt_text(contract.customer_address.as_deref(), "-")),
        ("customer_id_number", fmt_text(contract.customer_id_number.as_deref(), "-")),
        (
            "customer_drivers_license",
            fmt_text(contract.customer_drivers_license.as_deref(), "-"),
        ),
        // Fahrzeug-Snapshot
        ("vehicle_manufacturer", fmt_text(contract.vehicle_manufacturer.as_deref(), "-")),
        ("vehicle_model", fmt_text(contract.vehicle_model.as_deref(), "-")),
        ("vehicle_registration", fmt_text(contract.vehicle_registration.as_deref(), "-")),
        ("vehicle_vin", fmt_text(contract.vehicle_vin.as_deref(), "-")),
        ("rental_start_mileage", fmt_count(contract.rental_start_mileage)),
        (
            "vehicle_equipment",
            fmt_text(contract.vehicle_equipment.as_deref(), DEFAULT_EQUIPMENT),
        ),
        // Mietzeitraum
        ("rental_start_date", fmt_date(contract.rental_start_date)),
        ("rental_end_date", fmt_date(contract.rental_end_date)),
        (
            "rental_start_time",
            fmt_text(contract.rental_start_time.as_deref(), DEFAULT_START_TIME),
        ),
        (
            "rental_end_time",
            fmt_text(contract.rental_end_time.as_deref(), DEFAULT_END_TIME),
        ),
        ("rental_days", contract.rental_days.to_string()),
        // Finanzen
        ("daily_rate", fmt_money(contract.daily_rate)),
        ("rental_total", fmt_money(rental_total)),
        ("service_fee", fmt_money(contract.service_fee)),
        ("extras_total", fmt_money(contract.extras_total)),
        ("total_amount", fmt_money(contract.total_amount)),
        ("deposit_amount", fmt_money(contract.deposit_amount)),
        ("down_payment", fmt_money(contract.down_payment)),
        ("down_payment_due_date", fmt_date(contract.down_payment_due_date)),
        ("final_payment", fmt_money(contract.final_payment)),
        ("final_payment_due_date", fmt_date(contract.final_payment_due_date)),
        // Bankverbindung
        ("bank_account_holder", fmt_text(contract.bank_account_holder.as_deref(), "-")),
        ("bank_iban", fmt_text(contract.bank_iban.as_deref(), "-")),
        ("bank_bic", fmt_text(contract.bank_bic.as_deref(), "-")),
        ("bank_name", fmt_text(contract.bank_name.as_deref(), "-")),
        // Versicherung
        ("insurance_package", fmt_text(contract.insurance_package.as_deref(), "-")),
        ("deductible_full_coverage", fmt_money(contract.deductible_full_coverage)),
        ("deductible_partial_coverage", fmt_money(contract.deductible_partial_coverage)),
        // Nutzung
        (
            "additional_drivers",
            fmt_text(contract.additional_drivers.as_deref(), DEFAULT_ADDITIONAL_DRIVERS),
        ),
        ("permitted_countries", fmt_text(contract.permitted_countries.as_deref(), "-")),
        // Gebührenkatalog
        ("fee_professional_cleaning", fmt_money(contract.fee_professional_cleaning)),
        ("fee_toilet_disposal", fmt_money(contract.fee_toilet_disposal)),
        ("fee_late_return_per_hour", fmt_money(contract.fee_late_return_per_hour)),
        ("fee_booking_change", fmt_money(contract.fee_booking_change)),
        ("fee_smoking_violation", fmt_money(contract.fee_smoking_violation)),
        ("fee_refueling", fmt_money(contract.fee_refueling)),
        // Kilometer-Regelung
        ("included_km", fmt_count(contract.included_km)),
        ("extra_km_rate", fmt_money(contract.extra_km_rate)),
        ("unlimited_km_fee", fmt_money(contract.unlimited_km_fee)),
        // Unterschriften
        ("signature_tenant", signature_slot(signatures, SignerRole::Tenant)),
        ("signature_landlord", signature_slot(signatures, SignerRole::Landlord)),
    ];

    table
        .into_iter()
        .map(|(token, value)| (token.to_string(), value))
        .collect()
}

/// Unterschriften-Platzhalter: eingebettetes Bild mit Namenszeile oder
/// der "Nicht unterschrieben"-Marker
fn signature_slot(signatures: &[Signature], role: SignerRole) -> String {
    signatures
        .iter()
        .find(|s| s.signer_role == role.as_str())
        .map(|s| {
            format!(
                "<img src=\"{}\" class=\"sig-image\" alt=\"Unterschrift\" /><br><strong>{}</strong>",
                s.signature_data, s.signer_name
            )
        })
        .unwrap_or_else(|| NOT_SIGNED_MARKER.to_string())
}

/// Ersetzt jedes Vorkommen jedes bekannten Tokens im Template.
/// Reihenfolgenunabhängig; unbekannte Tokens bleiben stehen.
pub fn merge_html(template_html: &str, fields: &BTreeMap<String, String>) -> String {
    let mut html = template_html.to_string();
    for (token, value) in fields {
        let placeholder = format!("{{{{{}}}}}", token);
        html = html.replace(&placeholder, value);
    }
    html
}

/// Kompletter Merge: Felder auflösen, HTML füllen, Layout-Blöcke bauen
pub fn merge_contract(
    contract: &Contract,
    template_html: &str,
    signatures: &[Signature],
    signature_date: NaiveDate,
    landlord: &LandlordInfo,
) -> MergedDocument {
    let fields = resolve_fields(contract, signatures, signature_date, landlord);
    let html = merge_html(template_html, &fields);
    let blocks = crate::services::document::contract_blocks(&fields, signatures);

    MergedDocument {
        fields,
        html,
        blocks,
        title: format!("Mietvertrag {}", contract.contract_number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn empty_contract() -> Contract {
        Contract {
            id: Uuid::nil(),
            booking_id: Uuid::nil(),
            vehicle_id: None,
            contract_number: "WM-1740000000000".to_string(),
            customer_name: "Max Mustermann".to_string(),
            customer_email: None,
            customer_phone: None,
            customer_address: None,
            customer_id_number: None,
            customer_drivers_license: None,
            vehicle_manufacturer: None,
            vehicle_model: None,
            vehicle_registration: None,
            vehicle_vin: None,
            rental_start_mileage: None,
            vehicle_equipment: None,
            rental_start_date: None,
            rental_end_date: None,
            rental_start_time: None,
            rental_end_time: None,
            rental_days: 0,
            daily_rate: None,
            service_fee: None,
            extras_total: None,
            total_amount: None,
            deposit_amount: None,
            down_payment: None,
            down_payment_due_date: None,
            final_payment: None,
            final_payment_due_date: None,
            bank_account_holder: None,
            bank_iban: None,
            bank_bic: None,
            bank_name: None,
            insurance_package: None,
            deductible_full_coverage: None,
            deductible_partial_coverage: None,
            additional_drivers: None,
            permitted_countries: None,
            fee_professional_cleaning: None,
            fee_toilet_disposal: None,
            fee_late_return_per_hour: None,
            fee_booking_change: None,
            fee_smoking_violation: None,
            fee_refueling: None,
            included_km: None,
            extra_km_rate: None,
            unlimited_km_option: false,
            unlimited_km_fee: None,
            pdf_url: None,
            status: "draft".to_string(),
            created_at: Utc::now(),
        }
    }

    fn signature(role: &str, name: &str) -> Signature {
        Signature {
            id: Uuid::new_v4(),
            contract_id: Uuid::nil(),
            signer_role: role.to_string(),
            signer_name: name.to_string(),
            signature_data: "data:image/png;base64,AAAA".to_string(),
            signed_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn landlord() -> LandlordInfo {
        LandlordInfo {
            name: "WoMo Verleih GbR".to_string(),
            address: "Musterstrasse 1, 97070 Würzburg".to_string(),
        }
    }

    #[test]
    fn empty_contract_resolves_to_fallbacks_only() {
        let fields = resolve_fields(&empty_contract(), &[], date(2026, 3, 1), &landlord());

        assert_eq!(fields["bank_iban"], "-");
        assert_eq!(fields["daily_rate"], "0,00");
        assert_eq!(fields["rental_start_date"], "-");
        assert_eq!(fields["additional_drivers"], "Keine weiteren Fahrer");
        assert_eq!(fields["vehicle_equipment"], "Standardausstattung");
        assert_eq!(fields["signature_tenant"], NOT_SIGNED_MARKER);

        // Kein bekanntes Token darf sich selbst als Wert auflösen
        for (token, value) in &fields {
            assert!(
                !value.contains(&format!("{{{{{}}}}}", token)),
                "Token {} nicht aufgelöst",
                token
            );
        }
    }

    #[test]
    fn merge_replaces_every_occurrence() {
        let template = "IBAN: {{bank_iban}} / nochmal: {{bank_iban}}";
        let fields = resolve_fields(&empty_contract(), &[], date(2026, 3, 1), &landlord());
        let html = merge_html(template, &fields);

        assert_eq!(html, "IBAN: - / nochmal: -");
    }

    #[test]
    fn unknown_tokens_are_left_untouched() {
        let template = "{{bank_iban}} und {{voellig_unbekannt}}";
        let fields = resolve_fields(&empty_contract(), &[], date(2026, 3, 1), &landlord());
        let html = merge_html(template, &fields);

        assert_eq!(html, "- und {{voellig_unbekannt}}");
    }

    #[test]
    fn merge_is_deterministic() {
        let mut contract = empty_contract();
        contract.daily_rate = Some("100".parse().unwrap());
        contract.rental_days = 4;
        let sigs = vec![signature("tenant", "Max Mustermann")];
        let template = "{{customer_name}} {{daily_rate}} {{rental_total}} {{signature_tenant}}";

        let first = merge_contract(&contract, template, &sigs, date(2026, 3, 1), &landlord());
        let second = merge_contract(&contract, template, &sigs, date(2026, 3, 1), &landlord());

        assert_eq!(first.html, second.html);
        assert_eq!(first.fields, second.fields);
    }

    #[test]
    fn signature_slot_embeds_image_and_name() {
        let sigs = vec![signature("landlord", "Anna Beispiel")];
        let fields = resolve_fields(&empty_contract(), &sigs, date(2026, 3, 1), &landlord());

        assert!(fields["signature_landlord"].contains("data:image/png;base64,AAAA"));
        assert!(fields["signature_landlord"].contains("Anna Beispiel"));
        assert_eq!(fields["signature_tenant"], NOT_SIGNED_MARKER);
    }

    #[test]
    fn rental_total_is_rate_times_days() {
        let mut contract = empty_contract();
        contract.daily_rate = Some("99.50".parse().unwrap());
        contract.rental_days = 3;

        let fields = resolve_fields(&contract, &[], date(2026, 3, 1), &landlord());
        assert_eq!(fields["rental_total"], "298,50");
    }

    #[test]
    fn landlord_data_comes_from_the_configuration() {
        let template = "Vermieter: {{landlord_name}}, {{landlord_address}}";
        let fields = resolve_fields(&empty_contract(), &[], date(2026, 3, 1), &landlord());
        let html = merge_html(template, &fields);

        assert_eq!(
            html,
            "Vermieter: WoMo Verleih GbR, Musterstrasse 1, 97070 Würzburg"
        );
    }
}
