//! Layout-Blockmodell für die Dokumenterzeugung
//!
//! Zwischenschicht zwischen Merge und Renderer: aus den aufgelösten
//! Feldern entsteht eine Liste neutraler Blöcke, die der native
//! Paginierer direkt setzen und der HTML-Pfad in Markup übersetzen kann.

use std::collections::BTreeMap;

use crate::models::cleaning_protocol::CleaningProtocol;
use crate::models::protocol::{condition_label, Protocol, ProtocolType};
use crate::models::signature::Signature;
use crate::utils::format::fmt_text;

/// Bildreferenz in einem Block: Data-URL oder HTTP-Adresse
#[derive(Debug, Clone)]
pub enum ImageRef {
    DataUrl(String),
    Url(String),
}

impl ImageRef {
    pub fn from_reference(reference: &str) -> Self {
        if reference.starts_with("data:") {
            ImageRef::DataUrl(reference.to_string())
        } else {
            ImageRef::Url(reference.to_string())
        }
    }
}

/// Ein Layout-Block des Dokuments
#[derive(Debug, Clone)]
pub enum Block {
    Heading(String),
    Subheading(String),
    Paragraph(String),
    /// Zweispaltige Tabelle: Beschriftung + Wert
    Table(Vec<(String, String)>),
    Image {
        image: ImageRef,
        caption: String,
    },
    Spacer,
}

/// Baut die Layout-Blöcke des Mietvertrags aus der aufgelösten Feld-Map
pub fn contract_blocks(
    fields: &BTreeMap<String, String>,
    signatures: &[Signature],
) -> Vec<Block> {
    let f = |key: &str| fields.get(key).cloned().unwrap_or_else(|| "-".to_string());

    let mut blocks = vec![
        Block::Heading("Mietvertrag für ein Wohnmobil".to_string()),
        Block::Paragraph(format!(
            "Vertragsnummer: {} | Datum: {}",
            f("contract_number"),
            f("signature_date")
        )),
        Block::Subheading("Vermieter".to_string()),
        Block::Table(vec![
            ("Name".to_string(), f("landlord_name")),
            ("Anschrift".to_string(), f("landlord_address")),
        ]),
        Block::Subheading("Mieter".to_string()),
        Block::Table(vec![
            ("Name".to_string(), f("customer_name")),
            ("Anschrift".to_string(), f("customer_address")),
            ("Telefon".to_string(), f("customer_phone")),
            ("E-Mail".to_string(), f("customer_email")),
            ("Ausweis-Nr.".to_string(), f("customer_id_number")),
            ("Führerschein-Nr.".to_string(), f("customer_drivers_license")),
        ]),
        Block::Subheading("§ 1 Mietgegenstand".to_string()),
        Block::Table(vec![
            ("Fahrzeug-Hersteller".to_string(), f("vehicle_manufacturer")),
            ("Fahrzeug-Modell".to_string(), f("vehicle_model")),
            ("Amtliches Kennzeichen".to_string(), f("vehicle_registration")),
            ("Fahrzeug-Ident.-Nr. (VIN)".to_string(), f("vehicle_vin")),
            (
                "Kilometerstand bei Übergabe".to_string(),
                format!("{} km", f("rental_start_mileage")),
            ),
            ("Ausstattung".to_string(), f("vehicle_equipment")),
        ]),
        Block::Subheading("§ 2 Mietzeit und Mietpreis".to_string()),
        Block::Paragraph(format!(
            "Die Mietzeit beginnt am {} um {} Uhr und endet am {} um {} Uhr.",
            f("rental_start_date"),
            f("rental_start_time"),
            f("rental_end_date"),
            f("rental_end_time")
        )),
        Block::Table(vec![
            ("Mietpreis pro Nacht".to_string(), format!("{} €", f("daily_rate"))),
            ("Anzahl Nächte".to_string(), f("rental_days")),
            ("Mietpreis gesamt".to_string(), format!("{} €", f("rental_total"))),
            ("Servicepauschale".to_string(), format!("{} €", f("service_fee"))),
            ("Extras".to_string(), format!("{} €", f("extras_total"))),
            ("Gesamtbetrag".to_string(), format!("{} €", f("total_amount"))),
        ]),
        Block::Paragraph(format!(
            "Anzahlung in Höhe von {} € bis zum {}. Restzahlung in Höhe von {} € bis zum {}.",
            f("down_payment"),
            f("down_payment_due_date"),
            f("final_payment"),
            f("final_payment_due_date")
        )),
        Block::Table(vec![
            ("Kontoinhaber".to_string(), f("bank_account_holder")),
            ("IBAN".to_string(), f("bank_iban")),
            ("BIC".to_string(), f("bank_bic")),
            ("Kreditinstitut".to_string(), f("bank_name")),
        ]),
        Block::Subheading("§ 3 Kaution".to_string()),
        Block::Paragraph(format!(
            "Der Mieter hinterlegt bei Übergabe des Fahrzeugs eine Kaution in Höhe von {} €.",
            f("deposit_amount")
        )),
        Block::Subheading("§ 4 Versicherung".to_string()),
        Block::Table(vec![
            ("Versicherungspaket".to_string(), f("insurance_package")),
            (
                "Selbstbeteiligung Vollkasko".to_string(),
                format!("{} €", f("deductible_full_coverage")),
            ),
            (
                "Selbstbeteiligung Teilkasko".to_string(),
                format!("{} €", f("deductible_partial_coverage")),
            ),
        ]),
        Block::Subheading("§ 5 Nutzung des Fahrzeugs".to_string()),
        Block::Paragraph(format!("Weitere Fahrer: {}", f("additional_drivers"))),
        Block::Paragraph(format!(
            "Fahrten sind in folgende Länder gestattet: {}.",
            f("permitted_countries")
        )),
        Block::Subheading("§ 6 Gebühren".to_string()),
        Block::Table(vec![
            (
                "Professionelle Innenreinigung".to_string(),
                format!("{} €", f("fee_professional_cleaning")),
            ),
            (
                "Toiletten- und Abwasserentsorgung".to_string(),
                format!("{} €", f("fee_toilet_disposal")),
            ),
            (
                "Verspätete Rückgabe (je Stunde)".to_string(),
                format!("{} €", f("fee_late_return_per_hour")),
            ),
            ("Buchungsänderung".to_string(), format!("{} €", f("fee_booking_change"))),
            (
                "Verstoß gegen das Rauchverbot".to_string(),
                format!("{} €", f("fee_smoking_violation")),
            ),
            ("Betankungspauschale".to_string(), format!("{} €", f("fee_refueling"))),
        ]),
        Block::Subheading("§ 7 Kilometerregelung".to_string()),
        Block::Paragraph(format!(
            "Im Mietpreis sind {} km pro Miettag enthalten. Mehrkilometer werden mit {} € pro km \
             berechnet. Unbegrenzte Kilometer optional für {} € pro Mietvertrag.",
            f("included_km"),
            f("extra_km_rate"),
            f("unlimited_km_fee")
        )),
        Block::Subheading("Unterschriften".to_string()),
    ];

    blocks.extend(signature_blocks(signatures, &f));

    blocks
}

fn signature_blocks(
    signatures: &[Signature],
    f: &dyn Fn(&str) -> String,
) -> Vec<Block> {
    let mut blocks = Vec::new();

    for (role, label) in [("landlord", "Unterschrift Vermieter"), ("tenant", "Unterschrift Mieter")] {
        match signatures.iter().find(|s| s.signer_role == role) {
            Some(sig) => {
                blocks.push(Block::Image {
                    image: ImageRef::from_reference(&sig.signature_data),
                    caption: format!("{}: {}", label, sig.signer_name),
                });
            }
            None => {
                blocks.push(Block::Paragraph(format!("{}: Nicht unterschrieben", label)));
            }
        }
    }

    // Unterschriftsdatum unter beiden Feldern
    blocks.push(Block::Paragraph(format!("Datum: {}", f("signature_date"))));

    blocks
}

/// Baut die Layout-Blöcke eines Übergabe- oder Rücknahmeprotokolls
pub fn protocol_blocks(protocol: &Protocol) -> Vec<Block> {
    let title = ProtocolType::parse(&protocol.protocol_type)
        .map(|t| t.label())
        .unwrap_or("Protokoll");

    let mut blocks = vec![
        Block::Heading(title.to_string()),
        Block::Table(vec![
            ("Kilometerstand".to_string(), format!("{} km", protocol.mileage)),
            (
                "Tankfüllstand".to_string(),
                fmt_text(protocol.fuel_level.as_deref(), "-"),
            ),
            (
                "Frischwassertank".to_string(),
                fmt_text(protocol.fresh_water_tank.as_deref(), "-"),
            ),
            (
                "Abwassertank".to_string(),
                fmt_text(protocol.waste_water_tank.as_deref(), "-"),
            ),
            ("Erfasst von".to_string(), protocol.completed_by.clone()),
        ]),
    ];

    for (heading, checklist) in [
        ("Zustand außen", &protocol.exterior_condition),
        ("Zustand innen", &protocol.interior_condition),
        ("Inventar", &protocol.equipment_checklist),
    ] {
        if let Some(rows) = checklist_rows(checklist.as_ref()) {
            blocks.push(Block::Subheading(heading.to_string()));
            blocks.push(Block::Table(rows));
        }
    }

    if let Some(notes) = &protocol.damage_notes {
        if !notes.trim().is_empty() {
            blocks.push(Block::Subheading("Schäden".to_string()));
            blocks.push(Block::Paragraph(notes.clone()));
        }
    }
    if let Some(notes) = &protocol.additional_notes {
        if !notes.trim().is_empty() {
            blocks.push(Block::Subheading("Anmerkungen".to_string()));
            blocks.push(Block::Paragraph(notes.clone()));
        }
    }

    if let Some(photos) = &protocol.photo_urls {
        if !photos.is_empty() {
            blocks.push(Block::Subheading("Fotos".to_string()));
            for (i, url) in photos.iter().enumerate() {
                blocks.push(Block::Image {
                    image: ImageRef::from_reference(url),
                    caption: format!("Foto {}", i + 1),
                });
            }
        }
    }

    let documents = [
        ("Personalausweis", &protocol.id_card_photos),
        ("Führerschein", &protocol.drivers_license_photos),
    ];
    if documents
        .iter()
        .any(|(_, photos)| photos.as_ref().map_or(false, |p| !p.is_empty()))
    {
        blocks.push(Block::Subheading("Ausweisdokumente".to_string()));
        for (label, photos) in documents {
            if let Some(photos) = photos {
                for (i, url) in photos.iter().enumerate() {
                    blocks.push(Block::Image {
                        image: ImageRef::from_reference(url),
                        caption: format!("{} {}", label, i + 1),
                    });
                }
            }
        }
    }

    blocks.push(Block::Subheading("Unterschriften".to_string()));
    for (label, sig) in [
        ("Unterschrift Mieter", &protocol.customer_signature),
        ("Unterschrift Mitarbeiter", &protocol.staff_signature),
    ] {
        match sig {
            Some(data) if !data.is_empty() => blocks.push(Block::Image {
                image: ImageRef::from_reference(data),
                caption: label.to_string(),
            }),
            _ => blocks.push(Block::Paragraph(format!("{}: Nicht unterschrieben", label))),
        }
    }

    blocks
}

/// Baut die Layout-Blöcke eines Reinigungsprotokolls
pub fn cleaning_blocks(protocol: &CleaningProtocol) -> Vec<Block> {
    let mut blocks = vec![
        Block::Heading("Reinigungsprotokoll".to_string()),
        Block::Table(vec![(
            "Erfasst von".to_string(),
            protocol.completed_by.clone(),
        )]),
    ];

    for (heading, checklist) in [
        ("Außenbereich", &protocol.exterior_checklist),
        ("Innenraum", &protocol.interior_checklist),
        ("Ver- und Entsorgung", &protocol.utilities_checklist),
        ("Inventar", &protocol.inventory_checklist),
        ("Fahrzeug und Sicherheit", &protocol.safety_checklist),
    ] {
        if let Some(rows) = checklist_rows(checklist.as_ref()) {
            blocks.push(Block::Subheading(heading.to_string()));
            blocks.push(Block::Table(rows));
        }
    }

    if let Some(notes) = &protocol.notes {
        if !notes.trim().is_empty() {
            blocks.push(Block::Subheading("Anmerkungen".to_string()));
            blocks.push(Block::Paragraph(notes.clone()));
        }
    }

    match &protocol.staff_signature {
        Some(data) if !data.is_empty() => blocks.push(Block::Image {
            image: ImageRef::from_reference(data),
            caption: "Unterschrift Mitarbeiter".to_string(),
        }),
        _ => blocks.push(Block::Paragraph(
            "Unterschrift Mitarbeiter: Nicht unterschrieben".to_string(),
        )),
    }

    blocks
}

/// Wandelt eine JSONB-Checkliste in Tabellenzeilen um.
///
/// Unterstützte Wertformen: `{"status": "good"}`, `{"present": true}`
/// und nackte Booleans.
fn checklist_rows(checklist: Option<&serde_json::Value>) -> Option<Vec<(String, String)>> {
    let map = checklist?.as_object()?;
    if map.is_empty() {
        return None;
    }

    let mut rows: Vec<(String, String)> = map
        .iter()
        .map(|(key, value)| {
            let label = key.replace('_', " ");
            let display = match value {
                serde_json::Value::Bool(true) => "Erledigt".to_string(),
                serde_json::Value::Bool(false) => "Offen".to_string(),
                serde_json::Value::Object(inner) => {
                    if let Some(status) = inner.get("status").and_then(|v| v.as_str()) {
                        condition_label(status).to_string()
                    } else if let Some(present) = inner.get("present").and_then(|v| v.as_bool()) {
                        if present { "Vorhanden" } else { "Fehlt" }.to_string()
                    } else {
                        "-".to_string()
                    }
                }
                serde_json::Value::String(s) => condition_label(s).to_string(),
                _ => "-".to_string(),
            };
            (label, display)
        })
        .collect();

    // Stabile Reihenfolge unabhängig von der JSON-Map
    rows.sort();

    Some(rows)
}

/// Einfaches HTML aus Blöcken, für den Browserless-Pfad der Protokolle
pub fn blocks_to_html(title: &str, blocks: &[Block]) -> String {
    let mut body = String::new();

    for block in blocks {
        match block {
            Block::Heading(text) => body.push_str(&format!("<h1>{}</h1>\n", text)),
            Block::Subheading(text) => body.push_str(&format!("<h2>{}</h2>\n", text)),
            Block::Paragraph(text) => body.push_str(&format!("<p>{}</p>\n", text)),
            Block::Table(rows) => {
                body.push_str("<table>\n");
                for (label, value) in rows {
                    body.push_str(&format!(
                        "<tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
                        label, value
                    ));
                }
                body.push_str("</table>\n");
            }
            Block::Image { image, caption } => {
                let src = match image {
                    ImageRef::DataUrl(data) => data.clone(),
                    ImageRef::Url(url) => url.clone(),
                };
                body.push_str(&format!(
                    "<div><img src=\"{}\" style=\"max-width:60mm;\" /><p>{}</p></div>\n",
                    src, caption
                ));
            }
            Block::Spacer => body.push_str("<br>\n"),
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"de\"><head><meta charset=\"UTF-8\"><title>{}</title>\
         <style>body{{font-family:Arial,sans-serif;font-size:11pt;padding:15mm;}}\
         table{{width:100%;border-collapse:collapse;margin:3mm 0;}}\
         td{{padding:2mm 3mm;border:1px solid #ddd;font-size:10pt;}}</style>\
         </head><body>\n{}</body></html>",
        title, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn handover_protocol() -> Protocol {
        Protocol {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            protocol_type: "handover".to_string(),
            mileage: 45210,
            fuel_level: None,
            fresh_water_tank: None,
            waste_water_tank: None,
            exterior_condition: None,
            interior_condition: None,
            equipment_checklist: None,
            damage_notes: None,
            additional_notes: None,
            photo_urls: None,
            id_card_photos: None,
            drivers_license_photos: None,
            customer_signature: None,
            staff_signature: None,
            completed_by: "Anna Beispiel".to_string(),
            created_at: Utc::now(),
        }
    }

    fn subheadings(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Subheading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn image_captions(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Image { caption, .. } => Some(caption.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn id_documents_get_their_own_section() {
        let mut protocol = handover_protocol();
        protocol.id_card_photos = Some(vec![
            "https://storage.example.com/ausweis-1.jpg".to_string(),
            "https://storage.example.com/ausweis-2.jpg".to_string(),
        ]);
        protocol.drivers_license_photos =
            Some(vec!["data:image/png;base64,AAAA".to_string()]);

        let blocks = protocol_blocks(&protocol);

        assert!(subheadings(&blocks).contains(&"Ausweisdokumente"));
        let captions = image_captions(&blocks);
        assert!(captions.contains(&"Personalausweis 1"));
        assert!(captions.contains(&"Personalausweis 2"));
        assert!(captions.contains(&"Führerschein 1"));
    }

    #[test]
    fn no_id_document_section_without_photos() {
        let mut protocol = handover_protocol();
        protocol.id_card_photos = Some(vec![]);

        let blocks = protocol_blocks(&protocol);

        assert!(!subheadings(&blocks).contains(&"Ausweisdokumente"));
    }

    #[test]
    fn checklist_rows_map_status_and_present() {
        let checklist = json!({
            "paint_body": {"status": "good"},
            "spare_tire": {"present": true},
            "awning": {"present": false},
            "gas_check": true
        });

        let rows = checklist_rows(Some(&checklist)).unwrap();

        assert!(rows.contains(&("paint body".to_string(), "Gut".to_string())));
        assert!(rows.contains(&("spare tire".to_string(), "Vorhanden".to_string())));
        assert!(rows.contains(&("awning".to_string(), "Fehlt".to_string())));
        assert!(rows.contains(&("gas check".to_string(), "Erledigt".to_string())));
    }

    #[test]
    fn checklist_rows_are_sorted_for_determinism() {
        let checklist = json!({"b_item": true, "a_item": false});
        let rows = checklist_rows(Some(&checklist)).unwrap();

        assert_eq!(rows[0].0, "a item");
        assert_eq!(rows[1].0, "b item");
    }

    #[test]
    fn empty_checklist_yields_no_rows() {
        assert!(checklist_rows(Some(&json!({}))).is_none());
        assert!(checklist_rows(None).is_none());
    }

    #[test]
    fn blocks_to_html_renders_all_block_kinds() {
        let blocks = vec![
            Block::Heading("Titel".to_string()),
            Block::Table(vec![("A".to_string(), "B".to_string())]),
            Block::Image {
                image: ImageRef::DataUrl("data:image/png;base64,AAAA".to_string()),
                caption: "Foto 1".to_string(),
            },
        ];

        let html = blocks_to_html("Test", &blocks);

        assert!(html.contains("<h1>Titel</h1>"));
        assert!(html.contains("<td><strong>A</strong></td><td>B</td>"));
        assert!(html.contains("data:image/png;base64,AAAA"));
    }
}
