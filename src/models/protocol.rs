//! Modell für Übergabe- und Rücknahmeprotokolle
//!
//! Ein Protokoll gehört zu genau einer Buchung und wird einmalig beim
//! Übergabe- bzw. Rücknahmetermin erfasst. Danach ist es unveränderlich;
//! es gibt bewusst keinen Update-Pfad.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Art des Protokolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolType {
    Handover,
    Return,
}

impl ProtocolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolType::Handover => "handover",
            ProtocolType::Return => "return",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "handover" => Some(ProtocolType::Handover),
            "return" => Some(ProtocolType::Return),
            _ => None,
        }
    }

    /// Deutsche Überschrift für das gerenderte Dokument
    pub fn label(&self) -> &'static str {
        match self {
            ProtocolType::Handover => "Übergabeprotokoll",
            ProtocolType::Return => "Rücknahmeprotokoll",
        }
    }
}

/// Deutsches Label für einen Checklisten-Status
pub fn condition_label(status: &str) -> &str {
    match status {
        "good" => "Gut",
        "fair" => "Befriedigend",
        "damaged" => "Mangelhaft",
        "working" => "Funktioniert",
        "defect" => "Defekt",
        "" => "-",
        other => other,
    }
}

/// Übergabe-/Rücknahmeprotokoll - bildet die Tabelle protocols ab
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Protocol {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub protocol_type: String,
    pub mileage: i32,
    pub fuel_level: Option<String>,
    pub fresh_water_tank: Option<String>,
    pub waste_water_tank: Option<String>,
    /// Checkliste je Position: `{"paint_body": {"status": "good"}, ...}`
    pub exterior_condition: Option<serde_json::Value>,
    pub interior_condition: Option<serde_json::Value>,
    /// Inventar: `{"spare_tire": {"present": true}, ...}`
    pub equipment_checklist: Option<serde_json::Value>,
    pub damage_notes: Option<String>,
    pub additional_notes: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub id_card_photos: Option<Vec<String>>,
    pub drivers_license_photos: Option<Vec<String>>,
    pub customer_signature: Option<String>,
    pub staff_signature: Option<String>,
    pub completed_by: String,
    pub created_at: DateTime<Utc>,
}
