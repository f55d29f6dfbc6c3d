//! Modell für Reinigungsprotokolle
//!
//! Wird bei der Fahrzeugaufbereitung zwischen zwei Vermietungen einmalig
//! erfasst und ist danach unveränderlich.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reinigungsprotokoll - bildet die Tabelle cleaning_protocols ab
///
/// Die fünf Checklisten-Gruppen sind Boolean-Maps, z.B.
/// `{"windows_cleaned": true, "awning_checked": false}`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CleaningProtocol {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub exterior_checklist: Option<serde_json::Value>,
    pub interior_checklist: Option<serde_json::Value>,
    pub utilities_checklist: Option<serde_json::Value>,
    pub inventory_checklist: Option<serde_json::Value>,
    pub safety_checklist: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub staff_signature: Option<String>,
    pub completed_by: String,
    pub created_at: DateTime<Utc>,
}
