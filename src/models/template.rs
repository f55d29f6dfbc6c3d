//! Modell für Vertrags-Templates
//!
//! Genau ein Template ist zu jedem Zeitpunkt aktiv. Ein Wechsel wirkt
//! sich nicht auf bereits gerenderte Verträge aus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vertrags-Template - bildet die Tabelle contract_templates ab
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContractTemplate {
    pub id: Uuid,
    pub name: String,
    /// HTML mit Platzhaltern der Form `{{field_name}}`
    pub template_html: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
