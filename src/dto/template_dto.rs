//! DTOs für Vertrags-Templates

use serde::Deserialize;
use validator::Validate;

/// Request zum Anlegen eines Templates
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    #[validate(length(min = 1))]
    pub template_html: String,

    /// Aktiviert das neue Template sofort und deaktiviert das bisherige
    #[serde(default)]
    pub activate: bool,
}
