//! DTOs für Übergabe-, Rücknahme- und Reinigungsprotokolle

use serde::Deserialize;
use validator::Validate;

/// Request zum Erfassen eines Übergabe- oder Rücknahmeprotokolls
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProtocolRequest {
    /// "handover" oder "return"
    pub protocol_type: String,

    #[validate(range(min = 0))]
    pub mileage: i32,

    pub fuel_level: Option<String>,
    pub fresh_water_tank: Option<String>,
    pub waste_water_tank: Option<String>,
    pub exterior_condition: Option<serde_json::Value>,
    pub interior_condition: Option<serde_json::Value>,
    pub equipment_checklist: Option<serde_json::Value>,
    pub damage_notes: Option<String>,
    pub additional_notes: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub id_card_photos: Option<Vec<String>>,
    pub drivers_license_photos: Option<Vec<String>>,
    pub customer_signature: Option<String>,
    pub staff_signature: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub completed_by: String,
}

/// Request zum Erfassen eines Reinigungsprotokolls
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCleaningProtocolRequest {
    pub exterior_checklist: Option<serde_json::Value>,
    pub interior_checklist: Option<serde_json::Value>,
    pub utilities_checklist: Option<serde_json::Value>,
    pub inventory_checklist: Option<serde_json::Value>,
    pub safety_checklist: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub staff_signature: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub completed_by: String,
}
