//! Modell für Vertragsunterschriften
//!
//! Eine Unterschrift gehört zu genau einem Vertrag und wird mit dessen
//! Löschung entfernt (ON DELETE CASCADE, keine Waisen).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rolle des Unterzeichners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignerRole {
    Tenant,
    Landlord,
}

impl SignerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignerRole::Tenant => "tenant",
            SignerRole::Landlord => "landlord",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tenant" => Some(SignerRole::Tenant),
            "landlord" => Some(SignerRole::Landlord),
            _ => None,
        }
    }

    /// Beide Rollen müssen unterschreiben, bevor der Vertrag als
    /// unterzeichnet gilt
    pub const REQUIRED: [SignerRole; 2] = [SignerRole::Tenant, SignerRole::Landlord];
}

/// Unterschrift - bildet die Tabelle contract_signatures ab
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Signature {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub signer_role: String,
    pub signer_name: String,
    /// Rasterbild als Data-URL (PNG aus dem Unterschriften-Pad)
    pub signature_data: String,
    pub signed_at: DateTime<Utc>,
}

/// Prüft, ob jede erforderliche Rolle mindestens einmal unterschrieben
/// hat. Mehrfache Unterschriften derselben Rolle zählen nur einmal.
pub fn all_roles_signed(signatures: &[Signature]) -> bool {
    SignerRole::REQUIRED.iter().all(|required| {
        signatures
            .iter()
            .any(|s| s.signer_role == required.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(role: &str) -> Signature {
        Signature {
            id: Uuid::new_v4(),
            contract_id: Uuid::nil(),
            signer_role: role.to_string(),
            signer_name: "Max Mustermann".to_string(),
            signature_data: "data:image/png;base64,AAAA".to_string(),
            signed_at: Utc::now(),
        }
    }

    #[test]
    fn one_role_alone_is_not_enough() {
        assert!(!all_roles_signed(&[]));
        assert!(!all_roles_signed(&[signature("tenant")]));
        assert!(!all_roles_signed(&[signature("landlord")]));
    }

    #[test]
    fn both_roles_together_complete_the_contract() {
        let sigs = vec![signature("tenant"), signature("landlord")];
        assert!(all_roles_signed(&sigs));
    }

    #[test]
    fn duplicate_signatures_of_one_role_do_not_substitute_the_other() {
        let sigs = vec![signature("tenant"), signature("tenant")];
        assert!(!all_roles_signed(&sigs));
    }

    #[test]
    fn a_redundant_third_signature_keeps_the_contract_complete() {
        let sigs = vec![
            signature("tenant"),
            signature("landlord"),
            signature("tenant"),
        ];
        assert!(all_roles_signed(&sigs));
    }
}
