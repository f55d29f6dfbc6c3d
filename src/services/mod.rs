//! Services
//!
//! Geschäftslogik oberhalb der Repositories: Preisberechnung,
//! Template-Merge, Dokumentmodell, PDF-Rendering, Object Storage und
//! die Kundenbenachrichtigung.

pub mod auth_service;
pub mod browserless;
pub mod contract_service;
pub mod document;
pub mod image;
pub mod merge;
pub mod notifier;
pub mod pdf;
pub mod pricing;
pub mod render;
pub mod storage;
