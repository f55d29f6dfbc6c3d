//! Konfiguration des Projekts
//!
//! Umgebungs-Konfiguration und Datenbank-Pool.

pub mod database;
pub mod environment;

pub use database::*;
pub use environment::*;
