//! Utilities des Systems
//!
//! Fehlerbehandlung, Formatierung und JWT-Hilfsfunktionen.

pub mod errors;
pub mod format;
pub mod jwt;
