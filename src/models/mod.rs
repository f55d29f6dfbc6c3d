//! Modelle des Systems
//!
//! Dieses Modul enthält alle Datenmodelle, die direkt auf das
//! PostgreSQL-Schema abbilden.

pub mod booking;
pub mod cleaning_protocol;
pub mod contract;
pub mod pricing;
pub mod protocol;
pub mod signature;
pub mod template;
pub mod user;
pub mod vehicle;
