//! DTOs der API
//!
//! Request- und Response-Strukturen, getrennt von den DB-Modellen.

pub mod auth_dto;
pub mod booking_dto;
pub mod common;
pub mod contract_dto;
pub mod protocol_dto;
pub mod template_dto;
pub mod vehicle_dto;
