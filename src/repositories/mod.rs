pub mod booking_repository;
pub mod cleaning_protocol_repository;
pub mod contract_repository;
pub mod pricing_repository;
pub mod protocol_repository;
pub mod signature_repository;
pub mod template_repository;
pub mod user_repository;
pub mod vehicle_repository;
