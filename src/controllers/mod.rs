pub mod auth_controller;
pub mod booking_controller;
pub mod contract_controller;
pub mod protocol_controller;
pub mod template_controller;
pub mod vehicle_controller;
