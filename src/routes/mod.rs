pub mod auth_routes;
pub mod booking_routes;
pub mod contract_routes;
pub mod protocol_routes;
pub mod proxy_routes;
pub mod template_routes;
pub mod vehicle_routes;
