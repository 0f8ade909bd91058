pub mod budget_service;
pub mod extraction_service;
pub mod geocoding_service;
pub mod marker_service;
pub mod route_service;
pub mod session_service;
