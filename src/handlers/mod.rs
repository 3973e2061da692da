pub mod auth_handlers;
pub mod dashboard;
pub mod export_handlers;
pub mod location_handlers;
pub mod public_handlers;
pub mod session_handlers;
