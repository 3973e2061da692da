//! Location-verified event check-in service: geofenced attendance capture
//! with a single live meeting session at a time.

pub mod audit;
pub mod auth;
pub mod db;
pub mod errors;
pub mod geo;
pub mod handlers;
pub mod models;
pub mod templates_structs;
pub mod validate;
