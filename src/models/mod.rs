pub mod attendance;
pub mod location;
pub mod session;
pub mod stats;
