pub mod types;
pub mod queries;
pub mod lifecycle;

pub use types::*;
pub use queries::*;
pub use lifecycle::*;
