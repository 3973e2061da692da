pub mod types;
pub mod queries;
pub mod admission;

pub use types::*;
pub use queries::*;
pub use admission::*;
