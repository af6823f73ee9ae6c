pub mod advisory;
pub mod error;
pub mod simulation;
pub mod types;

pub use error::MansionError;
pub use types::*;

/// Standard result type for all engine operations
pub type MansionResult<T> = Result<T, MansionError>;
