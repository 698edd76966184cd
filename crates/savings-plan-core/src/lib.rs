pub mod display;
pub mod error;
pub mod format;
pub mod input;
pub mod projection;
pub mod types;

pub use error::SavingsPlanError;
pub use types::*;

/// Standard result type for all savings-plan operations
pub type SavingsPlanResult<T> = Result<T, SavingsPlanError>;
