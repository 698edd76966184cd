use thiserror::Error;

#[derive(Debug, Error)]
pub enum SavingsPlanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },
}
