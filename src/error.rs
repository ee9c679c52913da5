/// Error types for the booking ledger.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A booking request was rejected. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// No matching appointment or doctor exists. Nothing was changed.
    #[error("{0}")]
    NotFound(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        LedgerError::NotFound(msg.into())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
