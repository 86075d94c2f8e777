use thiserror::Error;
use tripkart_core::StoreError;

/// Failure taxonomy of the cart state machine and the orchestrator.
///
/// `NoSeats` is the only conflict; everything else is a precondition or
/// lookup failure checked before any mutation.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Wrong cart/payment state for the requested operation.
    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("No seats available")]
    NoSeats,
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => {
                Self::NotFound(format!("{kind} not found: {id}"))
            }
            StoreError::NoSeats(_) => Self::NoSeats,
            StoreError::NotLocked(_) => Self::InvalidState("Cart must be LOCKED".to_string()),
            StoreError::LockExpired(_) => Self::InvalidState("Lock expired".to_string()),
            StoreError::EmptyCart(_) => Self::Validation("Cart has no flight".to_string()),
            StoreError::EmailTaken(_) => Self::Conflict("Email already exists".to_string()),
        }
    }
}
