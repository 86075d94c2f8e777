use thiserror::Error;

/// Failures surfaced by the record store. `NoSeats` is the single conflict
/// kind; when a compound operation returns it, nothing was committed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("no seats available on flight {0}")]
    NoSeats(String),

    #[error("cart {0} is not locked")]
    NotLocked(String),

    #[error("lock on cart {0} has expired")]
    LockExpired(String),

    #[error("cart {0} has no flight item")]
    EmptyCart(String),

    #[error("email already registered: {0}")]
    EmailTaken(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }
}
