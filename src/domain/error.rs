use thiserror::Error;

/// Errors surfaced by the scheduling and reconciliation core.
///
/// Validation-class errors carry enough detail for the caller to correct
/// the request. Consistency-class errors (`SlotAlreadyTaken`,
/// `ImmutableField`) are rejections and must never be retried as-is.
/// `StoreUnavailable` is the only transient class.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Missing parameter: {field}")]
    MissingParameter { field: &'static str },

    #[error("Unknown court: {0}")]
    UnknownCourt(String),

    #[error("Unknown client: {0}")]
    UnknownClient(String),

    #[error("Slot {slot} on {day} is already taken for court {court}")]
    SlotAlreadyTaken {
        day: String,
        court: String,
        slot: String,
    },

    #[error("Invalid payment state: {0}")]
    InvalidPaymentState(String),

    #[error("Field {0} cannot be changed after creation")]
    ImmutableField(&'static str),

    #[error("No reservations match the requested filters")]
    NoMatchingReservations,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl DomainError {
    /// Whether this error is transient and the operation may succeed if
    /// retried. Only store outages qualify; conflicts and validation
    /// failures would reproduce identically.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
