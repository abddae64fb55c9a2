use thiserror::Error;

/// Malformed input rejected before any registry lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid time format")]
    InvalidTime,

    #[error("Invalid date format")]
    InvalidDate,

    /// The request body or query string could not be read at all.
    #[error("Malformed request: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum SlotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Slot not found.")]
    NotFound,

    /// The slot exists but is already booked.
    #[error("Slot is not available.")]
    Unavailable,
}

pub type SlotResult<T> = Result<T, SlotError>;
