use thiserror::Error;

/// Everything that can go wrong between the publishing form and a confirmed
/// booking. The display strings are the user-facing messages and are surfaced
/// verbatim by the HTTP layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Only future dates allowed")]
    DateInPast,

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Add at least one slot.")]
    EmptyPublish,

    #[error("This booking link is invalid or expired")]
    NotFound,

    #[error("Selected date is not available")]
    DateNotOfferable,

    #[error("Selected time is not available")]
    TimeNotOfferable,

    #[error("Please select both date and time.")]
    MissingSelection,

    #[error("This slot has already been booked.")]
    AlreadyBooked,
}

pub type Result<T> = std::result::Result<T, BookingError>;
