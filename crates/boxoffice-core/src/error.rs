//! Error types for the Box Office Core.

use thiserror::Error;

/// Core errors raised while decoding stored values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed password hash: {0}")]
    MalformedPasswordHash(String),

    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),
}

/// Validation errors for user-supplied input.
///
/// All of these are recoverable: the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("confirmation code must be exactly 6 digits")]
    InvalidPaymentCode,

    #[error("unknown weekday: {0:?}")]
    UnknownWeekday(String),

    #[error("cannot book {event} on {day}; only {today} onward")]
    DayPassed {
        event: String,
        day: String,
        today: String,
    },

    #[error("malformed seed line {line}: {reason}")]
    MalformedSeedLine { line: usize, reason: String },
}
