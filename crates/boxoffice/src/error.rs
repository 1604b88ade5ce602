//! Error types for the box office.

use std::path::PathBuf;

use boxoffice_core::{EventId, EventKey, ValidationError};
use boxoffice_store::StoreError;
use thiserror::Error;

/// Errors that can occur during box office operations.
///
/// Everything except [`BoxOfficeError::Persistence`] is recoverable: the
/// caller re-prompts or re-shows the cart.
#[derive(Debug, Error)]
pub enum BoxOfficeError {
    /// Any underlying store failure. Not retried.
    #[error("persistence failure: {0}")]
    Persistence(StoreError),

    /// Checkout-time (or add-time) seat check failed.
    #[error("insufficient availability for event {event}: requested {requested}, remaining {remaining}")]
    InsufficientAvailability {
        event: EventId,
        requested: u32,
        remaining: u32,
    },

    /// Another event already uses this (name, venue, date).
    #[error("duplicate event: {0}")]
    DuplicateEvent(EventKey),

    /// Username already taken.
    #[error("user already exists: {0}")]
    DuplicateUser(String),

    /// Malformed user input.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Export destination not writable.
    #[error("failed to export orders to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed file unreadable or malformed.
    #[error("failed to import seed file {}: {reason}", path.display())]
    SeedImport { path: PathBuf, reason: String },

    /// Configuration file unreadable or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Event not known to the box office.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Checkout attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Operation requires a role the current session lacks.
    #[error("not authorized: {0}")]
    NotAuthorized(String),
}

impl From<StoreError> for BoxOfficeError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateUser(username) => BoxOfficeError::DuplicateUser(username),
            other => BoxOfficeError::Persistence(other),
        }
    }
}

/// Result type for box office operations.
pub type Result<T> = std::result::Result<T, BoxOfficeError>;
