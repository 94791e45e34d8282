//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Bookslot
///
/// Domain outcomes that a user can act on (`AlreadyBooked`, `DateFull`,
/// `StaleSelection`, `NotFound`) are not errors; they are carried in the
/// `Ok` value of the booking operations. This enum covers the failures
/// that abort an operation.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BookslotError {
    #[error("Schedule store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid cell address: {0}")]
    CellAddressInvalid(String),

    #[error("Reminder scheduling failed: {0}")]
    ReminderSchedule(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Bookslot operations
pub type Result<T> = std::result::Result<T, BookslotError>;
