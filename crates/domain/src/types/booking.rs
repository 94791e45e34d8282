//! Booking and cancellation outcome types
//!
//! These are the user-actionable results of the booking operations. They
//! are data, not errors: a full date or a stale page does not abort the
//! caller's session.

use serde::{Deserialize, Serialize};

use crate::types::schedule::SlotIndex;

/// A successfully written claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub date_label: String,
    pub row_index: u32,
    pub slot_index: SlotIndex,
}

/// Result of booking the first open slot on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingOutcome {
    Booked(BookingConfirmation),
    /// The owner already holds a claim on this date; nothing was written.
    AlreadyBooked { date_label: String, slot_index: SlotIndex },
    /// No open slot remained on the date.
    DateFull { date_label: String },
    /// The date was not on the availability view the user selected from.
    StaleSelection { date_label: String },
}

/// Result of claiming one specific slot (HTTP surface).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotClaimOutcome {
    Claimed(BookingConfirmation),
    /// The requested cell already holds a claim.
    SlotTaken { date_label: String, slot_index: SlotIndex },
    /// The owner already holds a different slot on this date.
    AlreadyBooked { date_label: String, slot_index: SlotIndex },
    DateNotFound { date_label: String },
}

/// Result of cancelling a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancellationOutcome {
    Cancelled { date_label: String, slot_index: SlotIndex },
    /// No claim by this owner on the date.
    NotFound { date_label: String },
}

/// One active claim held by an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub date_label: String,
    pub slot_index: SlotIndex,
    pub row_index: u32,
}
