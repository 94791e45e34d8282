//! Domain data types

pub mod booking;
pub mod occupant;
pub mod reminder;
pub mod schedule;

pub use booking::{
    BookingConfirmation, BookingOutcome, BookingRecord, CancellationOutcome, SlotClaimOutcome,
};
pub use occupant::Occupant;
pub use reminder::{ReminderKey, ReminderKind};
pub use schedule::{AvailabilityEntry, ScheduleRow, ScheduleSnapshot, SlotCell, SlotIndex};
