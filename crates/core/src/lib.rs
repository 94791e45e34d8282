//! # Bookslot Core
//!
//! Business services for slot booking against the schedule store.
//!
//! This crate contains:
//! - Port traits for the store, reminder scheduler, message sink and clock
//! - The availability engine (which dates are bookable right now)
//! - The booking engine (claim, specific-slot claim, cancellation, listing)
//! - Pure reminder fire-time planning
//! - Pagination and reply/keyboard view models
//! - The transport-agnostic chat intent dispatcher
//!
//! ## Architecture
//! - Depends only on `bookslot-domain`
//! - All I/O goes through the port traits; infrastructure implements them

pub mod availability;
pub mod booking;
pub mod frontend;
pub mod pagination;
pub mod ports;
pub mod reminders;
pub mod view;

pub use availability::{compute_availability, AvailabilityView};
pub use booking::BookingService;
pub use frontend::{ChatFrontend, Intent};
pub use pagination::{paginate, DatePage};
pub use ports::{Clock, MessageSink, ReminderScheduler, ScheduleStore, SystemClock};
pub use reminders::{plan_reminders, PlannedReminder, ReminderPolicy};
pub use view::{Button, ButtonAction, Reply};
