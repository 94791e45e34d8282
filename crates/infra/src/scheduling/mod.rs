//! Reminder job scheduling
//!
//! One-shot reminder jobs over `tokio-cron-scheduler`, with an owned
//! key→job registry, replace-existing semantics, and startup
//! reconstruction from the schedule store.

pub mod error;
pub mod reminder_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use reminder_scheduler::{CronReminderScheduler, ReminderSchedulerConfig};
