//! # Bookslot Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The Google Sheets schedule store adapter
//! - The reminder job scheduler (one-shot jobs over tokio-cron-scheduler)
//! - The Telegram Bot API client (message delivery)
//! - Configuration loading (environment first, file fallback)
//!
//! ## Architecture
//! - Implements traits defined in `bookslot-core`
//! - Depends on `bookslot-domain` and `bookslot-core`
//! - Contains all "impure" code (network I/O, timers)

pub mod config;
pub mod scheduling;
pub mod sheets;
pub mod telegram;

// Re-export commonly used items
pub use scheduling::{CronReminderScheduler, ReminderSchedulerConfig, SchedulerError};
pub use sheets::{AccessTokenProvider, SheetsClient, SheetsScheduleStore, StaticTokenProvider};
pub use telegram::TelegramClient;
