//! Port interfaces for the booking core
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use bookslot_domain::{Occupant, Result, SlotIndex};
use chrono::{DateTime, Utc};

/// The schedule store: a spreadsheet with one date row per bookable day.
///
/// Row/column addressing is one-based and matches the sheet's native
/// layout (row 1 headers, column A date labels, columns B..E slots).
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Read every row of the sheet, headers included, in sheet order.
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>>;

    /// Read a single cell; empty cells come back as empty strings.
    async fn read_cell(&self, row: u32, column: u32) -> Result<String>;

    /// Write a slot cell. An empty `value` clears the claim.
    async fn write_cell(&self, row: u32, slot: SlotIndex, value: &str) -> Result<()>;

    /// Human-facing title of the backing spreadsheet.
    async fn spreadsheet_title(&self) -> Result<String>;
}

/// Reminder job scheduling, keyed per owner and date.
#[async_trait]
pub trait ReminderScheduler: Send + Sync {
    /// Schedule both reminders for a booking; replaces existing jobs
    /// under the same keys.
    async fn schedule(&self, owner: &Occupant, date_label: &str) -> Result<()>;

    /// Cancel both reminders for a booking; missing jobs are not an error.
    async fn cancel(&self, owner_id: i64, date_label: &str) -> Result<()>;
}

/// Outbound message delivery to an owner (the chat platform).
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Deliver a text message; at-most-once, no retry.
    async fn deliver(&self, owner_id: i64, text: &str) -> Result<()>;
}

/// Wall-clock source, injected so time-dependent logic is testable.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
