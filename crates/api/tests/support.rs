//! Shared fakes for API integration tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bookslot_core::{Clock, MessageSink, ReminderScheduler, ScheduleStore};
use bookslot_domain::{BookslotError, Occupant, Result, SlotIndex};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// In-memory schedule store, sheet-addressed (row 1 is headers).
pub struct InMemoryStore {
    rows: Mutex<Vec<Vec<String>>>,
    pub fail_reads: AtomicBool,
}

impl InMemoryStore {
    pub fn new(rows: &[&[&str]]) -> Self {
        Self {
            rows: Mutex::new(
                rows.iter().map(|r| r.iter().map(|s| (*s).to_string()).collect()).collect(),
            ),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn cell(&self, row: u32, column: u32) -> String {
        let rows = self.rows.lock().expect("store lock");
        rows.get(row as usize - 1)
            .and_then(|r| r.get(column as usize - 1))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BookslotError::StoreUnavailable("simulated outage".into()));
        }
        Ok(self.rows.lock().expect("store lock").clone())
    }

    async fn read_cell(&self, row: u32, column: u32) -> Result<String> {
        Ok(self.cell(row, column))
    }

    async fn write_cell(&self, row: u32, slot: SlotIndex, value: &str) -> Result<()> {
        let mut rows = self.rows.lock().expect("store lock");
        let fields = &mut rows[row as usize - 1];
        let column = slot.column() as usize;
        if fields.len() < column {
            fields.resize(column, String::new());
        }
        fields[column - 1] = value.to_string();
        Ok(())
    }

    async fn spreadsheet_title(&self) -> Result<String> {
        Ok("Panda Schedule".to_string())
    }
}

/// Records reminder scheduling instead of running jobs.
#[derive(Default)]
pub struct RecordingReminders {
    pub scheduled: Mutex<Vec<(i64, String)>>,
    pub cancelled: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl ReminderScheduler for RecordingReminders {
    async fn schedule(&self, owner: &Occupant, date_label: &str) -> Result<()> {
        self.scheduled
            .lock()
            .expect("reminders lock")
            .push((owner.owner_id, date_label.to_string()));
        Ok(())
    }

    async fn cancel(&self, owner_id: i64, date_label: &str) -> Result<()> {
        self.cancelled
            .lock()
            .expect("reminders lock")
            .push((owner_id, date_label.to_string()));
        Ok(())
    }
}

/// Records notification deliveries.
#[derive(Default)]
pub struct CollectingSink {
    pub delivered: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl MessageSink for CollectingSink {
    async fn deliver(&self, owner_id: i64, text: &str) -> Result<()> {
        self.delivered.lock().expect("sink lock").push((owner_id, text.to_string()));
        Ok(())
    }
}

/// A clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(tz: Tz, y: i32, mo: u32, d: u32, h: u32) -> Self {
        Self(
            tz.with_ymd_and_hms(y, mo, d, h, 0, 0)
                .single()
                .expect("unambiguous test time")
                .with_timezone(&Utc),
        )
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}
