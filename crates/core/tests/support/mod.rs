//! Shared fakes for core integration tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bookslot_core::{Clock, ReminderScheduler, ScheduleStore};
use bookslot_domain::{BookslotError, Occupant, Result, SlotIndex};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// In-memory schedule store over raw rows, sheet-addressed like the real
/// one (row 1 is the header row).
pub struct InMemoryStore {
    rows: Mutex<Vec<Vec<String>>>,
    pub write_count: AtomicUsize,
    pub fail_reads: AtomicBool,
    /// When set, the next `read_cell` of this (row, column) first writes a
    /// foreign marker there, simulating a concurrent winner.
    pub steal_cell: Mutex<Option<(u32, u32)>>,
}

impl InMemoryStore {
    pub fn new(rows: &[&[&str]]) -> Self {
        Self {
            rows: Mutex::new(
                rows.iter().map(|r| r.iter().map(|s| (*s).to_string()).collect()).collect(),
            ),
            write_count: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            steal_cell: Mutex::new(None),
        }
    }

    pub fn cell(&self, row: u32, column: u32) -> String {
        let rows = self.rows.lock().expect("store lock");
        rows.get(row as usize - 1)
            .and_then(|r| r.get(column as usize - 1))
            .cloned()
            .unwrap_or_default()
    }

    pub fn writes(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    fn set_cell(&self, row: u32, column: u32, value: &str) {
        let mut rows = self.rows.lock().expect("store lock");
        let row_fields = &mut rows[row as usize - 1];
        if row_fields.len() < column as usize {
            row_fields.resize(column as usize, String::new());
        }
        row_fields[column as usize - 1] = value.to_string();
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
        let stolen = {
            let mut steal = self.steal_cell.lock().expect("steal lock");
            if steal.is_some_and(|c| c == (row, column)) {
                *steal = None;
                true
            } else {
                false
            }
        };
        if stolen {
            self.set_cell(row, column, "(ID: 999999)");
        }
        Ok(self.cell(row, column))
    }

    async fn write_cell(&self, row: u32, slot: SlotIndex, value: &str) -> Result<()> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        self.set_cell(row, slot.column(), value);
        Ok(())
    }

    async fn spreadsheet_title(&self) -> Result<String> {
        Ok("Panda Schedule".to_string())
    }
}

/// Records schedule/cancel calls instead of running jobs.
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

/// A clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pin to a local wall-clock time in `tz`.
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

pub fn owner(id: i64, handle: Option<&str>) -> Occupant {
    Occupant::new(id, handle.map(str::to_string))
}
