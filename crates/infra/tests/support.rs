//! Shared fakes for infra integration tests

use std::sync::Mutex;

use async_trait::async_trait;
use bookslot_core::{Clock, MessageSink, ScheduleStore};
use bookslot_domain::{Occupant, Result, SlotIndex};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::sync::Notify;

/// Minimal in-memory schedule store for scheduler tests.
pub struct InMemoryStore {
    rows: Vec<Vec<String>>,
}

impl InMemoryStore {
    pub fn new(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.iter().map(|s| (*s).to_string()).collect()).collect(),
        }
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    async fn read_cell(&self, row: u32, column: u32) -> Result<String> {
        Ok(self
            .rows
            .get(row as usize - 1)
            .and_then(|r| r.get(column as usize - 1))
            .cloned()
            .unwrap_or_default())
    }

    async fn write_cell(&self, _row: u32, _slot: SlotIndex, _value: &str) -> Result<()> {
        Ok(())
    }

    async fn spreadsheet_title(&self) -> Result<String> {
        Ok("Test Schedule".to_string())
    }
}

/// Message sink that records deliveries and wakes waiters.
#[derive(Default)]
pub struct CollectingSink {
    pub delivered: Mutex<Vec<(i64, String)>>,
    pub notify: Notify,
}

impl CollectingSink {
    pub fn count(&self) -> usize {
        self.delivered.lock().expect("sink lock").len()
    }
}

#[async_trait]
impl MessageSink for CollectingSink {
    async fn deliver(&self, owner_id: i64, text: &str) -> Result<()> {
        self.delivered.lock().expect("sink lock").push((owner_id, text.to_string()));
        self.notify.notify_waiters();
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

pub fn owner(id: i64, handle: Option<&str>) -> Occupant {
    Occupant::new(id, handle.map(str::to_string))
}
