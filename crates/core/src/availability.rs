//! Availability engine
//!
//! Computes, from one schedule snapshot, the dates a user can book right
//! now. The sheet is expected sorted ascending by date, so rows are
//! skipped only until the first future-or-today date is seen; after that
//! every parseable row is included. This makes skipping past-dated header
//! noise cheap while tolerating occasional parse failures later without
//! truncating the list.

use bookslot_domain::{date_label, AvailabilityEntry, ScheduleSnapshot};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Derive the bookable dates from a snapshot.
///
/// Date labels resolve against `today`'s year with no rollover; rows with
/// empty or unparseable labels are skipped with a debug log. Only rows
/// with at least one free slot are returned, in store order.
pub fn compute_availability(snapshot: &ScheduleSnapshot, today: NaiveDate) -> Vec<AvailabilityEntry> {
    let year = today.year();
    let mut found_future = false;
    let mut entries = Vec::new();

    for row in &snapshot.rows {
        if row.date_label.trim().is_empty() {
            continue;
        }
        let Some(date) = date_label::resolve_in_year(&row.date_label, year) else {
            debug!(row = row.row_index, label = %row.date_label, "skipping unparseable date label");
            continue;
        };
        if !found_future {
            if date >= today {
                found_future = true;
            } else {
                continue;
            }
        }

        let free_count = row.free_count();
        if free_count > 0 {
            entries.push(AvailabilityEntry {
                date_label: row.date_label.clone(),
                free_count,
                row_index: row.row_index,
            });
        }
    }

    entries
}

/// The availability set a user was shown, kept for the lifetime of one
/// rendered page so selections can be validated against it.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityView {
    entries: Vec<AvailabilityEntry>,
}

impl AvailabilityView {
    pub fn new(entries: Vec<AvailabilityEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AvailabilityEntry] {
        &self.entries
    }

    pub fn contains(&self, date_label: &str) -> bool {
        self.entries.iter().any(|e| e.date_label == date_label)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
