//! Booking engine
//!
//! Validates selections against the availability view the user saw,
//! claims slots, cancels claims, and lists an owner's bookings. Every
//! decision re-reads a fresh snapshot; nothing is cached across calls.
//!
//! Rows are re-located by date label on every write path. The sheet row
//! index remembered on an availability entry is a display datum only:
//! positional re-lookup would misalign if rows were inserted or deleted
//! between reads.

use std::sync::Arc;

use bookslot_domain::constants::{LOCATION_CELL_COLUMN, LOCATION_CELL_ROW};
use bookslot_domain::{
    parse_location_info, BookingConfirmation, BookingOutcome, BookingRecord, CancellationOutcome,
    LocationInfo, Occupant, Result, ScheduleSnapshot, SlotClaimOutcome, SlotIndex,
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::availability::{compute_availability, AvailabilityView};
use crate::ports::{Clock, ReminderScheduler, ScheduleStore};

/// Slot allocation and cancellation against the schedule store.
pub struct BookingService {
    store: Arc<dyn ScheduleStore>,
    reminders: Arc<dyn ReminderScheduler>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn ScheduleStore>,
        reminders: Arc<dyn ReminderScheduler>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
    ) -> Self {
        Self { store, reminders, clock, timezone }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now_utc().with_timezone(&self.timezone).date_naive()
    }

    /// Read a fresh snapshot of the whole sheet.
    pub async fn snapshot(&self) -> Result<ScheduleSnapshot> {
        let raw = self.store.read_all_rows().await?;
        Ok(ScheduleSnapshot::from_raw_rows(&raw))
    }

    /// The dates a user can book right now.
    pub async fn available_dates(&self) -> Result<AvailabilityView> {
        let snapshot = self.snapshot().await?;
        Ok(AvailabilityView::new(compute_availability(&snapshot, self.today())))
    }

    /// Human-facing title of the backing spreadsheet.
    pub async fn schedule_title(&self) -> Result<String> {
        self.store.spreadsheet_title().await
    }

    /// The venue location block; store failures degrade to the placeholder.
    pub async fn location(&self) -> LocationInfo {
        match self.store.read_cell(LOCATION_CELL_ROW, LOCATION_CELL_COLUMN).await {
            Ok(raw) => parse_location_info(Some(&raw)),
            Err(err) => {
                warn!(error = %err, "failed to read location cell");
                parse_location_info(None)
            }
        }
    }

    /// Book the first open slot on a date.
    ///
    /// `seen` is the availability view live when the user's page was
    /// rendered; selections outside it are rejected as stale. A fresh
    /// snapshot is read before any write, the owner's existing claim makes
    /// the call idempotent, and each candidate cell is re-read immediately
    /// before the claim write — a concurrently taken cell advances the
    /// scan instead of being overwritten.
    pub async fn attempt_booking(
        &self,
        date_label: &str,
        owner: &Occupant,
        seen: &AvailabilityView,
    ) -> Result<BookingOutcome> {
        if !seen.contains(date_label) {
            return Ok(BookingOutcome::StaleSelection { date_label: date_label.to_string() });
        }

        let snapshot = self.snapshot().await?;
        let Some(row) = snapshot.find_row(date_label) else {
            return Ok(BookingOutcome::StaleSelection { date_label: date_label.to_string() });
        };

        if let Some(slot_index) = row.owner_slot(owner) {
            return Ok(BookingOutcome::AlreadyBooked {
                date_label: date_label.to_string(),
                slot_index,
            });
        }

        for slot_index in SlotIndex::ALL {
            if !row.slot(slot_index).is_empty() {
                continue;
            }
            // Narrow the race window: verify the cell is still empty just
            // before committing, and move on when another writer won it.
            let current = self.store.read_cell(row.row_index, slot_index.column()).await?;
            if !current.trim().is_empty() {
                warn!(
                    date = %date_label,
                    row = row.row_index,
                    slot = %slot_index,
                    "slot claimed concurrently, advancing to the next one"
                );
                continue;
            }

            self.store.write_cell(row.row_index, slot_index, &owner.marker()).await?;
            info!(owner = %owner.display(), date = %date_label, slot = %slot_index, "booked");

            if let Err(err) = self.reminders.schedule(owner, date_label).await {
                // A failed reminder never rolls back a booking.
                warn!(error = %err, owner_id = owner.owner_id, "failed to schedule reminders");
            }

            return Ok(BookingOutcome::Booked(BookingConfirmation {
                date_label: date_label.to_string(),
                row_index: row.row_index,
                slot_index,
            }));
        }

        Ok(BookingOutcome::DateFull { date_label: date_label.to_string() })
    }

    /// Claim one specific slot (the HTTP surface names its slot).
    pub async fn claim_slot(
        &self,
        date_label: &str,
        slot_index: SlotIndex,
        owner: &Occupant,
    ) -> Result<SlotClaimOutcome> {
        let snapshot = self.snapshot().await?;
        let Some(row) = snapshot.find_row(date_label) else {
            return Ok(SlotClaimOutcome::DateNotFound { date_label: date_label.to_string() });
        };

        if let Some(held) = row.owner_slot(owner) {
            return Ok(SlotClaimOutcome::AlreadyBooked {
                date_label: date_label.to_string(),
                slot_index: held,
            });
        }

        if !row.slot(slot_index).is_empty() {
            return Ok(SlotClaimOutcome::SlotTaken {
                date_label: date_label.to_string(),
                slot_index,
            });
        }
        let current = self.store.read_cell(row.row_index, slot_index.column()).await?;
        if !current.trim().is_empty() {
            return Ok(SlotClaimOutcome::SlotTaken {
                date_label: date_label.to_string(),
                slot_index,
            });
        }

        self.store.write_cell(row.row_index, slot_index, &owner.marker()).await?;
        info!(owner = %owner.display(), date = %date_label, slot = %slot_index, "slot claimed");

        if let Err(err) = self.reminders.schedule(owner, date_label).await {
            warn!(error = %err, owner_id = owner.owner_id, "failed to schedule reminders");
        }

        Ok(SlotClaimOutcome::Claimed(BookingConfirmation {
            date_label: date_label.to_string(),
            row_index: row.row_index,
            slot_index,
        }))
    }

    /// Cancel the owner's claim on a date and its reminders.
    pub async fn attempt_cancellation(
        &self,
        date_label: &str,
        owner: &Occupant,
    ) -> Result<CancellationOutcome> {
        let snapshot = self.snapshot().await?;
        let Some(row) = snapshot.find_row(date_label) else {
            return Ok(CancellationOutcome::NotFound { date_label: date_label.to_string() });
        };
        let Some(slot_index) = row.owner_slot(owner) else {
            return Ok(CancellationOutcome::NotFound { date_label: date_label.to_string() });
        };

        self.store.write_cell(row.row_index, slot_index, "").await?;
        info!(owner = %owner.display(), date = %date_label, slot = %slot_index, "cancelled");

        // Cancel-if-exists: both reminder kinds, absence tolerated.
        if let Err(err) = self.reminders.cancel(owner.owner_id, date_label).await {
            warn!(error = %err, owner_id = owner.owner_id, "failed to cancel reminders");
        }

        Ok(CancellationOutcome::Cancelled { date_label: date_label.to_string(), slot_index })
    }

    /// Every claim held by the owner, in store order.
    pub async fn list_bookings_for(&self, owner: &Occupant) -> Result<Vec<BookingRecord>> {
        let snapshot = self.snapshot().await?;
        let mut records = Vec::new();
        for row in &snapshot.rows {
            for slot_index in SlotIndex::ALL {
                if row.slot(slot_index).belongs_to(owner) {
                    records.push(BookingRecord {
                        date_label: row.date_label.clone(),
                        slot_index,
                        row_index: row.row_index,
                    });
                }
            }
        }
        Ok(records)
    }
}
