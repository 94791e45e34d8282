//! Schedule snapshot types
//!
//! A snapshot is one full read of the schedule sheet: an ordered list of
//! date rows, each with four slot cells (columns B..E). Snapshots are built
//! fresh for every decision and never cached across operations.

use serde::{Deserialize, Serialize};

use crate::constants::{FIRST_DATA_ROW, SLOTS_PER_DAY};
use crate::types::occupant::Occupant;

/// One-based slot position within a date row, `1..=4`.
///
/// Slot `1` maps to sheet column B, slot `4` to column E.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// All slot positions in claim order (left to right).
    pub const ALL: [Self; SLOTS_PER_DAY] = [Self(1), Self(2), Self(3), Self(4)];

    /// Validate a raw index. Returns `None` outside `1..=4`.
    pub fn new(index: u8) -> Option<Self> {
        (1..=SLOTS_PER_DAY as u8).contains(&index).then_some(Self(index))
    }

    /// The raw one-based index.
    pub fn get(self) -> u8 {
        self.0
    }

    /// One-based sheet column for this slot (B=2 .. E=5).
    pub fn column(self) -> u32 {
        u32::from(self.0) + 1
    }

    /// Sheet column letter for this slot (B..E).
    pub fn column_letter(self) -> char {
        char::from(b'A' + self.0)
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of a single bookable cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotCell {
    /// No claim written.
    Empty,
    /// A claim marker is present; the string is the raw cell text.
    Claimed(String),
}

impl SlotCell {
    /// Normalize a raw cell value. Whitespace-only cells count as empty.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Empty
        } else {
            Self::Claimed(raw.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether this cell holds a claim by `owner`.
    ///
    /// Canonical markers are parsed and compared by owner id; cells that do
    /// not parse fall back to the legacy profile-link check.
    pub fn belongs_to(&self, owner: &Occupant) -> bool {
        match self {
            Self::Empty => false,
            Self::Claimed(raw) => match Occupant::parse_marker(raw) {
                Some(parsed) => parsed.owner_id == owner.owner_id,
                None => Occupant::legacy_marker_matches(raw, owner),
            },
        }
    }

    /// The parsed occupant, if the cell carries a canonical marker.
    pub fn occupant(&self) -> Option<Occupant> {
        match self {
            Self::Empty => None,
            Self::Claimed(raw) => Occupant::parse_marker(raw),
        }
    }
}

/// One date row of the schedule sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// One-based sheet row, matching the store's native addressing.
    pub row_index: u32,
    /// Day-month label (`DD.MM`), no year encoded.
    pub date_label: String,
    /// The four slot cells, columns B..E.
    pub slots: [SlotCell; SLOTS_PER_DAY],
}

impl ScheduleRow {
    /// Count of unclaimed slots in this row.
    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_empty()).count()
    }

    /// First unclaimed slot scanning left to right (B..E).
    pub fn first_free_slot(&self) -> Option<SlotIndex> {
        SlotIndex::ALL.into_iter().find(|i| self.slot(*i).is_empty())
    }

    /// The cell at a slot position.
    pub fn slot(&self, index: SlotIndex) -> &SlotCell {
        &self.slots[usize::from(index.get() - 1)]
    }

    /// The slot claimed by `owner` in this row, if any.
    pub fn owner_slot(&self, owner: &Occupant) -> Option<SlotIndex> {
        SlotIndex::ALL.into_iter().find(|i| self.slot(*i).belongs_to(owner))
    }
}

/// An ordered, point-in-time read of the whole schedule sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleSnapshot {
    /// Build a snapshot from the store's raw rows.
    ///
    /// The first raw row is the header row and is dropped. Data rows keep
    /// their native one-based sheet index. Rows shorter than five fields
    /// are treated as if the missing trailing fields were empty slots;
    /// this padding is a read-time normalization and is never written back.
    pub fn from_raw_rows(raw: &[Vec<String>]) -> Self {
        let rows = raw
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, fields)| !fields.is_empty())
            .map(|(i, fields)| {
                let date_label = fields.first().cloned().unwrap_or_default();
                let slots = std::array::from_fn(|slot| {
                    SlotCell::from_raw(fields.get(slot + 1).map_or("", String::as_str))
                });
                ScheduleRow {
                    row_index: i as u32 + FIRST_DATA_ROW - 1,
                    date_label,
                    slots,
                }
            })
            .collect();
        Self { rows }
    }

    /// Find the row whose date label matches exactly.
    pub fn find_row(&self, date_label: &str) -> Option<&ScheduleRow> {
        self.rows.iter().find(|r| r.date_label == date_label)
    }
}

/// A bookable date derived from one snapshot; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub date_label: String,
    pub free_count: usize,
    /// Sheet row the entry came from. Display/fast-path datum only; write
    /// paths re-locate rows by date label.
    pub row_index: u32,
}
