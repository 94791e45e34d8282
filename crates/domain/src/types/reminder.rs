//! Reminder kinds and job keys

use serde::{Deserialize, Serialize};

/// Which of the two reminders a job delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    /// Fires the day before the event, midday local time.
    DayBefore,
    /// Fires on the event day, morning local time.
    OnDay,
}

impl ReminderKind {
    pub const BOTH: [Self; 2] = [Self::DayBefore, Self::OnDay];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DayBefore => "day_before",
            Self::OnDay => "on_day",
        }
    }
}

/// Registry key for a scheduled reminder job.
///
/// Scheduling the same key twice replaces the previous job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderKey {
    pub kind: ReminderKind,
    pub owner_id: i64,
    pub date_label: String,
}

impl ReminderKey {
    pub fn new(kind: ReminderKind, owner_id: i64, date_label: impl Into<String>) -> Self {
        Self { kind, owner_id, date_label: date_label.into() }
    }
}

impl std::fmt::Display for ReminderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reminder_{}_{}_{}", self.kind.as_str(), self.owner_id, self.date_label)
    }
}
