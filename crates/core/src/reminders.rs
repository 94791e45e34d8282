//! Reminder fire-time planning
//!
//! Pure computation of when the two reminders for a booking should fire,
//! relative to an injected `now`. The scheduler adapter turns the plan
//! into one-shot jobs; everything time-zone- and grace-window-related is
//! decided here so it can be tested deterministically.

use bookslot_domain::{
    date_label, BookslotError, ReminderConfig, ReminderKey, ReminderKind, Result,
};
use chrono::{DateTime, Days, Duration, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

/// Fire-time policy derived from configuration.
#[derive(Debug, Clone)]
pub struct ReminderPolicy {
    /// Local hour of the day-before reminder.
    pub day_before_hour: u32,
    /// Local hour of the on-day reminder.
    pub on_day_hour: u32,
    /// How long past its target a reminder may still fire.
    pub grace: Duration,
}

impl From<&ReminderConfig> for ReminderPolicy {
    fn from(config: &ReminderConfig) -> Self {
        Self {
            day_before_hour: config.day_before_hour,
            on_day_hour: config.on_day_hour,
            grace: Duration::seconds(config.misfire_grace_secs as i64),
        }
    }
}

/// One reminder to register with the job scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReminder {
    pub key: ReminderKey,
    /// Target fire time; may be slightly in the past when the reminder is
    /// inside the grace window, in which case it fires immediately.
    pub fire_at: DateTime<Tz>,
    pub message: String,
}

/// Compute the reminders to schedule for a booking.
///
/// The event date resolves with year rollover (see
/// [`date_label::resolve_for_event`]). Fire times strictly in the future
/// are planned as-is; fire times within the grace window behind `now`
/// are planned for immediate delivery; older ones are dropped silently,
/// never fired retroactively in a burst.
///
/// # Errors
/// `ReminderSchedule` when the date label does not resolve even against
/// the next year.
pub fn plan_reminders(
    owner_id: i64,
    date_label_raw: &str,
    now: DateTime<Tz>,
    policy: &ReminderPolicy,
) -> Result<Vec<PlannedReminder>> {
    let event = date_label::resolve_for_event(date_label_raw, now.date_naive()).ok_or_else(|| {
        BookslotError::ReminderSchedule(format!("unparseable date label: {date_label_raw}"))
    })?;

    let tz = now.timezone();
    let mut planned = Vec::new();

    for kind in ReminderKind::BOTH {
        let (date, hour) = match kind {
            ReminderKind::DayBefore => {
                let Some(day_before) = event.checked_sub_days(Days::new(1)) else {
                    continue;
                };
                (day_before, policy.day_before_hour)
            }
            ReminderKind::OnDay => (event, policy.on_day_hour),
        };
        let Some(naive) = date.and_hms_opt(hour, 0, 0) else {
            continue;
        };
        // `earliest` picks the pre-transition instant on DST folds.
        let Some(fire_at) = tz.from_local_datetime(&naive).earliest() else {
            continue;
        };

        if fire_at > now || now - fire_at <= policy.grace {
            planned.push(PlannedReminder {
                key: ReminderKey::new(kind, owner_id, date_label_raw),
                fire_at,
                message: reminder_message(kind, date_label_raw),
            });
        } else {
            debug!(
                owner_id,
                date = %date_label_raw,
                kind = kind.as_str(),
                fire_at = %fire_at,
                "reminder target already passed, dropping"
            );
        }
    }

    Ok(planned)
}

/// The text delivered when a reminder fires.
pub fn reminder_message(kind: ReminderKind, label: &str) -> String {
    let date = date_label::human(label);
    match kind {
        ReminderKind::DayBefore => {
            format!("Reminder: tomorrow, <b>{date}</b>, you have a booked visit!")
        }
        ReminderKind::OnDay => {
            format!("Reminder: today, <b>{date}</b>, you have a booked visit. See you there!")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Moscow;

    fn policy() -> ReminderPolicy {
        ReminderPolicy {
            day_before_hour: 12,
            on_day_hour: 8,
            grace: Duration::seconds(600),
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        Moscow.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap()
    }

    #[test]
    fn both_reminders_planned_for_a_future_event() {
        let planned = plan_reminders(555, "24.05", at(2025, 5, 20, 10, 0), &policy()).unwrap();
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].key.kind, ReminderKind::DayBefore);
        assert_eq!(planned[0].fire_at, at(2025, 5, 23, 12, 0));
        assert_eq!(planned[1].key.kind, ReminderKind::OnDay);
        assert_eq!(planned[1].fire_at, at(2025, 5, 24, 8, 0));
    }

    #[test]
    fn past_day_before_is_skipped_close_to_the_event() {
        // One hour before the on-day fire time: only the on-day reminder
        // survives planning.
        let planned = plan_reminders(555, "24.05", at(2025, 5, 24, 7, 0), &policy()).unwrap();
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].key.kind, ReminderKind::OnDay);
    }

    #[test]
    fn late_fire_inside_grace_window_is_kept() {
        let planned = plan_reminders(555, "24.05", at(2025, 5, 24, 8, 5), &policy()).unwrap();
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].key.kind, ReminderKind::OnDay);
        assert!(planned[0].fire_at < at(2025, 5, 24, 8, 5));
    }

    #[test]
    fn late_fire_beyond_grace_window_is_dropped() {
        let planned = plan_reminders(555, "24.05", at(2025, 5, 24, 8, 30), &policy()).unwrap();
        assert!(planned.is_empty());
    }

    #[test]
    fn january_event_rolls_into_next_year_in_december() {
        let planned = plan_reminders(555, "02.01", at(2025, 12, 30, 10, 0), &policy()).unwrap();
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].fire_at, at(2026, 1, 1, 12, 0));
        assert_eq!(planned[1].fire_at, at(2026, 1, 2, 8, 0));
    }

    #[test]
    fn unparseable_label_is_an_error() {
        let err = plan_reminders(555, "not-a-date", at(2025, 5, 20, 10, 0), &policy());
        assert!(matches!(err, Err(BookslotError::ReminderSchedule(_))));
    }

    #[test]
    fn keys_carry_owner_and_label() {
        let planned = plan_reminders(42, "24.05", at(2025, 5, 20, 10, 0), &policy()).unwrap();
        assert_eq!(planned[0].key.to_string(), "reminder_day_before_42_24.05");
        assert_eq!(planned[1].key.to_string(), "reminder_on_day_42_24.05");
    }
}
