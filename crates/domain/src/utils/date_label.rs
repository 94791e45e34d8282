//! Day-month date labels
//!
//! Schedule rows carry bare `DD.MM` labels with no year. The year is
//! inferred from wall-clock context at read time, and the two resolution
//! rules deliberately differ: availability listing resolves against the
//! current year only, while the reminder path retries against the next
//! year when the first resolution lands in the past. See DESIGN.md for the
//! rationale behind keeping that asymmetry.

use chrono::{Datelike, Days, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Split a `DD.MM` label into its day and month components.
///
/// Accepts one- or two-digit components; rejects anything with extra
/// parts, signs, or trailing text.
pub fn split(label: &str) -> Option<(u32, u32)> {
    let mut parts = label.trim().split('.');
    let day = parse_component(parts.next()?)?;
    let month = parse_component(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((day, month))
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Resolve a label against one specific year, with no rollover.
///
/// This is the availability-listing rule. Returns `None` for labels that
/// do not form a real date in that year (including `29.02` off leap years).
pub fn resolve_in_year(label: &str, year: i32) -> Option<NaiveDate> {
    let (day, month) = split(label)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Resolve a label for reminder scheduling, rolling into the next year.
///
/// Resolves against `today`'s year first; when that lands more than one
/// day in the past, or does not exist in the current year, the next year
/// is tried.
pub fn resolve_for_event(label: &str, today: NaiveDate) -> Option<NaiveDate> {
    let year = today.year();
    match resolve_in_year(label, year) {
        Some(date) => {
            let cutoff = today.checked_sub_days(Days::new(1))?;
            if date < cutoff {
                resolve_in_year(label, year + 1)
            } else {
                Some(date)
            }
        }
        None => resolve_in_year(label, year + 1),
    }
}

/// Human-readable form of a label, e.g. `24.05` → `24 May`.
///
/// Falls back to the raw label when it does not split.
pub fn human(label: &str) -> String {
    match split(label) {
        Some((day, month)) if (1..=12).contains(&month) => {
            format!("{day} {}", MONTH_NAMES[(month - 1) as usize])
        }
        _ => label.to_string(),
    }
}
