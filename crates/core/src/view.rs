//! Reply texts and inline keyboards
//!
//! Everything a conversational front end shows is built here and returned
//! as plain data; transports only translate [`Reply`] into their own
//! markup. Texts use the chat platform's HTML subset for emphasis.

use bookslot_domain::{date_label, BookingRecord, LocationInfo};
use serde::Serialize;

use crate::pagination::DatePage;

/// Callback key that re-renders the availability list.
pub const CB_SHOW_DATES: &str = "show_available_dates";
/// Callback key that lists the user's bookings.
pub const CB_MY_BOOKINGS: &str = "my_events";
/// Callback key for inert buttons (the page indicator).
pub const CB_NOOP: &str = "noop";
/// Prefix for backward navigation, followed by the target page.
pub const CB_NAV_PREV_PREFIX: &str = "nav_prev:";
/// Prefix for forward navigation, followed by the target page.
pub const CB_NAV_NEXT_PREFIX: &str = "nav_next:";
/// Prefix for cancelling a booking, followed by the date label.
pub const CB_CANCEL_PREFIX: &str = "cancel:";

/// What pressing a button does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ButtonAction {
    /// Send a callback key back to the dispatcher.
    Callback(String),
    /// Open an external link.
    Url(String),
}

/// One inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    fn callback(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self { label: label.into(), action: ButtonAction::Callback(key.into()) }
    }

    fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self { label: label.into(), action: ButtonAction::Url(url.into()) }
    }
}

/// Text plus inline keyboard rows returned by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Reply {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
}

impl Reply {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.keyboard.is_empty()
    }
}

fn slots_caption(count: usize) -> String {
    if count == 1 {
        "1 slot".to_string()
    } else {
        format!("{count} slots")
    }
}

fn show_dates_row() -> Vec<Button> {
    vec![Button::callback("🗓️ Show available dates", CB_SHOW_DATES)]
}

fn my_bookings_row() -> Vec<Button> {
    vec![Button::callback("🗓️ My bookings", CB_MY_BOOKINGS)]
}

/// Greeting with a single button titled after the spreadsheet.
pub fn welcome(title: &str) -> Reply {
    Reply {
        text: "Welcome! Tap the button to find open dates.".to_string(),
        keyboard: vec![vec![Button::callback(title, CB_SHOW_DATES)]],
    }
}

/// One availability page: two date buttons per row, then navigation,
/// then the my-bookings row. Every date button's callback key is the raw
/// date label — the stable key bookings are resolved against.
pub fn dates_page(title: &str, page: &DatePage) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = Vec::new();

    for pair in page.entries.chunks(2) {
        keyboard.push(
            pair.iter()
                .map(|entry| {
                    let label = format!(
                        "{} ({})",
                        date_label::human(&entry.date_label),
                        slots_caption(entry.free_count)
                    );
                    Button::callback(label, entry.date_label.clone())
                })
                .collect(),
        );
    }

    let mut nav = Vec::new();
    if page.has_previous() {
        nav.push(Button::callback("⬅️", format!("{CB_NAV_PREV_PREFIX}{}", page.page - 1)));
    }
    if page.page_count > 1 {
        nav.push(Button::callback(format!("{}/{}", page.page + 1, page.page_count), CB_NOOP));
    }
    if page.has_next() {
        nav.push(Button::callback("➡️", format!("{CB_NAV_NEXT_PREFIX}{}", page.page + 1)));
    }
    if !nav.is_empty() {
        keyboard.push(nav);
    }

    keyboard.push(my_bookings_row());

    Reply { text: format!("<b>{title}</b>\nPlease choose a date:"), keyboard }
}

pub fn no_dates(title: &str) -> Reply {
    Reply { text: format!("<b>{title}</b>\nNo open dates right now."), keyboard: vec![my_bookings_row()] }
}

pub fn store_error() -> Reply {
    Reply {
        text: "Could not reach the schedule. Please try again.".to_string(),
        keyboard: Vec::new(),
    }
}

/// Booking confirmation with the venue address block.
pub fn booked(label: &str, location: &LocationInfo) -> Reply {
    let mut keyboard = Vec::new();
    if !location.primary_map_link.is_empty() {
        keyboard.push(vec![Button::url("🗺️ Map", location.primary_map_link.clone())]);
    }
    if !location.secondary_map_link.is_empty() {
        keyboard.push(vec![Button::url("📍 Alternate map", location.secondary_map_link.clone())]);
    }
    keyboard.push(my_bookings_row());

    Reply {
        text: format!(
            "Great! You are booked for <b>{}</b>! ✅\n\nAddress: <b>{}</b>",
            date_label::human(label),
            location.address
        ),
        keyboard,
    }
}

pub fn already_booked(label: &str) -> Reply {
    Reply {
        text: format!("You are already booked for <b>{}</b>! ✅", date_label::human(label)),
        keyboard: vec![my_bookings_row()],
    }
}

pub fn date_full() -> Reply {
    Reply {
        text: "Sorry, that date has just filled up.".to_string(),
        keyboard: vec![show_dates_row()],
    }
}

/// Shown when a tapped date is not on the availability view it was
/// rendered from.
pub fn stale_selection() -> Reply {
    Reply { text: "That date is unavailable.".to_string(), keyboard: vec![show_dates_row()] }
}

/// Shown when navigating without a live availability session.
pub fn stale_page() -> Reply {
    Reply {
        text: "The list is out of date, refresh it.".to_string(),
        keyboard: vec![show_dates_row()],
    }
}

/// Active bookings, one cancel button per claim.
pub fn my_bookings(records: &[BookingRecord]) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = records
        .iter()
        .map(|record| {
            vec![Button::callback(
                format!("❌ Cancel {}", date_label::human(&record.date_label)),
                format!("{CB_CANCEL_PREFIX}{}", record.date_label),
            )]
        })
        .collect();
    keyboard.push(show_dates_row());

    Reply {
        text: "Your active bookings:\nTap a date to cancel it.".to_string(),
        keyboard,
    }
}

pub fn no_bookings() -> Reply {
    Reply { text: "You have no active bookings.".to_string(), keyboard: vec![show_dates_row()] }
}

pub fn cancelled(label: &str) -> Reply {
    Reply {
        text: format!("Your booking for <b>{}</b> was cancelled. ✅", date_label::human(label)),
        keyboard: vec![show_dates_row()],
    }
}

pub fn cancel_not_found() -> Reply {
    Reply {
        text: "Could not find that booking to cancel.".to_string(),
        keyboard: vec![show_dates_row()],
    }
}
