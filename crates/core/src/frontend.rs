//! Chat intent dispatcher
//!
//! The conversational front end delivers user intents and displays the
//! replies this dispatcher returns; the transport itself (webhook
//! parsing, message sending) lives outside the core. Per-user session
//! state holds the availability view live when a page was rendered, so a
//! tap on an old keyboard is validated against what the user actually
//! saw.

use std::sync::Arc;

use bookslot_domain::constants::FALLBACK_SCHEDULE_TITLE;
use bookslot_domain::{date_label, BookingOutcome, CancellationOutcome, Occupant};
use dashmap::DashMap;
use tracing::error;

use crate::availability::AvailabilityView;
use crate::booking::BookingService;
use crate::pagination::paginate;
use crate::view;
use crate::view::Reply;

/// A user action delivered by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    ShowAvailableDates,
    /// A tap on a date button; the payload is the raw date label.
    SelectDate(String),
    CancelBooking(String),
    MyBookings,
    /// Navigate to a page of the availability list.
    Paginate(usize),
    Noop,
}

impl Intent {
    /// Map an inline-keyboard callback key to an intent.
    ///
    /// Unknown keys become `Noop` rather than errors; old keyboards may
    /// outlive a deployment.
    pub fn from_callback_data(data: &str) -> Self {
        match data {
            view::CB_SHOW_DATES => Self::ShowAvailableDates,
            view::CB_MY_BOOKINGS => Self::MyBookings,
            view::CB_NOOP => Self::Noop,
            _ => {
                if let Some(page) = data
                    .strip_prefix(view::CB_NAV_PREV_PREFIX)
                    .or_else(|| data.strip_prefix(view::CB_NAV_NEXT_PREFIX))
                {
                    return page.parse().map_or(Self::Noop, Self::Paginate);
                }
                if let Some(label) = data.strip_prefix(view::CB_CANCEL_PREFIX) {
                    return Self::CancelBooking(label.to_string());
                }
                if date_label::split(data).is_some() {
                    return Self::SelectDate(data.to_string());
                }
                Self::Noop
            }
        }
    }

    /// Map a chat command to an intent.
    pub fn from_command(text: &str) -> Option<Self> {
        match text.trim() {
            "/start" => Some(Self::Start),
            "/my_events" => Some(Self::MyBookings),
            _ => None,
        }
    }
}

/// Dispatches intents to the booking engine and renders replies.
pub struct ChatFrontend {
    booking: Arc<BookingService>,
    page_size: usize,
    sessions: DashMap<i64, AvailabilityView>,
}

impl ChatFrontend {
    pub fn new(booking: Arc<BookingService>, page_size: usize) -> Self {
        Self { booking, page_size, sessions: DashMap::new() }
    }

    async fn title(&self) -> String {
        self.booking
            .schedule_title()
            .await
            .unwrap_or_else(|_| FALLBACK_SCHEDULE_TITLE.to_string())
    }

    /// Handle one intent for one user and produce the reply to display.
    pub async fn handle(&self, owner: &Occupant, intent: Intent) -> Reply {
        match intent {
            Intent::Start => view::welcome(&self.title().await),
            Intent::ShowAvailableDates => self.show_dates(owner).await,
            Intent::Paginate(page) => self.navigate(owner, page).await,
            Intent::SelectDate(label) => self.select_date(owner, &label).await,
            Intent::CancelBooking(label) => self.cancel(owner, &label).await,
            Intent::MyBookings => self.my_bookings(owner).await,
            Intent::Noop => Reply::empty(),
        }
    }

    async fn show_dates(&self, owner: &Occupant) -> Reply {
        match self.booking.available_dates().await {
            Ok(available) => {
                let reply = if available.is_empty() {
                    view::no_dates(&self.title().await)
                } else {
                    let page = paginate(available.entries(), self.page_size, 0);
                    view::dates_page(&self.title().await, &page)
                };
                self.sessions.insert(owner.owner_id, available);
                reply
            }
            Err(err) => {
                error!(error = %err, owner_id = owner.owner_id, "failed to list availability");
                view::store_error()
            }
        }
    }

    async fn navigate(&self, owner: &Occupant, page: usize) -> Reply {
        let Some(available) = self.sessions.get(&owner.owner_id).map(|v| v.value().clone()) else {
            return view::stale_page();
        };
        let page = paginate(available.entries(), self.page_size, page);
        view::dates_page(&self.title().await, &page)
    }

    async fn select_date(&self, owner: &Occupant, label: &str) -> Reply {
        let seen = self
            .sessions
            .get(&owner.owner_id)
            .map(|v| v.value().clone())
            .unwrap_or_default();

        match self.booking.attempt_booking(label, owner, &seen).await {
            Ok(BookingOutcome::Booked(confirmation)) => {
                let location = self.booking.location().await;
                view::booked(&confirmation.date_label, &location)
            }
            Ok(BookingOutcome::AlreadyBooked { date_label, .. }) => {
                view::already_booked(&date_label)
            }
            Ok(BookingOutcome::DateFull { .. }) => view::date_full(),
            Ok(BookingOutcome::StaleSelection { .. }) => view::stale_selection(),
            Err(err) => {
                error!(error = %err, owner_id = owner.owner_id, date = %label, "booking failed");
                view::store_error()
            }
        }
    }

    async fn cancel(&self, owner: &Occupant, label: &str) -> Reply {
        match self.booking.attempt_cancellation(label, owner).await {
            Ok(CancellationOutcome::Cancelled { date_label, .. }) => view::cancelled(&date_label),
            Ok(CancellationOutcome::NotFound { .. }) => view::cancel_not_found(),
            Err(err) => {
                error!(error = %err, owner_id = owner.owner_id, date = %label, "cancellation failed");
                view::store_error()
            }
        }
    }

    async fn my_bookings(&self, owner: &Occupant) -> Reply {
        match self.booking.list_bookings_for(owner).await {
            Ok(records) if records.is_empty() => view::no_bookings(),
            Ok(records) => view::my_bookings(&records),
            Err(err) => {
                error!(error = %err, owner_id = owner.owner_id, "failed to list bookings");
                view::store_error()
            }
        }
    }
}
