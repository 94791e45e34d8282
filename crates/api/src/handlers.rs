//! REST API request handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use bookslot_core::{BookingService, MessageSink};
use bookslot_domain::{date_label, BookslotError, Occupant, SlotCell, SlotClaimOutcome, SlotIndex};
use tracing::{error, warn};

/// Application state shared across handlers.
pub struct ApiState {
    /// Booking engine for all schedule operations.
    pub booking: Arc<BookingService>,
    /// Best-effort booking notifications to the chat platform.
    pub notifier: Arc<dyn MessageSink>,
}

impl ApiState {
    /// Create new API state.
    pub fn new(booking: Arc<BookingService>, notifier: Arc<dyn MessageSink>) -> Self {
        Self { booking, notifier }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// One slot cell in the schedule response.
#[derive(Debug, Clone, Serialize)]
pub struct SlotDto {
    pub index: u8,
    /// `available` or `booked`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupant: Option<String>,
}

/// One date row in the schedule response.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRowDto {
    pub date_label: String,
    pub free_count: usize,
    pub slots: Vec<SlotDto>,
}

/// Full schedule response.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResponse {
    pub title: String,
    pub rows: Vec<ScheduleRowDto>,
}

/// Booking request.
#[derive(Debug, Clone, Deserialize)]
pub struct BookRequest {
    pub owner_id: i64,
    #[serde(default)]
    pub owner_handle: Option<String>,
    pub date_label: String,
    pub slot_index: u8,
}

/// My-bookings query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct MyBookingsQuery {
    pub owner_id: i64,
    #[serde(default)]
    pub owner_handle: Option<String>,
}

/// One booking in the my-bookings response.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDto {
    pub date_label: String,
    pub slot_index: u8,
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /health` - liveness probe.
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/schedule` - the full schedule, row by row.
pub async fn schedule_handler(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let snapshot = match state.booking.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(err) => return store_error(&err),
    };
    let title = state
        .booking
        .schedule_title()
        .await
        .unwrap_or_else(|_| "Schedule".to_string());

    let rows = snapshot
        .rows
        .iter()
        .map(|row| ScheduleRowDto {
            date_label: row.date_label.clone(),
            free_count: row.free_count(),
            slots: SlotIndex::ALL
                .into_iter()
                .map(|index| match row.slot(index) {
                    SlotCell::Empty => {
                        SlotDto { index: index.get(), status: "available", occupant: None }
                    }
                    SlotCell::Claimed(raw) => SlotDto {
                        index: index.get(),
                        status: "booked",
                        occupant: Some(raw.clone()),
                    },
                })
                .collect(),
        })
        .collect();

    (StatusCode::OK, Json(ScheduleResponse { title, rows })).into_response()
}

/// `POST /api/book` - claim one specific slot.
pub async fn book_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<BookRequest>,
) -> impl IntoResponse {
    let Some(slot_index) = SlotIndex::new(request.slot_index) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid slot index; expected 1..=4" })),
        )
            .into_response();
    };
    let owner = Occupant::new(request.owner_id, request.owner_handle.clone());

    match state.booking.claim_slot(&request.date_label, slot_index, &owner).await {
        Ok(SlotClaimOutcome::Claimed(confirmation)) => {
            let notification = format!(
                "✅ You are booked for <b>{}</b> (slot {})!",
                date_label::human(&confirmation.date_label),
                confirmation.slot_index
            );
            if let Err(err) = state.notifier.deliver(owner.owner_id, &notification).await {
                // Notification is best-effort; the claim already stands.
                warn!(error = %err, owner_id = owner.owner_id, "booking notification failed");
            }
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Booked",
                    "date_label": confirmation.date_label,
                    "slot_index": confirmation.slot_index.get(),
                })),
            )
                .into_response()
        }
        Ok(SlotClaimOutcome::SlotTaken { .. }) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Slot is already booked" })),
        )
            .into_response(),
        Ok(SlotClaimOutcome::AlreadyBooked { slot_index, .. }) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "Owner already holds a slot on this date",
                "slot_index": slot_index.get(),
            })),
        )
            .into_response(),
        Ok(SlotClaimOutcome::DateNotFound { date_label }) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Date '{date_label}' not found") })),
        )
            .into_response(),
        Err(err) => store_error(&err),
    }
}

/// `GET /api/my-bookings?owner_id=` - the owner's active claims.
pub async fn my_bookings_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<MyBookingsQuery>,
) -> impl IntoResponse {
    let owner = Occupant::new(query.owner_id, query.owner_handle.clone());
    match state.booking.list_bookings_for(&owner).await {
        Ok(records) => {
            let bookings: Vec<BookingDto> = records
                .into_iter()
                .map(|r| BookingDto { date_label: r.date_label, slot_index: r.slot_index.get() })
                .collect();
            (StatusCode::OK, Json(json!({ "bookings": bookings }))).into_response()
        }
        Err(err) => store_error(&err),
    }
}

fn store_error(err: &BookslotError) -> axum::response::Response {
    error!(error = %err, "schedule store operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Schedule store unavailable" })),
    )
        .into_response()
}
