//! End-to-end booking flows over an in-memory store
//!
//! Exercises the availability → booking → cancellation cycle the way the
//! conversational front end drives it, including the idempotence and
//! conflict-advance rules.

mod support;

use std::sync::Arc;

use bookslot_core::{AvailabilityView, BookingService, ChatFrontend, Intent};
use bookslot_domain::{
    AvailabilityEntry, BookingOutcome, CancellationOutcome, SlotClaimOutcome, SlotIndex,
};
use chrono_tz::Europe::Moscow;
use support::{owner, FixedClock, InMemoryStore, RecordingReminders};

const SHEET: &[&[&str]] = &[
    &["Date", "Slot 1", "Slot 2", "Slot 3", "Slot 4", "Info"],
    &["24.05", "", "", "", "", "12 Garden Lane\nhttps://maps.example/abc"],
    &["25.05", "", "", "", ""],
];

struct Harness {
    store: Arc<InMemoryStore>,
    reminders: Arc<RecordingReminders>,
    service: Arc<BookingService>,
}

fn harness(rows: &[&[&str]]) -> Harness {
    let store = Arc::new(InMemoryStore::new(rows));
    let reminders = Arc::new(RecordingReminders::default());
    let clock = Arc::new(FixedClock::at(Moscow, 2025, 5, 24, 10));
    let service = Arc::new(BookingService::new(
        store.clone(),
        reminders.clone(),
        clock,
        Moscow,
    ));
    Harness { store, reminders, service }
}

#[tokio::test]
async fn booking_fills_slots_left_to_right_and_stays_idempotent() {
    let h = harness(SHEET);
    let alice = owner(555, Some("alice"));
    let bob = owner(777, None);

    let seen = h.service.available_dates().await.expect("availability");
    assert!(seen.contains("24.05"));
    assert_eq!(seen.entries()[0].free_count, 4);

    // Alice takes the first slot (column B).
    let outcome = h.service.attempt_booking("24.05", &alice, &seen).await.expect("booking");
    match outcome {
        BookingOutcome::Booked(c) => {
            assert_eq!(c.slot_index, SlotIndex::new(1).unwrap());
            assert_eq!(c.row_index, 2);
        }
        other => panic!("expected Booked, got {other:?}"),
    }
    assert!(h.store.cell(2, 2).contains("ID: 555"));
    assert_eq!(h.reminders.scheduled.lock().unwrap().as_slice(), &[(555, "24.05".to_string())]);

    // Booking the same date again is reported, not double-booked.
    let writes_before = h.store.writes();
    let outcome = h.service.attempt_booking("24.05", &alice, &seen).await.expect("booking");
    assert!(matches!(outcome, BookingOutcome::AlreadyBooked { ref date_label, .. } if date_label == "24.05"));
    assert_eq!(h.store.writes(), writes_before, "idempotent retry must not write");

    // Bob lands on the next slot (column C).
    let outcome = h.service.attempt_booking("24.05", &bob, &seen).await.expect("booking");
    assert!(matches!(
        outcome,
        BookingOutcome::Booked(ref c) if c.slot_index == SlotIndex::new(2).unwrap()
    ));
    assert!(h.store.cell(2, 3).contains("ID: 777"));

    // Cancelling Alice frees her slot only and cancels her reminders.
    let outcome = h.service.attempt_cancellation("24.05", &alice).await.expect("cancellation");
    assert!(matches!(outcome, CancellationOutcome::Cancelled { .. }));
    assert_eq!(h.store.cell(2, 2), "");
    assert!(h.store.cell(2, 3).contains("ID: 777"));
    assert_eq!(h.reminders.cancelled.lock().unwrap().as_slice(), &[(555, "24.05".to_string())]);
}

#[tokio::test]
async fn full_date_is_absent_from_availability_and_rejects_bookings() {
    let h = harness(&[
        &["Date"],
        &["24.05", "x", "x", "x", "x"],
    ]);
    let carol = owner(888, None);

    let available = h.service.available_dates().await.expect("availability");
    assert!(!available.contains("24.05"));

    // A stale page could still offer the date; the re-read catches it.
    let stale_view = AvailabilityView::new(vec![AvailabilityEntry {
        date_label: "24.05".to_string(),
        free_count: 1,
        row_index: 2,
    }]);
    let outcome = h.service.attempt_booking("24.05", &carol, &stale_view).await.expect("booking");
    assert!(matches!(outcome, BookingOutcome::DateFull { .. }));
}

#[tokio::test]
async fn selection_not_on_the_seen_view_is_stale() {
    let h = harness(SHEET);
    let outcome = h
        .service
        .attempt_booking("26.05", &owner(1, None), &AvailabilityView::default())
        .await
        .expect("booking");
    assert!(matches!(outcome, BookingOutcome::StaleSelection { .. }));
    assert_eq!(h.store.writes(), 0);
}

#[tokio::test]
async fn concurrently_stolen_cell_advances_to_the_next_slot() {
    let h = harness(SHEET);
    let seen = h.service.available_dates().await.expect("availability");

    // Another writer wins cell B2 between the snapshot read and the claim.
    *h.store.steal_cell.lock().unwrap() = Some((2, 2));

    let outcome = h
        .service
        .attempt_booking("24.05", &owner(555, None), &seen)
        .await
        .expect("booking");
    assert!(matches!(
        outcome,
        BookingOutcome::Booked(ref c) if c.slot_index == SlotIndex::new(2).unwrap()
    ));
    // The foreign claim was not overwritten.
    assert!(h.store.cell(2, 2).contains("999999"));
    assert!(h.store.cell(2, 3).contains("ID: 555"));
}

#[tokio::test]
async fn specific_slot_claims_for_the_http_surface() {
    let h = harness(SHEET);
    let dana = owner(321, Some("dana"));
    let slot3 = SlotIndex::new(3).unwrap();

    let outcome = h.service.claim_slot("24.05", slot3, &dana).await.expect("claim");
    assert!(matches!(outcome, SlotClaimOutcome::Claimed(ref c) if c.slot_index == slot3));

    // The same cell is now taken for everyone else.
    let outcome = h.service.claim_slot("24.05", slot3, &owner(9, None)).await.expect("claim");
    assert!(matches!(outcome, SlotClaimOutcome::SlotTaken { .. }));

    // Dana holding slot 3 cannot take another slot the same day.
    let outcome = h
        .service
        .claim_slot("24.05", SlotIndex::new(4).unwrap(), &dana)
        .await
        .expect("claim");
    assert!(matches!(outcome, SlotClaimOutcome::AlreadyBooked { slot_index, .. } if slot_index == slot3));

    let outcome = h.service.claim_slot("31.12", slot3, &dana).await.expect("claim");
    assert!(matches!(outcome, SlotClaimOutcome::DateNotFound { .. }));
}

#[tokio::test]
async fn listing_recognizes_canonical_and_legacy_markers() {
    let h = harness(&[
        &["Date"],
        &["24.05", "https://t.me/panda", "", "", ""],
        &["25.05", "", "(ID: 555)", "", ""],
        &["26.05", "(ID: 42)", "", "", ""],
    ]);
    let panda = owner(555, Some("panda"));

    let records = h.service.list_bookings_for(&panda).await.expect("listing");
    let dates: Vec<&str> = records.iter().map(|r| r.date_label.as_str()).collect();
    assert_eq!(dates, vec!["24.05", "25.05"]);
}

#[tokio::test]
async fn frontend_round_trip_from_dates_page_to_confirmation() {
    let h = harness(SHEET);
    let frontend = ChatFrontend::new(h.service.clone(), 6);
    let alice = owner(555, Some("alice"));

    let reply = frontend.handle(&alice, Intent::ShowAvailableDates).await;
    assert!(reply.text.contains("Panda Schedule"));
    let first_button = &reply.keyboard[0][0];
    assert_eq!(first_button.label, "24 May (4 slots)");

    let reply = frontend.handle(&alice, Intent::SelectDate("24.05".to_string())).await;
    assert!(reply.text.contains("You are booked"), "got: {}", reply.text);
    assert!(reply.text.contains("12 Garden Lane"));

    let reply = frontend.handle(&alice, Intent::MyBookings).await;
    assert!(reply.text.contains("Your active bookings"));

    let reply = frontend.handle(&alice, Intent::CancelBooking("24.05".to_string())).await;
    assert!(reply.text.contains("was cancelled"));
}

#[tokio::test]
async fn frontend_navigation_without_a_session_reports_a_stale_page() {
    let h = harness(SHEET);
    let frontend = ChatFrontend::new(h.service, 6);
    let reply = frontend.handle(&owner(1, None), Intent::Paginate(1)).await;
    assert!(reply.text.contains("out of date"));
}

#[tokio::test]
async fn store_outage_surfaces_as_a_try_again_reply() {
    let h = harness(SHEET);
    h.store.fail_reads.store(true, std::sync::atomic::Ordering::SeqCst);
    let frontend = ChatFrontend::new(h.service, 6);
    let reply = frontend.handle(&owner(1, None), Intent::ShowAvailableDates).await;
    assert!(reply.text.contains("try again"));
}
