//! # Booking request lifecycle
//!
//! | transition | from                          | to          |
//! |------------|-------------------------------|-------------|
//! | confirm    | pending                       | confirmed   |
//! | decline    | pending                       | declined    |
//! | cancel     | pending, confirmed, declined  | cancelled   |
//!
//! Every request starts `pending`. Confirmation is exclusive per slot: a
//! store applies [`BookingTransition::Confirm`] only while no other booking
//! holds the same date and time in `confirmed`.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::booking::{BookingRequest, BookingStatus, NewBooking};

/// An admin-triggered status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingTransition {
    Confirm,
    Decline,
    Cancel,
}

impl BookingTransition {
    pub fn target(self) -> BookingStatus {
        match self {
            BookingTransition::Confirm => BookingStatus::Confirmed,
            BookingTransition::Decline => BookingStatus::Declined,
            BookingTransition::Cancel => BookingStatus::Cancelled,
        }
    }

    /// States from which this transition may be applied.
    pub fn allowed_from(self) -> &'static [BookingStatus] {
        match self {
            BookingTransition::Confirm | BookingTransition::Decline => &[BookingStatus::Pending],
            BookingTransition::Cancel => &[
                BookingStatus::Pending,
                BookingStatus::Confirmed,
                BookingStatus::Declined,
            ],
        }
    }

    pub fn is_allowed_from(self, status: BookingStatus) -> bool {
        self.allowed_from().contains(&status)
    }

    pub fn verb(self) -> &'static str {
        match self {
            BookingTransition::Confirm => "confirm",
            BookingTransition::Decline => "decline",
            BookingTransition::Cancel => "cancel",
        }
    }
}

/// Result of asking a store to apply a transition atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied(BookingRequest),
    NotFound,
    /// The booking exists but its current status does not allow the change.
    InvalidState(BookingStatus),
    /// Another booking is already confirmed for the same date and time.
    SlotTaken,
}

/// Builds a fresh `pending` record.
pub fn new_booking_request(input: NewBooking, now: DateTime<Utc>) -> BookingRequest {
    BookingRequest {
        id: Uuid::new_v4(),
        client_name: input.client_name,
        client_email: input.client_email,
        client_phone: input.client_phone,
        requested_date: input.requested_date,
        requested_time: input.requested_time,
        message: input.message,
        status: BookingStatus::Pending,
        admin_notes: None,
        created_at: now,
        updated_at: now,
    }
}

/// Triage order: pending requests first, then everything newest first.
pub fn triage_order(a: &BookingRequest, b: &BookingRequest) -> Ordering {
    let a_pending = a.status == BookingStatus::Pending;
    let b_pending = b.status == BookingStatus::Pending;
    b_pending
        .cmp(&a_pending)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

pub fn sort_for_triage(bookings: &mut [BookingRequest]) {
    bookings.sort_by(triage_order);
}

/// Parses the admin list filter; `None` and `"all"` mean no filter.
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<BookingStatus>, String> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}
