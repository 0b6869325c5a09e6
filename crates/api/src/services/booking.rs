//! Booking intake and admin triage.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use bookwell_core::{
    booking::{BookingTransition, TransitionOutcome, new_booking_request, parse_status_filter, sort_for_triage},
    errors::{ScheduleError, ScheduleResult},
    models::booking::{BookingAction, BookingForm, BookingRequest, UpdateBookingRequest},
    rate_limit::RateLimiter,
    validation::validate_booking_form,
};
use bookwell_db::BookingStore;

use crate::notifier::{BookingNotification, ClientNotice, Notifier};

pub const BOOKING_NOT_FOUND: &str = "Booking request not found";
pub const BOOKING_SUBMITTED: &str =
    "Your request has been submitted. We'll confirm your appointment within 24 hours.";
pub const INVALID_ACTION: &str = "Invalid action. Must be: confirm, decline, or update_notes";
pub const NOTES_NOT_STRING: &str = "adminNotes must be a string";
pub const SLOT_TAKEN: &str = "Another booking is already confirmed for this time slot";

pub fn rate_limit_message(limit: usize) -> String {
    format!(
        "You have reached the maximum number of booking requests ({limit}) for today. \
         Please try again tomorrow or call us directly."
    )
}

fn not_found() -> ScheduleError {
    ScheduleError::NotFound(BOOKING_NOT_FOUND.to_string())
}

/// Public intake: validate, rate-limit, store as `pending`, notify the practice.
///
/// Nothing is counted against the rate limit when validation or the store
/// insert fails.
pub async fn submit_booking(
    store: &dyn BookingStore,
    notifier: &dyn Notifier,
    limiter: &RateLimiter,
    form: &BookingForm,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ScheduleResult<BookingRequest> {
    let new_booking = validate_booking_form(form, today)?;

    if !limiter.check_at(&new_booking.client_email, now) {
        return Err(ScheduleError::RateLimited(rate_limit_message(
            limiter.max_requests(),
        )));
    }

    let email = new_booking.client_email.clone();
    let booking = match store.insert_booking(&new_booking_request(new_booking, now)).await {
        Ok(booking) => booking,
        Err(e) => {
            limiter.release_at(&email, now);
            return Err(e.into());
        }
    };
    tracing::info!(
        id = %booking.id,
        requested_date = %booking.requested_date,
        requested_time = %booking.requested_time,
        "Booking request submitted"
    );

    notifier
        .send_booking_notification(BookingNotification::from(&booking))
        .await
        .map_err(ScheduleError::Notification)?;

    Ok(booking)
}

/// Pending requests first, then newest first. `None` or `"all"` lists every status.
pub async fn list_bookings(
    store: &dyn BookingStore,
    status: Option<&str>,
) -> ScheduleResult<Vec<BookingRequest>> {
    let filter = parse_status_filter(status).map_err(ScheduleError::Validation)?;
    let mut bookings = store.list_bookings(filter).await?;
    sort_for_triage(&mut bookings);
    Ok(bookings)
}

pub async fn get_booking(store: &dyn BookingStore, id: Uuid) -> ScheduleResult<BookingRequest> {
    store.get_booking(id).await?.ok_or_else(not_found)
}

async fn apply_transition(
    store: &dyn BookingStore,
    id: Uuid,
    transition: BookingTransition,
    now: DateTime<Utc>,
) -> ScheduleResult<BookingRequest> {
    match store.transition(id, transition, now).await? {
        TransitionOutcome::Applied(booking) => {
            tracing::info!(id = %booking.id, status = %booking.status, "Booking status changed");
            Ok(booking)
        }
        TransitionOutcome::NotFound => Err(not_found()),
        TransitionOutcome::InvalidState(status) => Err(ScheduleError::Conflict(format!(
            "Cannot {} a booking that is {}",
            transition.verb(),
            status
        ))),
        TransitionOutcome::SlotTaken => Err(ScheduleError::Conflict(SLOT_TAKEN.to_string())),
    }
}

/// `pending → confirmed`, then tells the client.
///
/// A failed notification is reported to the caller; the confirmation stands.
pub async fn confirm_booking(
    store: &dyn BookingStore,
    notifier: &dyn Notifier,
    id: Uuid,
    now: DateTime<Utc>,
) -> ScheduleResult<BookingRequest> {
    let booking = apply_transition(store, id, BookingTransition::Confirm, now).await?;
    notifier
        .send_booking_confirmation(ClientNotice::from(&booking))
        .await
        .map_err(ScheduleError::Notification)?;
    Ok(booking)
}

/// `pending → declined`, then tells the client.
pub async fn decline_booking(
    store: &dyn BookingStore,
    notifier: &dyn Notifier,
    id: Uuid,
    now: DateTime<Utc>,
) -> ScheduleResult<BookingRequest> {
    let booking = apply_transition(store, id, BookingTransition::Decline, now).await?;
    notifier
        .send_booking_declination(ClientNotice::from(&booking))
        .await
        .map_err(ScheduleError::Notification)?;
    Ok(booking)
}

/// Any non-cancelled request becomes `cancelled`. The client is not notified.
pub async fn cancel_booking(
    store: &dyn BookingStore,
    id: Uuid,
    now: DateTime<Utc>,
) -> ScheduleResult<BookingRequest> {
    apply_transition(store, id, BookingTransition::Cancel, now).await
}

pub async fn update_booking_notes(
    store: &dyn BookingStore,
    id: Uuid,
    notes: &str,
    now: DateTime<Utc>,
) -> ScheduleResult<BookingRequest> {
    store
        .update_notes(id, notes, now)
        .await?
        .ok_or_else(not_found)
}

/// Dispatches an admin `PUT` body to the matching operation.
pub async fn apply_admin_update(
    store: &dyn BookingStore,
    notifier: &dyn Notifier,
    id: Uuid,
    request: &UpdateBookingRequest,
    now: DateTime<Utc>,
) -> ScheduleResult<BookingRequest> {
    let action = request
        .action
        .as_deref()
        .and_then(|a| a.parse::<BookingAction>().ok())
        .ok_or_else(|| ScheduleError::Validation(INVALID_ACTION.to_string()))?;

    match action {
        BookingAction::Confirm => confirm_booking(store, notifier, id, now).await,
        BookingAction::Decline => decline_booking(store, notifier, id, now).await,
        BookingAction::UpdateNotes => match &request.admin_notes {
            Some(Value::String(notes)) => update_booking_notes(store, id, notes, now).await,
            _ => Err(ScheduleError::Validation(NOTES_NOT_STRING.to_string())),
        },
    }
}
