use crate::models::DbBookingRequest;
use bookwell_core::{
    booking::{BookingTransition, TransitionOutcome},
    models::booking::{BookingRequest, BookingStatus},
};
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_booking_request(
    pool: &Pool<Postgres>,
    booking: &BookingRequest,
) -> Result<DbBookingRequest> {
    tracing::debug!(
        "Creating booking request: id={}, date={}, time={}",
        booking.id, booking.requested_date, booking.requested_time
    );

    let row = sqlx::query_as::<_, DbBookingRequest>(
        r#"
        INSERT INTO booking_requests (
            id, client_name, client_email, client_phone, requested_date, requested_time,
            message, status, admin_notes, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, client_name, client_email, client_phone, requested_date, requested_time,
                  message, status, admin_notes, created_at, updated_at
        "#,
    )
    .bind(booking.id)
    .bind(&booking.client_name)
    .bind(&booking.client_email)
    .bind(booking.client_phone.as_deref())
    .bind(booking.requested_date)
    .bind(booking.requested_time.to_string())
    .bind(booking.message.as_deref())
    .bind(booking.status.as_str())
    .bind(booking.admin_notes.as_deref())
    .bind(booking.created_at)
    .bind(booking.updated_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_booking_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbBookingRequest>> {
    let row = sqlx::query_as::<_, DbBookingRequest>(
        r#"
        SELECT id, client_name, client_email, client_phone, requested_date, requested_time,
               message, status, admin_notes, created_at, updated_at
        FROM booking_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Newest first; the pending-first triage order is applied by the caller.
pub async fn list_bookings(
    pool: &Pool<Postgres>,
    status: Option<BookingStatus>,
) -> Result<Vec<DbBookingRequest>> {
    let rows = sqlx::query_as::<_, DbBookingRequest>(
        r#"
        SELECT id, client_name, client_email, client_phone, requested_date, requested_time,
               message, status, admin_notes, created_at, updated_at
        FROM booking_requests
        WHERE ($1::TEXT IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_bookings_by_date(
    pool: &Pool<Postgres>,
    date: NaiveDate,
) -> Result<Vec<DbBookingRequest>> {
    let rows = sqlx::query_as::<_, DbBookingRequest>(
        r#"
        SELECT id, client_name, client_email, client_phone, requested_date, requested_time,
               message, status, admin_notes, created_at, updated_at
        FROM booking_requests
        WHERE requested_date = $1
        ORDER BY requested_time ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_booking_notes(
    pool: &Pool<Postgres>,
    id: Uuid,
    notes: &str,
    now: DateTime<Utc>,
) -> Result<Option<DbBookingRequest>> {
    let row = sqlx::query_as::<_, DbBookingRequest>(
        r#"
        UPDATE booking_requests
        SET admin_notes = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, client_name, client_email, client_phone, requested_date, requested_time,
                  message, status, admin_notes, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(notes)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Applies `transition` only if the row is still in one of its source states.
///
/// The status guard lives in the `WHERE` clause so two admins acting on the
/// same request cannot both succeed. A second confirmation for an already
/// confirmed slot trips the partial unique index and is reported as
/// [`TransitionOutcome::SlotTaken`].
pub async fn transition_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    transition: BookingTransition,
    now: DateTime<Utc>,
) -> Result<TransitionOutcome> {
    let allowed: Vec<String> = transition
        .allowed_from()
        .iter()
        .map(|s| s.as_str().to_string())
        .collect();

    let result = sqlx::query_as::<_, DbBookingRequest>(
        r#"
        UPDATE booking_requests
        SET status = $2, updated_at = $3
        WHERE id = $1 AND status = ANY($4)
        RETURNING id, client_name, client_email, client_phone, requested_date, requested_time,
                  message, status, admin_notes, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(transition.target().as_str())
    .bind(now)
    .bind(allowed)
    .fetch_optional(pool)
    .await;

    let row = match result {
        Ok(row) => row,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::debug!("Confirmation of {} blocked by an existing confirmed booking", id);
            return Ok(TransitionOutcome::SlotTaken);
        }
        Err(e) => return Err(e.into()),
    };

    match row {
        Some(row) => Ok(TransitionOutcome::Applied(row.try_into()?)),
        None => match get_booking_by_id(pool, id).await? {
            Some(existing) => {
                let current: BookingRequest = existing.try_into()?;
                Ok(TransitionOutcome::InvalidState(current.status))
            }
            None => Ok(TransitionOutcome::NotFound),
        },
    }
}
