//! # Booking Handlers
//!
//! Public intake and slot lookup, plus the admin triage endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use bookwell_core::models::{
    booking::{
        BookingForm, BookingListQuery, BookingListResponse, BookingRequest,
        BookingSubmittedResponse, BookingSummary, CancelBookingResponse, UpdateBookingRequest,
    },
    time_slot::{SlotQuery, SlotsResponse},
};
use bookwell_core::validation::validate_slot_date;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    handlers::local_today,
    middleware::error_handling::AppError,
    services::{
        booking::{self, BOOKING_SUBMITTED},
        scheduling,
    },
};

/// `GET /api/booking/slots?date=YYYY-MM-DD`
#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<SlotQuery>, QueryRejection>,
) -> Result<Json<SlotsResponse>, AppError> {
    let Query(query) = query?;
    let date = validate_slot_date(query.date.as_deref(), local_today())?;
    let slots = scheduling::available_slots(
        state.availability.as_ref(),
        state.bookings.as_ref(),
        date,
    )
    .await?;
    Ok(Json(SlotsResponse { slots }))
}

/// `POST /api/booking`
#[axum::debug_handler]
pub async fn submit_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookingForm>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingSubmittedResponse>), AppError> {
    let Json(form) = payload?;
    let booking = booking::submit_booking(
        state.bookings.as_ref(),
        state.notifier.as_ref(),
        &state.rate_limiter,
        &form,
        local_today(),
        Utc::now(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingSubmittedResponse {
            message: BOOKING_SUBMITTED.to_string(),
            booking: BookingSummary {
                id: booking.id,
                requested_date: booking.requested_date,
                requested_time: booking.requested_time,
            },
        }),
    ))
}

/// `GET /api/admin/bookings?status=`
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<BookingListQuery>, QueryRejection>,
) -> Result<Json<BookingListResponse>, AppError> {
    let Query(query) = query?;
    let bookings = booking::list_bookings(state.bookings.as_ref(), query.status.as_deref()).await?;
    Ok(Json(BookingListResponse { bookings }))
}

/// `GET /api/admin/bookings/:id`
#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BookingRequest>, AppError> {
    let Path(id) = id?;
    Ok(Json(booking::get_booking(state.bookings.as_ref(), id).await?))
}

/// `PUT /api/admin/bookings/:id` with `{ action, adminNotes? }`
#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> Result<Json<BookingRequest>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let updated = booking::apply_admin_update(
        state.bookings.as_ref(),
        state.notifier.as_ref(),
        id,
        &request,
        Utc::now(),
    )
    .await?;
    Ok(Json(updated))
}

/// `DELETE /api/admin/bookings/:id` cancels; the record is kept.
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<CancelBookingResponse>, AppError> {
    let Path(id) = id?;
    let booking = booking::cancel_booking(state.bookings.as_ref(), id, Utc::now()).await?;
    Ok(Json(CancelBookingResponse {
        success: true,
        booking,
    }))
}
