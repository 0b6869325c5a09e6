use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use bookwell_core::models::{
    availability::AvailabilityWindow,
    booking::{BookingRequest, BookingStatus},
};
use bookwell_db::models::{DbAvailabilityWindow, DbBookingRequest, convert_all};

fn window_row(day: i32, start: &str, end: &str) -> DbAvailabilityWindow {
    DbAvailabilityWindow {
        id: Uuid::new_v4(),
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn booking_row(status: &str, time: &str) -> DbBookingRequest {
    DbBookingRequest {
        id: Uuid::new_v4(),
        client_name: "Ada".to_string(),
        client_email: "ada@example.com".to_string(),
        client_phone: None,
        requested_date: NaiveDate::from_ymd_opt(2030, 3, 4).unwrap(),
        requested_time: time.to_string(),
        message: None,
        status: status.to_string(),
        admin_notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_window_row_converts() {
    let window = AvailabilityWindow::try_from(window_row(1, "09:00", "12:00")).unwrap();
    assert_eq!(window.day_of_week, 1);
    assert_eq!(window.start_time.to_string(), "09:00");
    assert_eq!(window.end_time.to_string(), "12:00");
}

#[test]
fn test_corrupt_window_rows_are_rejected() {
    assert!(AvailabilityWindow::try_from(window_row(7, "09:00", "12:00")).is_err());
    assert!(AvailabilityWindow::try_from(window_row(-1, "09:00", "12:00")).is_err());
    assert!(AvailabilityWindow::try_from(window_row(1, "9:00", "12:00")).is_err());
}

#[test]
fn test_booking_row_converts() {
    let booking = BookingRequest::try_from(booking_row("confirmed", "10:30")).unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.requested_time.to_string(), "10:30");
}

#[test]
fn test_unknown_status_is_rejected() {
    let err = BookingRequest::try_from(booking_row("archived", "10:30")).unwrap_err();
    assert!(err.to_string().contains("archived"));
}

#[test]
fn test_convert_all_fails_on_first_bad_row() {
    let rows = vec![booking_row("pending", "10:00"), booking_row("pending", "25:00")];
    let converted: eyre::Result<Vec<BookingRequest>> = convert_all(rows);
    assert!(converted.is_err());
}
