use std::error::Error;
use bookwell_core::errors::{ScheduleError, ScheduleResult};

#[test]
fn test_schedule_error_display() {
    let not_found = ScheduleError::NotFound("Booking request not found".to_string());
    let validation = ScheduleError::Validation("Start time must be before end time".to_string());
    let conflict = ScheduleError::Conflict("Booking is already confirmed".to_string());
    let rate_limited = ScheduleError::RateLimited("Too many requests".to_string());
    let authentication = ScheduleError::Authentication("Invalid admin token".to_string());
    let database = ScheduleError::Database(eyre::eyre!("Database connection failed"));
    let notification = ScheduleError::Notification(eyre::eyre!("mail relay down"));
    let internal = ScheduleError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Booking request not found"
    );
    assert_eq!(
        validation.to_string(),
        "Validation error: Start time must be before end time"
    );
    assert_eq!(conflict.to_string(), "Conflict: Booking is already confirmed");
    assert_eq!(rate_limited.to_string(), "Rate limit exceeded: Too many requests");
    assert_eq!(
        authentication.to_string(),
        "Authentication error: Invalid admin token"
    );
    assert!(database.to_string().contains("Database error:"));
    assert!(notification.to_string().contains("mail relay down"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_public_message_strips_prefix() {
    let err = ScheduleError::Validation("Name is required. Email is required".to_string());
    assert_eq!(err.public_message(), "Name is required. Email is required");

    let err = ScheduleError::NotFound("Availability window not found".to_string());
    assert_eq!(err.public_message(), "Availability window not found");
}

#[test]
fn test_public_message_hides_infrastructure_detail() {
    let err = ScheduleError::Database(eyre::eyre!("password authentication failed for user"));
    let message = err.public_message();

    assert!(!message.contains("password"));
    assert!(message.starts_with("An error occurred"));
}

#[test]
fn test_error_source() {
    let io_error = std::io::Error::other("IO error");
    let schedule_error = ScheduleError::Internal(Box::new(io_error));

    assert!(schedule_error.source().is_some());
}

#[test]
fn test_schedule_result() {
    let result: ScheduleResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: ScheduleResult<i32> = Err(ScheduleError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    let schedule_error: ScheduleError = eyre::eyre!("pool timed out").into();

    assert!(matches!(schedule_error, ScheduleError::Database(_)));
    assert!(schedule_error.to_string().contains("pool timed out"));
}
