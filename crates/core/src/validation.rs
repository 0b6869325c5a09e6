//! Server-side validation for the public booking and contact forms.
//!
//! Every failed check contributes one sentence; the sentences are joined with
//! `". "` into a single [`ScheduleError::Validation`] message.

use chrono::NaiveDate;

use crate::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        booking::{BookingForm, NewBooking},
        contact::{ContactForm, ContactMessage},
    },
    time::{WallTime, parse_calendar_date},
};

/// Simple `local@domain.tld` check: no whitespace, exactly one `@`, and a dot
/// inside the domain with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn optional(value: &Option<String>) -> Option<String> {
    trimmed(value).map(str::to_string)
}

fn join(errors: Vec<&str>) -> ScheduleError {
    ScheduleError::Validation(errors.join(". "))
}

/// Validates a booking form against `today` (the local calendar date).
pub fn validate_booking_form(form: &BookingForm, today: NaiveDate) -> ScheduleResult<NewBooking> {
    let mut errors = Vec::new();

    let name = trimmed(&form.client_name);
    if name.is_none() {
        errors.push("Name is required");
    }

    let email = trimmed(&form.client_email);
    match email {
        None => errors.push("Email is required"),
        Some(e) if !is_valid_email(e) => errors.push("Email is invalid"),
        Some(_) => {}
    }

    let date = form.requested_date.as_deref().and_then(parse_calendar_date);
    if date.is_none() {
        errors.push("Valid date is required");
    }

    let time = form
        .requested_time
        .as_deref()
        .and_then(|t| WallTime::parse(t).ok());
    if time.is_none() {
        errors.push("Valid time is required");
    }

    if date.is_some_and(|d| d < today) {
        errors.push("Cannot book appointments for past dates");
    }

    match (name, email, date, time) {
        (Some(name), Some(email), Some(requested_date), Some(requested_time)) if errors.is_empty() => {
            Ok(NewBooking {
                client_name: name.to_string(),
                client_email: email.to_string(),
                client_phone: optional(&form.client_phone),
                requested_date,
                requested_time,
                message: optional(&form.message),
            })
        }
        _ => Err(join(errors)),
    }
}

pub fn validate_contact_form(form: &ContactForm) -> ScheduleResult<ContactMessage> {
    let mut errors = Vec::new();

    let name = trimmed(&form.name);
    if name.is_none() {
        errors.push("Name is required");
    }

    let email = trimmed(&form.email);
    match email {
        None => errors.push("Email is required"),
        Some(e) if !is_valid_email(e) => errors.push("Email is invalid"),
        Some(_) => {}
    }

    let message = trimmed(&form.message);
    if message.is_none() {
        errors.push("Message is required");
    }

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            phone: optional(&form.phone),
            message: message.to_string(),
        }),
        _ => Err(join(errors)),
    }
}

/// Validates the `date` query of the slot lookup.
pub fn validate_slot_date(raw: Option<&str>, today: NaiveDate) -> ScheduleResult<NaiveDate> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ScheduleError::Validation("Date parameter is required".to_string()))?;
    let date = parse_calendar_date(raw).ok_or_else(|| {
        ScheduleError::Validation("Invalid date format. Expected YYYY-MM-DD".to_string())
    })?;
    if date < today {
        return Err(ScheduleError::Validation(
            "Cannot request slots for past dates".to_string(),
        ));
    }
    Ok(date)
}
