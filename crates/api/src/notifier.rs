//! Outbound notifications about bookings and contact messages.
//!
//! Delivery is behind the [`Notifier`] trait. The shipped [`LogNotifier`]
//! writes each message as a structured tracing event instead of sending mail.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;

use bookwell_core::{
    models::{booking::BookingRequest, contact::ContactMessage},
    time::WallTime,
};

/// Sent to the practice when a client submits a booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingNotification {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub requested_date: NaiveDate,
    pub requested_time: WallTime,
    pub message: Option<String>,
}

/// Sent to the client when an admin confirms or declines their request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientNotice {
    pub client_name: String,
    pub client_email: String,
    pub requested_date: NaiveDate,
    pub requested_time: WallTime,
}

impl From<&BookingRequest> for BookingNotification {
    fn from(booking: &BookingRequest) -> Self {
        Self {
            client_name: booking.client_name.clone(),
            client_email: booking.client_email.clone(),
            client_phone: booking.client_phone.clone(),
            requested_date: booking.requested_date,
            requested_time: booking.requested_time,
            message: booking.message.clone(),
        }
    }
}

impl From<&BookingRequest> for ClientNotice {
    fn from(booking: &BookingRequest) -> Self {
        Self {
            client_name: booking.client_name.clone(),
            client_email: booking.client_email.clone(),
            requested_date: booking.requested_date,
            requested_time: booking.requested_time,
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_booking_notification(&self, notification: BookingNotification) -> Result<()>;

    async fn send_booking_confirmation(&self, notice: ClientNotice) -> Result<()>;

    async fn send_booking_declination(&self, notice: ClientNotice) -> Result<()>;

    async fn send_contact_notification(&self, message: ContactMessage) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_booking_notification(&self, n: BookingNotification) -> Result<()> {
        tracing::info!(
            client_name = %n.client_name,
            client_email = %n.client_email,
            client_phone = n.client_phone.as_deref().unwrap_or("Not provided"),
            requested_date = %n.requested_date,
            requested_time = %n.requested_time,
            message = n.message.as_deref().unwrap_or(""),
            "New booking request"
        );
        Ok(())
    }

    async fn send_booking_confirmation(&self, notice: ClientNotice) -> Result<()> {
        tracing::info!(
            to = %notice.client_email,
            client_name = %notice.client_name,
            requested_date = %notice.requested_date,
            requested_time = %notice.requested_time,
            "Booking confirmed"
        );
        Ok(())
    }

    async fn send_booking_declination(&self, notice: ClientNotice) -> Result<()> {
        tracing::info!(
            to = %notice.client_email,
            client_name = %notice.client_name,
            requested_date = %notice.requested_date,
            requested_time = %notice.requested_time,
            "Booking declined"
        );
        Ok(())
    }

    async fn send_contact_notification(&self, m: ContactMessage) -> Result<()> {
        tracing::info!(
            name = %m.name,
            email = %m.email,
            phone = m.phone.as_deref().unwrap_or("Not provided"),
            message = %m.message,
            "Contact form submission"
        );
        Ok(())
    }
}
