#![allow(dead_code)]

use std::{
    fmt::Display,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde_json::{Value, json};

use bookwell_api::{
    ApiState, app,
    notifier::{BookingNotification, ClientNotice, LogNotifier, Notifier},
};
use bookwell_core::models::contact::ContactMessage;
use bookwell_db::MemoryStore;

/// Notifier that remembers what it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.sent.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_booking_notification(&self, n: BookingNotification) -> eyre::Result<()> {
        self.record(format!("request:{}", n.client_email));
        Ok(())
    }

    async fn send_booking_confirmation(&self, n: ClientNotice) -> eyre::Result<()> {
        self.record(format!("confirmed:{}", n.client_email));
        Ok(())
    }

    async fn send_booking_declination(&self, n: ClientNotice) -> eyre::Result<()> {
        self.record(format!("declined:{}", n.client_email));
        Ok(())
    }

    async fn send_contact_notification(&self, m: ContactMessage) -> eyre::Result<()> {
        self.record(format!("contact:{}", m.email));
        Ok(())
    }
}

pub fn empty_state() -> ApiState {
    ApiState::with_store(Arc::new(MemoryStore::new()), Arc::new(LogNotifier))
}

pub fn server(state: ApiState) -> TestServer {
    TestServer::new(app(Arc::new(state))).unwrap()
}

pub const PAST_DATE: &str = "2020-01-06";

/// The first Monday after today, so it is always bookable.
pub fn monday() -> NaiveDate {
    let today = Local::now().date_naive();
    let ahead = 7 - i64::from(today.weekday().num_days_from_monday());
    today + Duration::days(ahead)
}

pub fn tuesday() -> NaiveDate {
    monday() + Duration::days(1)
}

pub fn booking_form(name: &str, email: &str, date: impl Display, time: &str) -> Value {
    json!({
        "clientName": name,
        "clientEmail": email,
        "requestedDate": date.to_string(),
        "requestedTime": time,
    })
}

/// Creates the Monday 09:00-12:00 and 14:00-17:00 windows.
pub async fn seed_monday(server: &TestServer) {
    for (start, end) in [("09:00", "12:00"), ("14:00", "17:00")] {
        let response = server
            .post("/api/admin/availability")
            .json(&json!({ "dayOfWeek": 1, "startTime": start, "endTime": end }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }
}

/// Submits a booking and returns its id.
pub async fn submit(
    server: &TestServer,
    name: &str,
    email: &str,
    date: impl Display,
    time: &str,
) -> String {
    let response = server
        .post("/api/booking")
        .json(&booking_form(name, email, date, time))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["booking"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn act(server: &TestServer, id: &str, action: &str) -> axum_test::TestResponse {
    server
        .put(&format!("/api/admin/bookings/{id}"))
        .json(&json!({ "action": action }))
        .await
}
