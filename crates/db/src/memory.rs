//! In-process store used when no database is configured, and by tests.
//!
//! Each collection sits behind its own `RwLock`. Window writes and status
//! transitions hold the write lock for the whole check-and-set, so overlap
//! checks and confirmations stay exclusive.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use eyre::Result;
use tokio::sync::RwLock;
use uuid::Uuid;

use bookwell_core::{
    booking::{BookingTransition, TransitionOutcome},
    models::{
        availability::AvailabilityWindow,
        booking::{BookingRequest, BookingStatus},
    },
    time::WallTime,
    windows::{WindowWrite, find_overlap, sort_windows},
};

use crate::store::{AvailabilityStore, BookingStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    windows: RwLock<Vec<AvailabilityWindow>>,
    bookings: RwLock<Vec<BookingRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(windows: Vec<AvailabilityWindow>, bookings: Vec<BookingRequest>) -> Self {
        Self {
            windows: RwLock::new(windows),
            bookings: RwLock::new(bookings),
        }
    }

    /// Store pre-filled with the practice's sample schedule and requests.
    pub fn with_sample_data() -> Self {
        Self::with_records(sample_windows(), sample_bookings())
    }
}

fn overlaps_stored(windows: &[AvailabilityWindow], window: &AvailabilityWindow) -> bool {
    find_overlap(
        windows,
        window.day_of_week,
        window.start_time,
        window.end_time,
        Some(window.id),
    )
    .is_some()
}

#[async_trait]
impl AvailabilityStore for MemoryStore {
    async fn list_windows(&self) -> Result<Vec<AvailabilityWindow>> {
        let mut windows = self.windows.read().await.clone();
        sort_windows(&mut windows);
        Ok(windows)
    }

    async fn get_window(&self, id: Uuid) -> Result<Option<AvailabilityWindow>> {
        let windows = self.windows.read().await;
        Ok(windows.iter().find(|w| w.id == id).cloned())
    }

    async fn insert_window(&self, window: &AvailabilityWindow) -> Result<WindowWrite> {
        let mut windows = self.windows.write().await;
        if overlaps_stored(&windows, window) {
            return Ok(WindowWrite::Overlap);
        }
        windows.push(window.clone());
        Ok(WindowWrite::Saved(window.clone()))
    }

    async fn update_window(&self, window: &AvailabilityWindow) -> Result<WindowWrite> {
        let mut windows = self.windows.write().await;
        if !windows.iter().any(|w| w.id == window.id) {
            return Ok(WindowWrite::NotFound);
        }
        if overlaps_stored(&windows, window) {
            return Ok(WindowWrite::Overlap);
        }
        for slot in windows.iter_mut().filter(|w| w.id == window.id) {
            *slot = window.clone();
        }
        Ok(WindowWrite::Saved(window.clone()))
    }

    async fn delete_window(&self, id: Uuid) -> Result<bool> {
        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|w| w.id != id);
        Ok(windows.len() != before)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_booking(&self, booking: &BookingRequest) -> Result<BookingRequest> {
        self.bookings.write().await.push(booking.clone());
        Ok(booking.clone())
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<BookingRequest>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list_bookings(&self, status: Option<BookingStatus>) -> Result<Vec<BookingRequest>> {
        let bookings = self.bookings.read().await;
        let mut matching: Vec<BookingRequest> = bookings
            .iter()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn bookings_for_date(&self, date: NaiveDate) -> Result<Vec<BookingRequest>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|b| b.requested_date == date)
            .cloned()
            .collect())
    }

    async fn update_notes(
        &self,
        id: Uuid,
        notes: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<BookingRequest>> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings.iter_mut().find(|b| b.id == id).map(|b| {
            b.admin_notes = Some(notes.to_string());
            b.updated_at = at;
            b.clone()
        }))
    }

    async fn transition(
        &self,
        id: Uuid,
        transition: BookingTransition,
        at: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        let mut bookings = self.bookings.write().await;

        let Some(index) = bookings.iter().position(|b| b.id == id) else {
            return Ok(TransitionOutcome::NotFound);
        };

        let current = &bookings[index];
        if !transition.is_allowed_from(current.status) {
            return Ok(TransitionOutcome::InvalidState(current.status));
        }

        if transition == BookingTransition::Confirm {
            let (date, time) = (current.requested_date, current.requested_time);
            let taken = bookings.iter().any(|b| {
                b.id != id
                    && b.status == BookingStatus::Confirmed
                    && b.requested_date == date
                    && b.requested_time == time
            });
            if taken {
                return Ok(TransitionOutcome::SlotTaken);
            }
        }

        let booking = &mut bookings[index];
        booking.status = transition.target();
        booking.updated_at = at;
        Ok(TransitionOutcome::Applied(booking.clone()))
    }
}

fn seeded_at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn seed_time(hour: u8, minute: u8) -> WallTime {
    WallTime::from_hm(hour, minute).unwrap_or_default()
}

fn seed_date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap_or_default()
}

/// Monday and Wednesday mornings and afternoons, plus a paused Friday window.
pub fn sample_windows() -> Vec<AvailabilityWindow> {
    let stamp = seeded_at(2, 1, 12, 0);
    [
        (1, 1, (9, 0), (12, 0), true),
        (2, 1, (14, 0), (17, 0), true),
        (3, 3, (9, 0), (12, 0), true),
        (4, 3, (14, 0), (17, 0), true),
        (5, 5, (10, 0), (15, 0), false),
    ]
    .into_iter()
    .map(|(n, day, (sh, sm), (eh, em), is_active)| AvailabilityWindow {
        id: Uuid::from_u128(n),
        day_of_week: day,
        start_time: seed_time(sh, sm),
        end_time: seed_time(eh, em),
        is_active,
        created_at: stamp,
        updated_at: stamp,
    })
    .collect()
}

/// One request in each state, as an admin would find them mid-week.
pub fn sample_bookings() -> Vec<BookingRequest> {
    let booking = |n: u128,
                   name: &str,
                   email: &str,
                   phone: Option<&str>,
                   date: NaiveDate,
                   time: WallTime,
                   message: &str,
                   status: BookingStatus,
                   admin_notes: Option<&str>,
                   created_at: DateTime<Utc>,
                   updated_at: DateTime<Utc>| BookingRequest {
        id: Uuid::from_u128(0x1000 + n),
        client_name: name.to_string(),
        client_email: email.to_string(),
        client_phone: phone.map(str::to_string),
        requested_date: date,
        requested_time: time,
        message: Some(message.to_string()),
        status,
        admin_notes: admin_notes.map(str::to_string),
        created_at,
        updated_at,
    };

    vec![
        booking(
            1,
            "Sarah Johnson",
            "sarah.j@email.com",
            Some("555-0101"),
            seed_date(2, 15),
            seed_time(10, 0),
            "I would like to schedule an initial consultation to discuss functional medicine approaches for chronic fatigue.",
            BookingStatus::Pending,
            None,
            seeded_at(2, 8, 9, 0),
            seeded_at(2, 8, 9, 0),
        ),
        booking(
            2,
            "Michael Chen",
            "mchen@email.com",
            Some("555-0102"),
            seed_date(2, 16),
            seed_time(14, 0),
            "Follow-up appointment to discuss recent lab results.",
            BookingStatus::Confirmed,
            Some("Lab results reviewed - ready to discuss treatment plan"),
            seeded_at(2, 7, 14, 30),
            seeded_at(2, 7, 15, 0),
        ),
        booking(
            3,
            "Emily Rodriguez",
            "emily.r@email.com",
            None,
            seed_date(2, 14),
            seed_time(9, 0),
            "Interested in learning about nutritional counseling options.",
            BookingStatus::Pending,
            None,
            seeded_at(2, 8, 11, 15),
            seeded_at(2, 8, 11, 15),
        ),
        booking(
            4,
            "David Thompson",
            "david.t@email.com",
            Some("555-0103"),
            seed_date(2, 13),
            seed_time(16, 0),
            "Request for hormone optimization consultation.",
            BookingStatus::Declined,
            Some("Time slot no longer available - suggested alternative times"),
            seeded_at(2, 6, 10, 0),
            seeded_at(2, 6, 11, 30),
        ),
        booking(
            5,
            "Lisa Martinez",
            "lisa.m@email.com",
            Some("555-0104"),
            seed_date(2, 17),
            seed_time(11, 0),
            "Initial consultation for gut health concerns.",
            BookingStatus::Cancelled,
            Some("Client cancelled via phone call"),
            seeded_at(2, 5, 13, 20),
            seeded_at(2, 8, 8, 0),
        ),
    ]
}
