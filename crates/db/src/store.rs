//! # Store abstraction
//!
//! Handlers receive the stores as trait objects built once at startup, so the
//! same scheduling code runs against Postgres in production and against an
//! isolated [`MemoryStore`](crate::memory::MemoryStore) in development and
//! tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use uuid::Uuid;

use bookwell_core::{
    booking::{BookingTransition, TransitionOutcome},
    models::{
        availability::AvailabilityWindow,
        booking::{BookingRequest, BookingStatus},
    },
    windows::WindowWrite,
};

use crate::{
    DbPool,
    models::convert_all,
    repositories::{availability, booking},
};

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// All windows ordered by day of week, then start time.
    async fn list_windows(&self) -> Result<Vec<AvailabilityWindow>>;

    async fn get_window(&self, id: Uuid) -> Result<Option<AvailabilityWindow>>;

    /// Stores a new window unless it overlaps another on the same day.
    async fn insert_window(&self, window: &AvailabilityWindow) -> Result<WindowWrite>;

    /// Replaces the stored window with the same id, with the same overlap
    /// check as [`insert_window`](Self::insert_window).
    async fn update_window(&self, window: &AvailabilityWindow) -> Result<WindowWrite>;

    async fn delete_window(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert_booking(&self, booking: &BookingRequest) -> Result<BookingRequest>;

    async fn get_booking(&self, id: Uuid) -> Result<Option<BookingRequest>>;

    /// Bookings with the given status, or all of them; newest first.
    async fn list_bookings(&self, status: Option<BookingStatus>) -> Result<Vec<BookingRequest>>;

    async fn bookings_for_date(&self, date: NaiveDate) -> Result<Vec<BookingRequest>>;

    /// Overwrites the admin notes verbatim.
    async fn update_notes(
        &self,
        id: Uuid,
        notes: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<BookingRequest>>;

    /// Applies a status change atomically: the current status is checked and
    /// replaced in one step, and a confirmation fails if the slot is taken.
    async fn transition(
        &self,
        id: Uuid,
        transition: BookingTransition,
        at: DateTime<Utc>,
    ) -> Result<TransitionOutcome>;
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl AvailabilityStore for PgStore {
    async fn list_windows(&self) -> Result<Vec<AvailabilityWindow>> {
        convert_all(availability::list_windows(&self.pool).await?)
    }

    async fn get_window(&self, id: Uuid) -> Result<Option<AvailabilityWindow>> {
        availability::get_window_by_id(&self.pool, id)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn insert_window(&self, window: &AvailabilityWindow) -> Result<WindowWrite> {
        availability::create_window(&self.pool, window).await
    }

    async fn update_window(&self, window: &AvailabilityWindow) -> Result<WindowWrite> {
        availability::update_window(&self.pool, window).await
    }

    async fn delete_window(&self, id: Uuid) -> Result<bool> {
        availability::delete_window(&self.pool, id).await
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn insert_booking(&self, booking: &BookingRequest) -> Result<BookingRequest> {
        booking::create_booking_request(&self.pool, booking)
            .await?
            .try_into()
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<BookingRequest>> {
        booking::get_booking_by_id(&self.pool, id)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list_bookings(&self, status: Option<BookingStatus>) -> Result<Vec<BookingRequest>> {
        convert_all(booking::list_bookings(&self.pool, status).await?)
    }

    async fn bookings_for_date(&self, date: NaiveDate) -> Result<Vec<BookingRequest>> {
        convert_all(booking::get_bookings_by_date(&self.pool, date).await?)
    }

    async fn update_notes(
        &self,
        id: Uuid,
        notes: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<BookingRequest>> {
        booking::update_booking_notes(&self.pool, id, notes, at)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn transition(
        &self,
        id: Uuid,
        transition: BookingTransition,
        at: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        booking::transition_booking_status(&self.pool, id, transition, at).await
    }
}
