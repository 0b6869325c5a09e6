//! Mockall doubles for the store traits, used to drive failure paths in tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;
use uuid::Uuid;

use bookwell_core::{
    booking::{BookingTransition, TransitionOutcome},
    models::{
        availability::AvailabilityWindow,
        booking::{BookingRequest, BookingStatus},
    },
    windows::WindowWrite,
};

use crate::store::{AvailabilityStore, BookingStore};

mock! {
    pub AvailabilityRepo {}

    #[async_trait]
    impl AvailabilityStore for AvailabilityRepo {
        async fn list_windows(&self) -> eyre::Result<Vec<AvailabilityWindow>>;
        async fn get_window(&self, id: Uuid) -> eyre::Result<Option<AvailabilityWindow>>;
        async fn insert_window(&self, window: &AvailabilityWindow) -> eyre::Result<WindowWrite>;
        async fn update_window(&self, window: &AvailabilityWindow) -> eyre::Result<WindowWrite>;
        async fn delete_window(&self, id: Uuid) -> eyre::Result<bool>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingStore for BookingRepo {
        async fn insert_booking(&self, booking: &BookingRequest) -> eyre::Result<BookingRequest>;
        async fn get_booking(&self, id: Uuid) -> eyre::Result<Option<BookingRequest>>;
        async fn list_bookings(&self, status: Option<BookingStatus>) -> eyre::Result<Vec<BookingRequest>>;
        async fn bookings_for_date(&self, date: NaiveDate) -> eyre::Result<Vec<BookingRequest>>;
        async fn update_notes(
            &self,
            id: Uuid,
            notes: &str,
            at: DateTime<Utc>,
        ) -> eyre::Result<Option<BookingRequest>>;
        async fn transition(
            &self,
            id: Uuid,
            transition: BookingTransition,
            at: DateTime<Utc>,
        ) -> eyre::Result<TransitionOutcome>;
    }
}
