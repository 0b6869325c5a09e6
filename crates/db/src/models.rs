//! Row types as stored in Postgres and their conversion to domain models.
//!
//! Times are kept as `HH:MM` text and statuses as lowercase text, the same
//! representation the public API uses.

use chrono::{DateTime, NaiveDate, Utc};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use bookwell_core::{
    models::{availability::AvailabilityWindow, booking::BookingRequest},
    time::WallTime,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityWindow {
    pub id: Uuid,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookingRequest {
    pub id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub requested_date: NaiveDate,
    pub requested_time: String,
    pub message: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn wall_time(column: &str, raw: &str) -> Result<WallTime> {
    WallTime::parse(raw).map_err(|e| eyre!("corrupt {column} value: {e}"))
}

impl TryFrom<DbAvailabilityWindow> for AvailabilityWindow {
    type Error = eyre::Report;

    fn try_from(row: DbAvailabilityWindow) -> Result<Self> {
        let day_of_week = u8::try_from(row.day_of_week)
            .ok()
            .filter(|d| *d <= 6)
            .ok_or_else(|| eyre!("corrupt day_of_week value: {}", row.day_of_week))?;

        Ok(AvailabilityWindow {
            id: row.id,
            day_of_week,
            start_time: wall_time("start_time", &row.start_time)?,
            end_time: wall_time("end_time", &row.end_time)?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<DbBookingRequest> for BookingRequest {
    type Error = eyre::Report;

    fn try_from(row: DbBookingRequest) -> Result<Self> {
        Ok(BookingRequest {
            id: row.id,
            client_name: row.client_name,
            client_email: row.client_email,
            client_phone: row.client_phone,
            requested_date: row.requested_date,
            requested_time: wall_time("requested_time", &row.requested_time)?,
            message: row.message,
            status: row.status.parse().map_err(|e: String| eyre!(e))?,
            admin_notes: row.admin_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Converts a batch of rows, failing on the first corrupt one.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = eyre::Report>,
{
    rows.into_iter().map(T::try_from).collect()
}
