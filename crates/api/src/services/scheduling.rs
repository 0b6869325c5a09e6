//! Availability window management and slot lookup.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use bookwell_core::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        availability::{AvailabilityWindow, CreateWindowRequest, UpdateWindowRequest},
        time_slot::TimeSlot,
    },
    slots::generate_slots,
    windows::{OVERLAP, WindowWrite, validate_new_window, validate_window_patch},
};
use bookwell_db::{AvailabilityStore, BookingStore};

pub const WINDOW_NOT_FOUND: &str = "Availability window not found";

fn not_found() -> ScheduleError {
    ScheduleError::NotFound(WINDOW_NOT_FOUND.to_string())
}

fn saved(write: WindowWrite) -> ScheduleResult<AvailabilityWindow> {
    match write {
        WindowWrite::Saved(window) => Ok(window),
        WindowWrite::NotFound => Err(not_found()),
        WindowWrite::Overlap => Err(ScheduleError::Validation(OVERLAP.to_string())),
    }
}

pub async fn list_windows(store: &dyn AvailabilityStore) -> ScheduleResult<Vec<AvailabilityWindow>> {
    Ok(store.list_windows().await?)
}

pub async fn get_window(store: &dyn AvailabilityStore, id: Uuid) -> ScheduleResult<AvailabilityWindow> {
    store.get_window(id).await?.ok_or_else(not_found)
}

pub async fn create_window(
    store: &dyn AvailabilityStore,
    request: &CreateWindowRequest,
    now: DateTime<Utc>,
) -> ScheduleResult<AvailabilityWindow> {
    let valid = validate_new_window(request)?;

    let window = AvailabilityWindow {
        id: Uuid::new_v4(),
        day_of_week: valid.day_of_week,
        start_time: valid.start_time,
        end_time: valid.end_time,
        is_active: valid.is_active,
        created_at: now,
        updated_at: now,
    };

    let created = saved(store.insert_window(&window).await?)?;
    tracing::info!(
        id = %created.id,
        day_of_week = created.day_of_week,
        "Created availability window {}-{}",
        created.start_time,
        created.end_time
    );
    Ok(created)
}

/// Applies a partial update. The merged window must still be ordered, and the
/// store rejects it if it overlaps another window on its (possibly new) day.
pub async fn update_window(
    store: &dyn AvailabilityStore,
    id: Uuid,
    request: &UpdateWindowRequest,
    now: DateTime<Utc>,
) -> ScheduleResult<AvailabilityWindow> {
    let current = get_window(store, id).await?;

    let patch = validate_window_patch(request)?;
    let mut merged = patch.apply(&current)?;

    merged.updated_at = now;
    let updated = saved(store.update_window(&merged).await?)?;
    tracing::info!(id = %updated.id, "Updated availability window");
    Ok(updated)
}

pub async fn toggle_window(
    store: &dyn AvailabilityStore,
    id: Uuid,
    now: DateTime<Utc>,
) -> ScheduleResult<AvailabilityWindow> {
    let mut window = get_window(store, id).await?;
    window.is_active = !window.is_active;
    window.updated_at = now;

    let updated = saved(store.update_window(&window).await?)?;
    tracing::info!(id = %updated.id, is_active = updated.is_active, "Toggled availability window");
    Ok(updated)
}

/// `false` when no window has that id.
pub async fn delete_window(store: &dyn AvailabilityStore, id: Uuid) -> ScheduleResult<bool> {
    let deleted = store.delete_window(id).await?;
    if deleted {
        tracing::info!(%id, "Deleted availability window");
    }
    Ok(deleted)
}

/// Bookable 30-minute slots for `date`, marking those already confirmed.
pub async fn available_slots(
    windows: &dyn AvailabilityStore,
    bookings: &dyn BookingStore,
    date: NaiveDate,
) -> ScheduleResult<Vec<TimeSlot>> {
    let windows = windows.list_windows().await?;
    let bookings = bookings.bookings_for_date(date).await?;
    Ok(generate_slots(date, &windows, &bookings))
}
