use crate::models::DbAvailabilityWindow;
use bookwell_core::{models::availability::AvailabilityWindow, windows::WindowWrite};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// SQLSTATE raised by the `no_overlapping_windows` exclusion constraint.
const EXCLUSION_VIOLATION: &str = "23P01";

fn is_overlap(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION)
    )
}

fn into_write(
    result: std::result::Result<Option<DbAvailabilityWindow>, sqlx::Error>,
    id: Uuid,
) -> Result<WindowWrite> {
    match result {
        Ok(Some(row)) => Ok(WindowWrite::Saved(row.try_into()?)),
        Ok(None) => Ok(WindowWrite::NotFound),
        Err(e) if is_overlap(&e) => {
            tracing::debug!("Write of availability window {} blocked by an overlap", id);
            Ok(WindowWrite::Overlap)
        }
        Err(e) => Err(e.into()),
    }
}

/// Inserts `window`; the exclusion constraint rejects overlaps atomically.
pub async fn create_window(pool: &Pool<Postgres>, window: &AvailabilityWindow) -> Result<WindowWrite> {
    tracing::debug!(
        "Creating availability window: id={}, day={}, {}-{}",
        window.id, window.day_of_week, window.start_time, window.end_time
    );

    let result = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        INSERT INTO availability_windows (id, day_of_week, start_time, end_time, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, day_of_week, start_time, end_time, is_active, created_at, updated_at
        "#,
    )
    .bind(window.id)
    .bind(i32::from(window.day_of_week))
    .bind(window.start_time.to_string())
    .bind(window.end_time.to_string())
    .bind(window.is_active)
    .bind(window.created_at)
    .bind(window.updated_at)
    .fetch_optional(pool)
    .await;

    into_write(result, window.id)
}

pub async fn get_window_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAvailabilityWindow>> {
    let row = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        SELECT id, day_of_week, start_time, end_time, is_active, created_at, updated_at
        FROM availability_windows
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// All windows by day of week, then start time. `HH:MM` text sorts the same
/// as the time it encodes.
pub async fn list_windows(pool: &Pool<Postgres>) -> Result<Vec<DbAvailabilityWindow>> {
    let rows = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        SELECT id, day_of_week, start_time, end_time, is_active, created_at, updated_at
        FROM availability_windows
        ORDER BY day_of_week ASC, start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_window(pool: &Pool<Postgres>, window: &AvailabilityWindow) -> Result<WindowWrite> {
    let result = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        UPDATE availability_windows
        SET day_of_week = $2, start_time = $3, end_time = $4, is_active = $5, updated_at = $6
        WHERE id = $1
        RETURNING id, day_of_week, start_time, end_time, is_active, created_at, updated_at
        "#,
    )
    .bind(window.id)
    .bind(i32::from(window.day_of_week))
    .bind(window.start_time.to_string())
    .bind(window.end_time.to_string())
    .bind(window.is_active)
    .bind(window.updated_at)
    .fetch_optional(pool)
    .await;

    into_write(result, window.id)
}

pub async fn delete_window(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM availability_windows
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
