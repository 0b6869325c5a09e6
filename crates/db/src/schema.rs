use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for `day_of_week WITH =` in the window exclusion constraint
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist")
        .execute(pool)
        .await?;

    // Create availability_windows table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_windows (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            day_of_week INTEGER NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            end_time VARCHAR(5) NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_window_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // No two windows on the same day may intersect. Times are compared as
    // minutes since midnight over half-open ranges, inactive windows included.
    sqlx::query(
        r#"
        DO $$
        BEGIN
            IF NOT EXISTS (
                SELECT 1 FROM pg_constraint WHERE conname = 'no_overlapping_windows'
            ) THEN
                ALTER TABLE availability_windows
                    ADD CONSTRAINT no_overlapping_windows EXCLUDE USING gist (
                        day_of_week WITH =,
                        (int4range(
                            substr(start_time, 1, 2)::int * 60 + substr(start_time, 4, 2)::int,
                            substr(end_time, 1, 2)::int * 60 + substr(end_time, 4, 2)::int
                        )) WITH &&
                    );
            END IF;
        END
        $$;
        "#,
    )
    .execute(pool)
    .await?;

    // Create booking_requests table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS booking_requests (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_name VARCHAR(255) NOT NULL,
            client_email VARCHAR(255) NOT NULL,
            client_phone VARCHAR(64) NULL,
            requested_date DATE NOT NULL,
            requested_time VARCHAR(5) NOT NULL,
            message TEXT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            admin_notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'declined', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one confirmed booking per slot. Confirmation relies on this
    // index to stay exclusive under concurrent admin actions.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_booking_requests_confirmed_slot
            ON booking_requests(requested_date, requested_time)
            WHERE status = 'confirmed';
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement each
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_availability_windows_day ON availability_windows(day_of_week, start_time)",
        "CREATE INDEX IF NOT EXISTS idx_booking_requests_date ON booking_requests(requested_date)",
        "CREATE INDEX IF NOT EXISTS idx_booking_requests_status ON booking_requests(status)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
