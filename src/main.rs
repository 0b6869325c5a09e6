use std::sync::Arc;

use bookwell_api::{ApiState, config::ApiConfig, notifier::LogNotifier};
use bookwell_db::{MemoryStore, PgStore, create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    bookwell_api::init_tracing(config.log_level)?;

    let notifier = Arc::new(LogNotifier);
    let state = match &config.database_url {
        Some(url) => {
            let db_pool = create_pool(url).await?;
            initialize_database(&db_pool).await?;
            info!("Using Postgres store");
            ApiState::with_store(Arc::new(PgStore::new(db_pool)), notifier)
        }
        None if config.seed_sample_data => {
            info!("DATABASE_URL not set; using in-memory store with sample data");
            ApiState::with_store(Arc::new(MemoryStore::with_sample_data()), notifier)
        }
        None => {
            info!("DATABASE_URL not set; using empty in-memory store");
            ApiState::with_store(Arc::new(MemoryStore::new()), notifier)
        }
    };

    let state = state
        .with_rate_limit(config.booking_rate_limit)
        .with_admin_token_hash(config.admin_token_hash.clone());

    bookwell_api::start_server(config, state).await?;

    Ok(())
}
