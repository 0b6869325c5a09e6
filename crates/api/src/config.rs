//! # API Configuration Module
//!
//! This module loads configuration for the booking API server from environment
//! variables, providing defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string; when unset the server runs
//!   on the in-memory store
//! - `SEED_SAMPLE_DATA`: Seed the in-memory store with sample windows and
//!   bookings (default: true)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `ADMIN_TOKEN_HASH`: Argon2 hash of the admin bearer token; when unset the
//!   admin routes are open
//! - `BOOKING_RATE_LIMIT`: Booking submissions allowed per email per 24 hours
//!   (default: 3)

use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

use bookwell_core::rate_limit::DEFAULT_MAX_REQUESTS;

/// Configuration for the booking API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use bookwell_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,

    /// Whether the in-memory store starts with sample data
    pub seed_sample_data: bool,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Argon2 PHC string the admin bearer token is verified against
    pub admin_token_hash: Option<String>,

    /// Booking submissions allowed per email in a 24 hour window
    pub booking_rate_limit: usize,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - The BOOKING_RATE_LIMIT value is not a positive integer
    /// - The SEED_SAMPLE_DATA value is not a boolean
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Network settings
        let host = get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = get("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Storage settings
        let database_url = get("DATABASE_URL");
        let seed_sample_data = match get("SEED_SAMPLE_DATA") {
            Some(raw) => parse_bool(&raw).wrap_err("Invalid SEED_SAMPLE_DATA value")?,
            None => true,
        };

        // Logging settings
        let log_level = match get("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = get("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = get("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        // Security settings
        let admin_token_hash = get("ADMIN_TOKEN_HASH");

        let booking_rate_limit = match get("BOOKING_RATE_LIMIT") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| eyre!("Invalid BOOKING_RATE_LIMIT value: {raw}"))?,
            None => DEFAULT_MAX_REQUESTS,
        };

        Ok(Self {
            host,
            port,
            database_url,
            seed_sample_data,
            log_level,
            cors_origins,
            request_timeout,
            admin_token_hash,
            booking_rate_limit,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(eyre!("expected a boolean, got {other:?}")),
    }
}
