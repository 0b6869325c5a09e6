//! # Bookwell API
//!
//! The web server for the practice's scheduling and booking backend: public
//! slot lookup, booking and contact intake, and the admin endpoints for
//! availability windows and booking triage.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure; admin routes sit behind the admin gate
//! - **Handlers**: Extract input and shape responses
//! - **Services**: Combine stores, domain rules and the notifier
//! - **Middleware**: Admin authentication and error-to-response mapping
//! - **Config**: Environment configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Outbound notifications
pub mod notifier;
/// Route definitions and API endpoint structure
pub mod routes;
/// Orchestration between handlers, stores and the notifier
pub mod services;

use std::sync::Arc;

use axum::{
    Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, StatusCode},
};
use eyre::{Result, WrapErr};
use serde_json::json;
use tokio::net::TcpListener;
use tower::BoxError;
use tower_http::trace::TraceLayer;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use bookwell_core::rate_limit::{RateLimiter, default_window};
use bookwell_db::{AvailabilityStore, BookingStore};

use crate::notifier::Notifier;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub availability: Arc<dyn AvailabilityStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub notifier: Arc<dyn Notifier>,
    /// Booking submissions per client email
    pub rate_limiter: RateLimiter,
    /// Argon2 hash of the admin token; `None` leaves the admin routes open
    pub admin_token_hash: Option<String>,
}

impl ApiState {
    /// State with the default rate limit and no admin token.
    pub fn new(
        availability: Arc<dyn AvailabilityStore>,
        bookings: Arc<dyn BookingStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            availability,
            bookings,
            notifier,
            rate_limiter: RateLimiter::default(),
            admin_token_hash: None,
        }
    }

    /// Both store roles served by one backend.
    pub fn with_store<S>(store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self
    where
        S: AvailabilityStore + BookingStore + 'static,
    {
        Self::new(store.clone(), store, notifier)
    }

    pub fn with_rate_limit(mut self, max_requests: usize) -> Self {
        self.rate_limiter = RateLimiter::new(max_requests, default_window());
        self
    }

    pub fn with_admin_token_hash(mut self, hash: Option<String>) -> Self {
        self.admin_token_hash = hash;
        self
    }
}

/// Builds the application router with every route and the admin gate.
pub fn app(state: Arc<ApiState>) -> Router {
    let admin = Router::new()
        .merge(routes::availability::routes())
        .merge(routes::booking::admin_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ));

    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public booking and slot lookup
        .merge(routes::booking::routes())
        .merge(routes::contact::routes())
        // Availability and booking administration
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Installs the global log subscriber. Call once, before anything logs.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server
///
/// Applies CORS and the request timeout, then serves until the process is
/// stopped.
pub async fn start_server(config: config::ApiConfig, state: ApiState) -> Result<()> {
    if state.admin_token_hash.is_none() {
        warn!("ADMIN_TOKEN_HASH is not set; admin routes are open");
    }

    let app = app(Arc::new(state));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|err: BoxError| async move {
                warn!("Request aborted: {}", err);
                (
                    StatusCode::REQUEST_TIMEOUT,
                    Json(json!({ "error": "Request timed out" })),
                )
            }))
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
