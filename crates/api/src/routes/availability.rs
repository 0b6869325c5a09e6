use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::availability};

/// Admin-only; mounted behind the admin gate.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/availability",
            get(availability::list_windows).post(availability::create_window),
        )
        .route(
            "/api/admin/availability/:id",
            get(availability::get_window)
                .put(availability::update_window)
                .patch(availability::toggle_window)
                .delete(availability::delete_window),
        )
}
