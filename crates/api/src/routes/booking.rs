use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::booking};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/booking", post(booking::submit_booking))
        .route("/api/booking/slots", get(booking::available_slots))
}

/// Admin-only; mounted behind the admin gate.
pub fn admin_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/bookings", get(booking::list_bookings))
        .route(
            "/api/admin/bookings/:id",
            get(booking::get_booking)
                .put(booking::update_booking)
                .delete(booking::cancel_booking),
        )
}
