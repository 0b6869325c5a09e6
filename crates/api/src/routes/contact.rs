use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers::contact};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/contact", post(contact::submit_contact))
}
