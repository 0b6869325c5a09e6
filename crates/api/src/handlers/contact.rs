use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use bookwell_core::models::contact::{ContactForm, MessageResponse};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::error_handling::AppError,
    services::contact::{CONTACT_RECEIVED, submit_contact_form},
};

/// `POST /api/contact`
#[axum::debug_handler]
pub async fn submit_contact(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(form) = payload?;
    submit_contact_form(state.notifier.as_ref(), &form).await?;
    Ok(Json(MessageResponse {
        message: CONTACT_RECEIVED.to_string(),
    }))
}
