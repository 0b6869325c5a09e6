//! # Availability Handlers
//!
//! Admin endpoints for the weekly availability windows the slot generator
//! works from.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use bookwell_core::{
    errors::ScheduleError,
    models::availability::{
        CreateWindowRequest, DeleteWindowResponse, UpdateWindowRequest, WindowListResponse,
        WindowResponse,
    },
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::error_handling::AppError,
    services::scheduling::{self, WINDOW_NOT_FOUND},
};

/// `GET /api/admin/availability`
#[axum::debug_handler]
pub async fn list_windows(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<WindowListResponse>, AppError> {
    let windows = scheduling::list_windows(state.availability.as_ref()).await?;
    Ok(Json(WindowListResponse { windows }))
}

/// `POST /api/admin/availability`
#[axum::debug_handler]
pub async fn create_window(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateWindowRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WindowResponse>), AppError> {
    let Json(request) = payload?;
    let window = scheduling::create_window(state.availability.as_ref(), &request, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(WindowResponse { window })))
}

/// `GET /api/admin/availability/:id`
#[axum::debug_handler]
pub async fn get_window(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<WindowResponse>, AppError> {
    let Path(id) = id?;
    let window = scheduling::get_window(state.availability.as_ref(), id).await?;
    Ok(Json(WindowResponse { window }))
}

/// `PUT /api/admin/availability/:id`
#[axum::debug_handler]
pub async fn update_window(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateWindowRequest>, JsonRejection>,
) -> Result<Json<WindowResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let window =
        scheduling::update_window(state.availability.as_ref(), id, &request, Utc::now()).await?;
    Ok(Json(WindowResponse { window }))
}

/// `PATCH /api/admin/availability/:id` flips `isActive`.
#[axum::debug_handler]
pub async fn toggle_window(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<WindowResponse>, AppError> {
    let Path(id) = id?;
    let window = scheduling::toggle_window(state.availability.as_ref(), id, Utc::now()).await?;
    Ok(Json(WindowResponse { window }))
}

/// `DELETE /api/admin/availability/:id`
#[axum::debug_handler]
pub async fn delete_window(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DeleteWindowResponse>, AppError> {
    let Path(id) = id?;
    if !scheduling::delete_window(state.availability.as_ref(), id).await? {
        return Err(ScheduleError::NotFound(WINDOW_NOT_FOUND.to_string()).into());
    }
    Ok(Json(DeleteWindowResponse { success: true }))
}
