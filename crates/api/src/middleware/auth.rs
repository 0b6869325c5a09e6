//! # Authentication Module
//!
//! The admin area has a single identity: whoever holds the admin token. The
//! server only stores an Argon2 hash of that token (`ADMIN_TOKEN_HASH`) and
//! checks `Authorization: Bearer <token>` against it on every admin request.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use bookwell_core::errors::ScheduleError;
use eyre::Result;

use crate::{ApiState, middleware::error_handling::AppError};

/// Hashes a secret using the Argon2 algorithm
///
/// A fresh random salt is generated for every call and the result is returned
/// in PHC string format, ready to be put in `ADMIN_TOKEN_HASH`.
///
/// # Example
///
/// ```rust
/// let hashed = bookwell_api::middleware::auth::hash_password("correct horse").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `token` against a stored PHC hash.
///
/// A malformed stored hash is an error rather than a failed match so that a
/// misconfigured server is noticed.
pub fn verify_token(token: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| eyre::eyre!("Invalid ADMIN_TOKEN_HASH: {}", e))?;

    Ok(Argon2::default()
        .verify_password(token.as_bytes(), &parsed)
        .is_ok())
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Route layer guarding the admin endpoints.
pub async fn require_admin(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(stored_hash) = state.admin_token_hash.as_deref() else {
        return Ok(next.run(request).await);
    };

    let token = bearer_token(&request).ok_or_else(|| {
        ScheduleError::Authentication("Missing admin token".to_string())
    })?;

    let valid = verify_token(token, stored_hash)
        .map_err(|e| ScheduleError::Internal(e.into()))?;
    if !valid {
        return Err(ScheduleError::Authentication("Invalid admin token".to_string()).into());
    }

    Ok(next.run(request).await)
}
