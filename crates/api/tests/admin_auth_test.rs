mod test_utils;

use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use pretty_assertions::assert_eq;
use serde_json::Value;

use bookwell_api::middleware::auth::{hash_password, verify_token};
use test_utils::{empty_state, monday, server};

const TOKEN: &str = "practice-admin-token";

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

fn guarded_server() -> axum_test::TestServer {
    let hash = hash_password(TOKEN).unwrap();
    server(empty_state().with_admin_token_hash(Some(hash)))
}

#[test]
fn test_hashed_token_verifies() {
    let hash = hash_password(TOKEN).unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(verify_token(TOKEN, &hash).unwrap());
    assert!(!verify_token("wrong", &hash).unwrap());
}

#[test]
fn test_hashing_is_salted() {
    assert_ne!(hash_password(TOKEN).unwrap(), hash_password(TOKEN).unwrap());
}

#[test]
fn test_malformed_stored_hash_is_an_error() {
    assert!(verify_token(TOKEN, "not-a-phc-string").is_err());
}

#[tokio::test]
async fn test_admin_routes_require_a_token() {
    let server = guarded_server();

    let response = server.get("/api/admin/bookings").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Missing admin token");
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let server = guarded_server();

    let response = server
        .get("/api/admin/availability")
        .add_header(AUTHORIZATION, bearer("guess"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Invalid admin token");
}

#[tokio::test]
async fn test_correct_token_is_admitted() {
    let server = guarded_server();

    let response = server
        .get("/api/admin/bookings")
        .add_header(AUTHORIZATION, bearer(TOKEN))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_stay_open() {
    let server = guarded_server();

    assert_eq!(server.get("/health").await.status_code(), StatusCode::OK);
    assert_eq!(
        server
            .get(&format!("/api/booking/slots?date={}", monday()))
            .await
            .status_code(),
        StatusCode::OK
    );
}
