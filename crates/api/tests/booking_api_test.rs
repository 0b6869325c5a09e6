mod test_utils;

use std::sync::Arc;

use axum::http::StatusCode;
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use bookwell_api::ApiState;
use bookwell_db::MemoryStore;
use test_utils::{
    PAST_DATE, RecordingNotifier, act, booking_form, empty_state, monday, seed_monday,
    server, submit, tuesday,
};

fn slot_summary(body: &Value) -> (usize, Vec<String>) {
    let slots = body["slots"].as_array().unwrap();
    let unavailable = slots
        .iter()
        .filter(|s| s["available"] == false)
        .map(|s| s["time"].as_str().unwrap().to_string())
        .collect();
    (slots.len(), unavailable)
}

#[tokio::test]
async fn test_monday_windows_yield_twelve_open_slots() {
    let server = server(empty_state());
    seed_monday(&server).await;

    let body = server
        .get(&format!("/api/booking/slots?date={}", monday()))
        .await
        .json::<Value>();

    assert_eq!(slot_summary(&body), (12, vec![]));
    assert_eq!(body["slots"][0], json!({ "time": "09:00", "available": true }));
    assert_eq!(body["slots"][6], json!({ "time": "14:00", "available": true }));
}

#[tokio::test]
async fn test_confirmed_booking_blocks_its_slot_only() {
    let server = server(empty_state());
    seed_monday(&server).await;
    let id = submit(&server, "Ada Lovelace", "ada@example.com", monday(), "10:00").await;

    // Pending does not block.
    let pending = server
        .get(&format!("/api/booking/slots?date={}", monday()))
        .await
        .json::<Value>();
    assert_eq!(slot_summary(&pending), (12, vec![]));

    assert_eq!(act(&server, &id, "confirm").await.status_code(), StatusCode::OK);

    let confirmed = server
        .get(&format!("/api/booking/slots?date={}", monday()))
        .await
        .json::<Value>();
    assert_eq!(slot_summary(&confirmed), (12, vec!["10:00".to_string()]));
}

#[tokio::test]
async fn test_day_without_windows_has_no_slots() {
    let server = server(empty_state());
    seed_monday(&server).await;

    let body = server
        .get(&format!("/api/booking/slots?date={}", tuesday()))
        .await
        .json::<Value>();

    assert_eq!(body, json!({ "slots": [] }));
}

#[tokio::test]
async fn test_slot_lookup_validates_date() {
    let server = server(empty_state());

    let cases = [
        ("/api/booking/slots", "Date parameter is required"),
        ("/api/booking/slots?date=", "Date parameter is required"),
        ("/api/booking/slots?date=2030-3-4", "Invalid date format. Expected YYYY-MM-DD"),
        ("/api/booking/slots?date=2030-02-30", "Invalid date format. Expected YYYY-MM-DD"),
    ];
    for (path, message) in cases {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.json::<Value>()["error"], message, "{path}");
    }

    let past = server
        .get(&format!("/api/booking/slots?date={PAST_DATE}"))
        .await;
    assert_eq!(past.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(past.json::<Value>()["error"], "Cannot request slots for past dates");
}

#[tokio::test]
async fn test_booking_submission_returns_summary() {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = ApiState::with_store(Arc::new(MemoryStore::new()), notifier.clone());
    let server = server(state);

    let response = server
        .post("/api/booking")
        .json(&json!({
            "clientName": "  Grace Hopper ",
            "clientEmail": "grace@example.com",
            "clientPhone": "555-0199",
            "requestedDate": monday().to_string(),
            "requestedTime": "14:30",
            "message": "First visit",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(
        body["message"],
        "Your request has been submitted. We'll confirm your appointment within 24 hours."
    );
    assert_eq!(body["booking"]["requestedDate"], monday().to_string());
    assert_eq!(body["booking"]["requestedTime"], "14:30");
    assert_eq!(notifier.sent(), vec!["request:grace@example.com".to_string()]);

    let id = body["booking"]["id"].as_str().unwrap();
    let stored = server
        .get(&format!("/api/admin/bookings/{id}"))
        .await
        .json::<Value>();
    assert_eq!(stored["clientName"], "Grace Hopper");
    assert_eq!(stored["status"], "pending");
    assert_eq!(stored["clientPhone"], "555-0199");
}

#[tokio::test]
async fn test_validation_errors_are_joined() {
    let server = server(empty_state());

    let response = server.post("/api/booking").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Name is required. Email is required. Valid date is required. Valid time is required"
    );
}

#[tokio::test]
async fn test_past_date_creates_no_record() {
    let server = server(empty_state());

    let response = server
        .post("/api/booking")
        .json(&booking_form("Ada", "ada@example.com", PAST_DATE, "10:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Cannot book appointments for past dates"
    );
    let list = server.get("/api/admin/bookings").await.json::<Value>();
    assert_eq!(list, json!({ "bookings": [] }));
}

#[tokio::test]
async fn test_fourth_request_in_a_day_is_rate_limited() {
    let server = server(empty_state());
    let email: String = SafeEmail().fake();

    for hour in ["09:00", "10:00", "11:00"] {
        let name: String = Name().fake();
        submit(&server, &name, &email, monday(), hour).await;
    }

    let response = server
        .post("/api/booking")
        .json(&booking_form("Ada", &email.to_uppercase(), monday(), "14:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.json::<Value>()["error"],
        "You have reached the maximum number of booking requests (3) for today. \
         Please try again tomorrow or call us directly."
    );

    // A different requester is unaffected.
    submit(&server, "Grace", "grace@example.com", monday(), "14:00").await;
}

#[tokio::test]
async fn test_rate_limit_is_configurable() {
    let server = server(empty_state().with_rate_limit(1));
    submit(&server, "Ada", "ada@example.com", monday(), "09:00").await;

    let response = server
        .post("/api/booking")
        .json(&booking_form("Ada", "ada@example.com", monday(), "10:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert!(
        response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .contains("(1)")
    );
}

#[tokio::test]
async fn test_confirm_and_decline_notify_the_client() {
    let notifier = Arc::new(RecordingNotifier::default());
    let server = server(ApiState::with_store(
        Arc::new(MemoryStore::new()),
        notifier.clone(),
    ));
    let first = submit(&server, "Ada", "ada@example.com", monday(), "09:00").await;
    let second = submit(&server, "Grace", "grace@example.com", monday(), "09:30").await;

    let confirmed = act(&server, &first, "confirm").await;
    assert_eq!(confirmed.status_code(), StatusCode::OK);
    assert_eq!(confirmed.json::<Value>()["status"], "confirmed");

    let declined = act(&server, &second, "decline").await;
    assert_eq!(declined.status_code(), StatusCode::OK);
    assert_eq!(declined.json::<Value>()["status"], "declined");

    assert_eq!(
        notifier.sent(),
        vec![
            "request:ada@example.com".to_string(),
            "request:grace@example.com".to_string(),
            "confirmed:ada@example.com".to_string(),
            "declined:grace@example.com".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_second_confirmation_for_a_slot_conflicts() {
    let server = server(empty_state());
    let first = submit(&server, "Ada", "ada@example.com", monday(), "10:00").await;
    let second = submit(&server, "Grace", "grace@example.com", monday(), "10:00").await;

    assert_eq!(act(&server, &first, "confirm").await.status_code(), StatusCode::OK);

    let response = act(&server, &second, "confirm").await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "Another booking is already confirmed for this time slot"
    );

    let still_pending = server
        .get(&format!("/api/admin/bookings/{second}"))
        .await
        .json::<Value>();
    assert_eq!(still_pending["status"], "pending");
}

#[tokio::test]
async fn test_only_pending_bookings_can_be_confirmed() {
    let server = server(empty_state());
    let id = submit(&server, "Ada", "ada@example.com", monday(), "10:00").await;
    act(&server, &id, "decline").await;

    let response = act(&server, &id, "confirm").await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "Cannot confirm a booking that is declined"
    );
}

#[tokio::test]
async fn test_notes_are_overwritten_verbatim() {
    let server = server(empty_state());
    let id = submit(&server, "Ada", "ada@example.com", monday(), "10:00").await;
    let path = format!("/api/admin/bookings/{id}");

    for notes in ["Call before", "  Prefers mornings  "] {
        let response = server
            .put(&path)
            .json(&json!({ "action": "update_notes", "adminNotes": notes }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["adminNotes"], notes);
    }
}

#[tokio::test]
async fn test_admin_update_rejects_bad_input() {
    let server = server(empty_state());
    let id = submit(&server, "Ada", "ada@example.com", monday(), "10:00").await;
    let path = format!("/api/admin/bookings/{id}");

    let unknown = server.put(&path).json(&json!({ "action": "archive" })).await;
    assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        unknown.json::<Value>()["error"],
        "Invalid action. Must be: confirm, decline, or update_notes"
    );

    let missing = server.put(&path).json(&json!({})).await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

    let not_a_string = server
        .put(&path)
        .json(&json!({ "action": "update_notes", "adminNotes": 42 }))
        .await;
    assert_eq!(not_a_string.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(not_a_string.json::<Value>()["error"], "adminNotes must be a string");
}

#[tokio::test]
async fn test_unknown_booking_is_not_found() {
    let server = server(empty_state());
    let id = uuid::Uuid::new_v4();

    for response in [
        server.get(&format!("/api/admin/bookings/{id}")).await,
        act(&server, &id.to_string(), "confirm").await,
        server.delete(&format!("/api/admin/bookings/{id}")).await,
    ] {
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "Booking request not found");
    }
}

#[tokio::test]
async fn test_cancel_frees_a_confirmed_slot() {
    let server = server(empty_state());
    seed_monday(&server).await;
    let id = submit(&server, "Ada", "ada@example.com", monday(), "10:00").await;
    act(&server, &id, "confirm").await;

    let response = server.delete(&format!("/api/admin/bookings/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["booking"]["status"], "cancelled");

    let slots = server
        .get(&format!("/api/booking/slots?date={}", monday()))
        .await
        .json::<Value>();
    assert_eq!(slot_summary(&slots), (12, vec![]));

    let again = server.delete(&format!("/api/admin/bookings/{id}")).await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_puts_pending_first_and_filters() {
    let server = server(empty_state());
    let a = submit(&server, "Ada", "ada@example.com", monday(), "09:00").await;
    let b = submit(&server, "Grace", "grace@example.com", monday(), "09:30").await;
    let c = submit(&server, "Barbara", "barbara@example.com", monday(), "10:00").await;
    act(&server, &c, "confirm").await;

    let all = server.get("/api/admin/bookings").await.json::<Value>();
    let statuses: Vec<&str> = all["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["pending", "pending", "confirmed"]);

    let pending = server
        .get("/api/admin/bookings?status=pending")
        .await
        .json::<Value>();
    let ids: Vec<&str> = pending["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a.as_str()) && ids.contains(&b.as_str()));

    let explicit_all = server.get("/api/admin/bookings?status=all").await.json::<Value>();
    assert_eq!(explicit_all["bookings"].as_array().unwrap().len(), 3);

    let bad = server.get("/api/admin/bookings?status=archived").await;
    assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_contact_form_is_validated_and_forwarded() {
    let notifier = Arc::new(RecordingNotifier::default());
    let server = server(ApiState::with_store(
        Arc::new(MemoryStore::new()),
        notifier.clone(),
    ));

    let invalid = server
        .post("/api/contact")
        .json(&json!({ "name": "Ada", "email": "not-an-email" }))
        .await;
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        invalid.json::<Value>()["error"],
        "Email is invalid. Message is required"
    );

    let ok = server
        .post("/api/contact")
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }))
        .await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    assert_eq!(
        ok.json::<Value>()["message"],
        "Thank you for your message! We will be in touch within 24 hours."
    );
    assert_eq!(notifier.sent(), vec!["contact:ada@example.com".to_string()]);
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let server = server(empty_state());

    let response = server
        .post("/api/booking")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_malformed_query_is_a_json_bad_request() {
    let server = server(empty_state());

    for path in [
        "/api/booking/slots?date=2030-03-04&date=2030-03-05",
        "/api/admin/bookings?status=pending&status=confirmed",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{path}");
        let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("Invalid query string"), "{path}: {error}");
    }
}

#[tokio::test]
async fn test_health_and_version() {
    let server = server(empty_state());

    assert_eq!(server.get("/health").await.json::<Value>(), json!({ "status": "ok" }));
    assert!(server.get("/version").await.json::<Value>()["version"].is_string());
}
