use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::{book, build_app, get, post, post_json, send};

#[tokio::test]
async fn test_home() {
    let app = build_app();

    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello" }));
}

#[tokio::test]
async fn test_book_appointment() {
    let app = build_app();

    let (status, body) = send(&app, book("2023-09-08", "10:00 AM")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Appointment booked successfully. Appointment id is 9.",
            "status_code": 200,
        })
    );
}

#[tokio::test]
async fn test_book_appointment_again() {
    let app = build_app();

    send(&app, book("2023-09-15", "10:00 AM")).await;
    let (status, body) = send(&app, book("2023-09-15", "10:00 AM")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Slot is not available." }));
}

#[tokio::test]
async fn test_book_appointment_invalid_slot() {
    let app = build_app();

    let (status, body) = send(&app, book("2023-09-01", "10:00 AM")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Slot not found." }));
}

#[rstest]
#[case(json!({ "date": "2023-09-15", "time": "25:00" }), "Invalid time format")]
#[case(json!({ "date": "2023-09-15" }), "Invalid time format")]
#[case(json!({ "date": "15/09/2023", "time": "10:00 AM" }), "Invalid date format")]
#[case(json!({ "time": "10:00 AM" }), "Invalid date format")]
#[case(json!({ "date": 20230915, "time": "10:00 AM" }), "Invalid date format")]
#[case(json!({ "date": "2023-09-15", "time": 1000 }), "Invalid time format")]
#[case(json!({ "date": "2023-09-15", "time": null }), "Invalid time format")]
#[tokio::test]
async fn test_book_appointment_invalid_input(
    #[case] payload: serde_json::Value,
    #[case] message: &str,
) {
    let app = build_app();

    let (status, body) = send(&app, post_json("/book_appointment/", payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": message }));
}

#[tokio::test]
async fn test_book_appointment_malformed_body() {
    let app = build_app();

    let request = Request::builder()
        .method("POST")
        .uri("/book_appointment/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("date=2023-09-15"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Malformed request"));

    // no JSON content type at all
    let (status, body) = send(&app, post("/book_appointment/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Malformed request"));
}

#[tokio::test]
async fn test_invalid_input_does_not_touch_registry() {
    let app = build_app();

    // date is malformed but the time matches slot 1; nothing may be booked
    send(&app, book("2023-9-15x", "10:00 AM")).await;

    let (status, _) = send(&app, book("2023-09-15", "10:00 AM")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_check_availability() {
    let app = build_app();

    let (status, body) = send(
        &app,
        get("/check_availability?date=2023-09-15&time=11:00%20AM"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Slot is available", "status_code": 200 })
    );
}

#[tokio::test]
async fn test_check_availability_booked_and_missing() {
    let app = build_app();
    send(&app, book("2023-09-14", "10:00 AM")).await;

    let (status, body) = send(
        &app,
        get("/check_availability?date=2023-09-14&time=10:00+AM"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Slot is not available." }));

    let (status, body) = send(
        &app,
        get("/check_availability?date=2023-09-01&time=10:00+AM"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Slot not found." }));
}

#[tokio::test]
async fn test_check_availability_invalid_input() {
    let app = build_app();

    let (status, body) = send(&app, get("/check_availability?date=2023-09-15")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid time format" }));

    let (status, body) = send(
        &app,
        get("/check_availability?date=yesterday&time=10:00%20AM"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid date format" }));
}

#[tokio::test]
async fn test_check_availability_malformed_query() {
    let app = build_app();

    let (status, body) = send(
        &app,
        get("/check_availability?date=2023-09-15&date=2023-09-14&time=10:00%20AM"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Malformed request"));
}

#[tokio::test]
async fn test_cancel_appointment() {
    let app = build_app();
    send(&app, book("2023-09-15", "10:00 AM")).await;

    let (status, body) = send(&app, post("/cancel_appointment/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Appointment canceled successfully.",
            "status_code": 200,
        })
    );

    let (status, body) = send(&app, post("/cancel_appointment/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Slot not found." }));
}

#[rstest]
#[case("/cancel_appointment/1")]
#[case("/cancel_appointment/404")]
#[case("/cancel_appointment/abc")]
#[tokio::test]
async fn test_cancel_appointment_invalid(#[case] uri: &str) {
    let app = build_app();

    let (status, body) = send(&app, post(uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Slot not found." }));
}

#[tokio::test]
async fn test_list_appointments() {
    let app = build_app();
    send(&app, book("2023-09-15", "11:00 AM")).await;

    let (status, body) = send(&app, get("/list_appointments")).await;

    assert_eq!(status, StatusCode::OK);
    let slots = body.as_array().expect("expected a JSON array");
    assert_eq!(slots.len(), 11);
    for slot in slots {
        assert!(slot.get("id").is_some());
        assert!(slot.get("date").is_some());
        assert!(slot.get("time").is_some());
        assert!(slot.get("available").is_some());
    }
    assert_eq!(
        slots[1],
        json!({ "id": 2, "date": "2023-09-15", "time": "11:00 AM", "available": false })
    );
}

#[tokio::test]
async fn test_booking_walkthrough() {
    let app = build_app();

    let (status, _) = send(
        &app,
        get("/check_availability?date=2023-09-15&time=11:00%20AM"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, book("2023-09-15", "11:00 AM")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Appointment booked successfully. Appointment id is 2."
    );

    let (status, body) = send(&app, book("2023-09-15", "11:00 AM")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Slot is not available.");

    let (status, _) = send(&app, post("/cancel_appointment/2")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, post("/cancel_appointment/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Slot not found.");
}

#[tokio::test]
async fn test_health_and_version() {
    let app = build_app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "slots": 11 }));

    let (status, body) = send(&app, get("/version")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["version"].is_string());
}
