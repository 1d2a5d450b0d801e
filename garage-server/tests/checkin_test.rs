use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use time::OffsetDateTime;
use tower::ServiceExt;

use garage_api::models::SensorEvent;

use crate::common::mock_app::MockApp;

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_first_checkin_creates_closed_event() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin?buildTimestamp=device-1&sensorA=0&sensorB=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["currentEvent"]["type"], "CLOSED");
    assert!(body["previousEvent"].is_null());

    let published = app.notifier.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, "door_open-device-1");
}

#[tokio::test]
async fn test_conflict_reading_is_reportable_data() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin?buildTimestamp=device-1&sensorA=0&sensorB=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["currentEvent"]["type"], "ERROR_SENSOR_CONFLICT");
}

#[tokio::test]
async fn test_state_change_keeps_previous_event() {
    let app = MockApp::new().await;

    let closed = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin?buildTimestamp=device-1&sensorA=0&sensorB=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(closed.status(), StatusCode::OK);

    let opened = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin?buildTimestamp=device-1&sensorA=1&sensorB=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(opened.status(), StatusCode::OK);

    let body = body_json(opened).await;
    assert_eq!(body["currentEvent"]["type"], "OPEN");
    assert_eq!(body["previousEvent"]["type"], "CLOSED");

    assert_eq!(app.notifier.published().len(), 2);
}

#[tokio::test]
async fn test_unchanged_reading_refreshes_check_in_time() {
    let app = MockApp::new().await;

    let first = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin?buildTimestamp=device-1&sensorA=0&sensorB=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let first_body = body_json(first).await;
    let state_changed_at = first_body["currentEvent"]["timestampSeconds"].as_i64().unwrap();

    let second = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin?buildTimestamp=device-1&sensorA=0&sensorB=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    let second_body = body_json(second).await;
    assert_eq!(second_body["currentEvent"]["type"], "CLOSED");
    assert_eq!(
        second_body["currentEvent"]["timestampSeconds"].as_i64().unwrap(),
        state_changed_at
    );

    let check_in = second_body["currentEvent"]["checkInTimestampSeconds"]
        .as_i64()
        .unwrap();
    assert!(check_in >= state_changed_at);

    // The heartbeat still notifies so subscribers can track liveness.
    assert_eq!(app.notifier.published().len(), 2);
}

#[tokio::test]
async fn test_malformed_sensor_value_is_client_error() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin?buildTimestamp=device-1&sensorA=2&sensorB=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sweep_escalates_stalled_closing() {
    let app = MockApp::new().await;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    // The device reported a closing door two minutes ago and went silent.
    let closing = SensorEvent::closing(now - 120);
    app.event_repository
        .save("device-1", &closing, None, now - 120)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin/sweep?buildTimestamp=device-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["currentEvent"]["type"], "CLOSING_TOO_LONG");
    assert_eq!(body["previousEvent"]["type"], "CLOSING");

    assert_eq!(app.notifier.published().len(), 1);
}

#[tokio::test]
async fn test_sweep_never_writes_heartbeats() {
    let app = MockApp::new().await;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let closed = SensorEvent::closed(now - 120);
    app.event_repository
        .save("device-1", &closed, None, now - 120)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin/sweep?buildTimestamp=device-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.is_null());

    // The stored record was not touched and nothing was published.
    let stored = app
        .event_repository
        .find_current("device-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.recorded_at_seconds, now - 120);
    assert!(app.notifier.published().is_empty());
}

#[tokio::test]
async fn test_sweep_on_unknown_device_is_a_noop() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkin/sweep?buildTimestamp=ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.is_null());
}
