use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use time::OffsetDateTime;
use tower::ServiceExt;

use garage_api::models::RemoteCommand;

use crate::common::mock_app::{AUTHORIZED_EMAIL, MockApp, TEST_PUSH_KEY};

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn push_request(app: &MockApp, email: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("X-Api-Key", TEST_PUSH_KEY)
        .header("Authorization", format!("Bearer {}", app.token_for(email)))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_push_without_api_key_is_unauthorized() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/commands?buildTimestamp=device-1&buttonAckToken=tok")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_push_with_wrong_api_key_is_forbidden() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/commands?buildTimestamp=device-1&buttonAckToken=tok")
                .header("X-Api-Key", "not-the-key")
                .header(
                    "Authorization",
                    format!("Bearer {}", app.token_for(AUTHORIZED_EMAIL)),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_push_from_unlisted_email_is_forbidden() {
    let app = MockApp::new().await;

    let request = push_request(
        &app,
        "stranger@example.com",
        "/commands?buildTimestamp=device-1&buttonAckToken=tok",
    );
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The rejected request must not leave a command behind.
    assert!(
        app.command_repository
            .find_current("device-1")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_push_stores_pending_command() {
    let app = MockApp::new().await;

    let request = push_request(
        &app,
        AUTHORIZED_EMAIL,
        "/commands?buildTimestamp=device-1&buttonAckToken=tok-1&session=s-1",
    );
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["buttonAckToken"], "tok-1");
    assert_eq!(body["session"], "s-1");
    assert_eq!(body["requestedBy"], AUTHORIZED_EMAIL);
    assert_eq!(body["acknowledged"], false);
}

#[tokio::test]
async fn test_poll_returns_pending_command_unchanged() {
    let app = MockApp::new().await;

    let request = push_request(
        &app,
        AUTHORIZED_EMAIL,
        "/commands?buildTimestamp=device-1&buttonAckToken=tok-1",
    );
    app.router.clone().oneshot(request).await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/commands/poll?buildTimestamp=device-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["buttonAckToken"], "tok-1");
    assert_eq!(body["acknowledged"], false);
}

#[tokio::test]
async fn test_poll_with_matching_token_clears_command() {
    let app = MockApp::new().await;

    let request = push_request(
        &app,
        AUTHORIZED_EMAIL,
        "/commands?buildTimestamp=device-1&buttonAckToken=tok-1",
    );
    app.router.clone().oneshot(request).await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/commands/poll?buildTimestamp=device-1&buttonAckToken=tok-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["buttonAckToken"], "");
    assert_eq!(body["acknowledged"], true);
    assert_eq!(body["timedOut"], false);
}

#[tokio::test]
async fn test_repeat_push_too_soon_is_conflict() {
    let app = MockApp::new().await;

    let first = push_request(
        &app,
        AUTHORIZED_EMAIL,
        "/commands?buildTimestamp=device-1&buttonAckToken=tok-1",
    );
    app.router.clone().oneshot(first).await.unwrap();

    let second = push_request(
        &app,
        AUTHORIZED_EMAIL,
        "/commands?buildTimestamp=device-1&buttonAckToken=tok-2",
    );
    let response = app.router.clone().oneshot(second).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The earlier command survives the rejected repeat.
    let stored = app
        .command_repository
        .find_current("device-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.command.0.button_ack_token, "tok-1");
}

#[tokio::test]
async fn test_push_blocked_right_after_acknowledgment() {
    let app = MockApp::new().await;

    let push = push_request(
        &app,
        AUTHORIZED_EMAIL,
        "/commands?buildTimestamp=device-1&buttonAckToken=tok-1",
    );
    app.router.clone().oneshot(push).await.unwrap();

    app.router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/commands/poll?buildTimestamp=device-1&buttonAckToken=tok-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The acknowledgment just rewrote the record; the quiet period applies
    // to that write too, so the opener cannot be double-triggered.
    let repeat = push_request(
        &app,
        AUTHORIZED_EMAIL,
        "/commands?buildTimestamp=device-1&buttonAckToken=tok-2",
    );
    let response = app.router.clone().oneshot(repeat).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_poll_without_history_parks_idle_marker() {
    let app = MockApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/commands/poll?buildTimestamp=device-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["buttonAckToken"], "");
    assert_eq!(body["noAckToken"], true);
    assert_eq!(body["acknowledged"], false);
}

#[tokio::test]
async fn test_stale_pending_command_times_out() {
    let app = MockApp::new().await;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    // A pending command written two minutes ago, never acknowledged.
    let stale = RemoteCommand {
        session: String::from("s-1"),
        build_timestamp: String::from("device-1"),
        button_ack_token: String::from("tok-1"),
        requested_by: String::from(AUTHORIZED_EMAIL),
        no_ack_token: false,
        acknowledged: false,
        timed_out: false,
    };
    app.command_repository.save(&stale, now - 120).await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/commands/poll?buildTimestamp=device-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["buttonAckToken"], "");
    assert_eq!(body["timedOut"], true);
    assert_eq!(body["acknowledged"], false);
}
