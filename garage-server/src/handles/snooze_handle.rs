use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use garage_api::models::SnoozeRequest;
use garage_api::restful::{DeviceQuery, SnoozeStatusResponse, SnoozeSubmitQuery};
use time::OffsetDateTime;

use crate::errors::ApiError;
use crate::middlewares::{RemoteAuthState, remote_auth};
use crate::services::{SnoozeService, TokenClaims};

#[derive(Clone)]
pub struct SnoozeState {
    pub snooze_service: Arc<SnoozeService>,
}

pub fn snooze_router(snooze_state: SnoozeState, auth_state: RemoteAuthState) -> Router {
    let submit = Router::new()
        .route("/snooze", post(submit_snooze))
        .route_layer(middleware::from_fn_with_state(auth_state, remote_auth))
        .with_state(snooze_state.clone());

    let status = Router::new()
        .route("/snooze/status", get(snooze_status))
        .with_state(snooze_state);

    submit.merge(status)
}

#[utoipa::path(
    post,
    path = "/snooze",
    tag = "snooze",
    params(
        ("buildTimestamp" = String, Query, description = "Device identity"),
        ("snoozeDuration" = String, Query, description = "Window length, 0h through 12h"),
        ("snoozeEventTimestamp" = i64, Query, description = "Timestamp of the event the client sees as current")
    ),
    security(
        ("api_key" = []),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Snooze window stored", body = SnoozeRequest),
        (status = 400, description = "Disabled or invalid duration"),
        (status = 401, description = "Missing credential"),
        (status = 403, description = "Credential present but not allow-listed"),
        (status = 404, description = "Device has no current event"),
        (status = 409, description = "Client view is stale; refresh and retry"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn submit_snooze(
    Extension(_token_data): Extension<TokenClaims>,
    State(state): State<SnoozeState>,
    Query(query): Query<SnoozeSubmitQuery>,
) -> Result<Json<SnoozeRequest>, ApiError> {
    let now_seconds = OffsetDateTime::now_utc().unix_timestamp();

    let snooze = state
        .snooze_service
        .submit(
            &query.build_timestamp,
            &query.snooze_duration,
            query.snooze_event_timestamp,
            now_seconds,
        )
        .await?;

    Ok(Json(snooze))
}

pub async fn snooze_status(
    State(state): State<SnoozeState>,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<SnoozeStatusResponse>, ApiError> {
    let now_seconds = OffsetDateTime::now_utc().unix_timestamp();

    let status = state
        .snooze_service
        .status(&query.build_timestamp, now_seconds)
        .await?;

    Ok(Json(status))
}
