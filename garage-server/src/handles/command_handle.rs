use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use garage_api::restful::{PollCommandQuery, PushCommandQuery, RemoteCommandResponse};
use time::OffsetDateTime;

use crate::errors::ApiError;
use crate::middlewares::{RemoteAuthState, remote_auth};
use crate::services::{CommandService, TokenClaims};

#[derive(Clone)]
pub struct CommandState {
    pub command_service: Arc<CommandService>,
}

pub fn command_router(command_state: CommandState, auth_state: RemoteAuthState) -> Router {
    let push = Router::new()
        .route("/commands", post(push_command))
        .route_layer(middleware::from_fn_with_state(auth_state, remote_auth))
        .with_state(command_state.clone());

    let poll = Router::new()
        .route("/commands/poll", get(poll_command))
        .with_state(command_state);

    push.merge(poll)
}

#[utoipa::path(
    post,
    path = "/commands",
    tag = "command",
    params(
        ("buildTimestamp" = String, Query, description = "Device identity"),
        ("buttonAckToken" = Option<String>, Query, description = "Client nonce the device echoes back"),
        ("session" = Option<String>, Query, description = "Client session id for log correlation")
    ),
    security(
        ("api_key" = []),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Command stored and pending", body = RemoteCommandResponse),
        (status = 400, description = "Remote actuation disabled"),
        (status = 401, description = "Missing credential"),
        (status = 403, description = "Credential present but not allow-listed"),
        (status = 409, description = "A command was written too recently"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn push_command(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<CommandState>,
    Query(query): Query<PushCommandQuery>,
) -> Result<Json<RemoteCommandResponse>, ApiError> {
    let now_seconds = OffsetDateTime::now_utc().unix_timestamp();

    let record = state
        .command_service
        .request_push(
            &query.build_timestamp,
            &token_data.email,
            query.button_ack_token,
            query.session,
            now_seconds,
        )
        .await?;

    Ok(Json(record.into()))
}

/// Device-side half of the command channel. The device has no push channel
/// of its own, so it polls and echoes back the token of the command it
/// executed.
pub async fn poll_command(
    State(state): State<CommandState>,
    Query(query): Query<PollCommandQuery>,
) -> Result<Json<RemoteCommandResponse>, ApiError> {
    let now_seconds = OffsetDateTime::now_utc().unix_timestamp();

    let record = state
        .command_service
        .device_poll(
            &query.build_timestamp,
            query.button_ack_token.as_deref(),
            now_seconds,
        )
        .await?;

    Ok(Json(record.into()))
}
