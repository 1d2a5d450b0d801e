use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use garage_api::restful::{DeviceQuery, EventHistoryQuery, EventRecordResponse};

use crate::errors::{ApiError, EventError};
use crate::repositories::EventRecordRepository;

const DEFAULT_HISTORY_COUNT: u32 = 20;
const MAX_HISTORY_COUNT: u32 = 100;

#[derive(Clone)]
pub struct EventState {
    pub event_repository: Arc<EventRecordRepository>,
}

pub fn event_router(state: EventState) -> Router {
    Router::new()
        .route("/events/current", get(get_current_event))
        .route("/events/history", get(get_event_history))
        .with_state(state)
}

pub async fn get_current_event(
    State(state): State<EventState>,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<EventRecordResponse>, ApiError> {
    let record = state
        .event_repository
        .find_current(&query.build_timestamp)
        .await?
        .ok_or(EventError::UnknownDevice)?;

    Ok(Json(record.into()))
}

pub async fn get_event_history(
    State(state): State<EventState>,
    Query(query): Query<EventHistoryQuery>,
) -> Result<Json<Vec<EventRecordResponse>>, ApiError> {
    let count = query
        .count
        .unwrap_or(DEFAULT_HISTORY_COUNT)
        .min(MAX_HISTORY_COUNT);

    let records = state
        .event_repository
        .find_recent(&query.build_timestamp, count)
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
