use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use garage_api::models::SensorSnapshot;
use garage_api::restful::{CheckInQuery, DeviceQuery, EventRecordResponse};
use time::OffsetDateTime;

use crate::errors::ApiError;
use crate::services::CheckInService;

#[derive(Clone)]
pub struct CheckInState {
    pub checkin_service: Arc<CheckInService>,
}

pub fn checkin_router(state: CheckInState) -> Router {
    Router::new()
        .route("/checkin", post(device_check_in))
        .route("/checkin/sweep", post(run_sweep))
        .with_state(state)
}

/// Inbound device report. Unauthenticated: the device proves nothing but
/// its build timestamp, and a forged report can at worst mislabel one door.
pub async fn device_check_in(
    State(state): State<CheckInState>,
    Query(query): Query<CheckInQuery>,
) -> Result<Json<EventRecordResponse>, ApiError> {
    let now_seconds = OffsetDateTime::now_utc().unix_timestamp();

    let snapshot = SensorSnapshot {
        sensor_a: query.sensor_a,
        sensor_b: query.sensor_b,
        observed_at_seconds: now_seconds,
    };

    let record = state
        .checkin_service
        .process_check_in(&query.build_timestamp, &snapshot, now_seconds)
        .await?;

    Ok(Json(record.into()))
}

/// Periodic re-evaluation trigger, fired by an external scheduler. Returns
/// the escalated record, or `null` when the sweep had nothing to do.
pub async fn run_sweep(
    State(state): State<CheckInState>,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<Option<EventRecordResponse>>, ApiError> {
    let now_seconds = OffsetDateTime::now_utc().unix_timestamp();

    let record = state
        .checkin_service
        .run_sweep(&query.build_timestamp, now_seconds)
        .await?;

    Ok(Json(record.map(Into::into)))
}
