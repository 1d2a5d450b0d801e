use serde::{Deserialize, Serialize};

use crate::models::SensorEvent;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHistoryQuery {
    pub build_timestamp: String,
    pub count: Option<u32>,
}

/// The stored door state timeline entry for a device, mirroring the record
/// the check-in path persists.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecordResponse {
    pub build_timestamp: String,
    pub current_event: SensorEvent,
    pub previous_event: Option<SensorEvent>,
    /// Store-assigned write time of the record.
    pub recorded_at_seconds: i64,
}
