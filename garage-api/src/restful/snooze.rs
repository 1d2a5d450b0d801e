use serde::{Deserialize, Serialize};

use crate::models::{SnoozeRequest, SnoozeStatus};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnoozeSubmitQuery {
    pub build_timestamp: String,
    /// Requested window length, one of `"0h"` through `"12h"`. Kept as a
    /// raw string so an unrecognized label yields a validation error that
    /// names the accepted values.
    pub snooze_duration: String,
    /// Timestamp of the door event the client believes is current.
    pub snooze_event_timestamp: i64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnoozeStatusResponse {
    pub status: SnoozeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snooze: Option<SnoozeRequest>,
}
