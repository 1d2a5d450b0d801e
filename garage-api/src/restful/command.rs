use serde::{Deserialize, Serialize};

use crate::models::RemoteCommand;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushCommandQuery {
    pub build_timestamp: String,
    /// Client nonce for this command. Requests without one proceed with an
    /// empty token, which the device cannot acknowledge.
    pub button_ack_token: Option<String>,
    pub session: Option<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollCommandQuery {
    pub build_timestamp: String,
    /// Token of the last command the device executed, if any.
    pub button_ack_token: Option<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCommandResponse {
    #[serde(flatten)]
    pub command: RemoteCommand,
    /// Store-assigned write time of the record.
    pub recorded_at_seconds: i64,
}
