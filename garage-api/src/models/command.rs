use serde::{Deserialize, Serialize};

/// The single remote actuation command tracked per device.
///
/// A non-empty `button_ack_token` means the command is pending: the device
/// keeps receiving it on every poll until it echoes the token back, or the
/// command times out. An empty token is the idle state, and the three flags
/// record which condition cleared it.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCommand {
    /// Correlates requests from the same client session in logs.
    pub session: String,
    pub build_timestamp: String,
    /// Client-generated nonce the device echoes back to prove execution.
    pub button_ack_token: String,
    /// Email of the requester, empty on cleared commands.
    pub requested_by: String,
    pub no_ack_token: bool,
    pub acknowledged: bool,
    pub timed_out: bool,
}

impl RemoteCommand {
    pub fn is_pending(&self) -> bool {
        !self.button_ack_token.is_empty()
    }
}
