mod checkin;
mod command;
mod event;
mod snooze;

pub use checkin::*;
pub use command::*;
pub use event::*;
pub use snooze::*;

use serde::{Deserialize, Serialize};

/// Query shared by every per-device read: the firmware build timestamp is
/// the device identity.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceQuery {
    pub build_timestamp: String,
}
