use serde::{Deserialize, Serialize};

use crate::models::SensorContact;

/// A device report: both contact sensor levels, raw wire values `"0"`/`"1"`.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInQuery {
    pub build_timestamp: String,
    pub sensor_a: SensorContact,
    pub sensor_b: SensorContact,
}
