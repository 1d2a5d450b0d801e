use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw level of one magnetic contact sensor, as reported by the device.
///
/// A magnet at the end-stop holds the contact open, so `Open` (wire value
/// `"0"`) means the door has reached that stop.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorContact {
    #[serde(rename = "0")]
    Open,
    #[serde(rename = "1")]
    Closed,
}

/// One device report: both contact sensors plus the observation time.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    /// Contact at the fully-closed stop.
    pub sensor_a: SensorContact,
    /// Contact at the fully-open stop.
    pub sensor_b: SensorContact,
    pub observed_at_seconds: i64,
}

/// Interpreted door state. Covers the two resting positions, the two
/// in-motion phases with their stalled variants, and the fault where both
/// end-stops report at once.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoorState {
    Unknown,
    ErrorSensorConflict,
    Closed,
    Closing,
    ClosingTooLong,
    Open,
    Opening,
    OpeningTooLong,
}

/// A confirmed door state change.
///
/// `timestamp_seconds` is when the state last changed; `check_in_timestamp_seconds`
/// is when the device last reported, and advances even while the state holds.
/// A stored event always satisfies `check_in_timestamp_seconds >= timestamp_seconds`.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorEvent {
    #[serde(rename = "type")]
    pub state: DoorState,
    pub timestamp_seconds: i64,
    pub message: String,
    pub check_in_timestamp_seconds: i64,
}

impl SensorEvent {
    fn new(state: DoorState, timestamp_seconds: i64, message: &str) -> Self {
        Self {
            state,
            timestamp_seconds,
            message: message.to_owned(),
            check_in_timestamp_seconds: timestamp_seconds,
        }
    }

    pub fn unknown(timestamp_seconds: i64) -> Self {
        Self::new(DoorState::Unknown, timestamp_seconds, "No sensor data.")
    }

    pub fn error_sensor_conflict(timestamp_seconds: i64) -> Self {
        Self::new(
            DoorState::ErrorSensorConflict,
            timestamp_seconds,
            "The sensors say the door is both open and closed at the same time.",
        )
    }

    pub fn closed(timestamp_seconds: i64) -> Self {
        Self::new(DoorState::Closed, timestamp_seconds, "The door is closed.")
    }

    pub fn closing(timestamp_seconds: i64) -> Self {
        Self::new(DoorState::Closing, timestamp_seconds, "The door is closing.")
    }

    pub fn closing_too_long(timestamp_seconds: i64) -> Self {
        Self::new(
            DoorState::ClosingTooLong,
            timestamp_seconds,
            "The door was closing but never closed.",
        )
    }

    pub fn open(timestamp_seconds: i64) -> Self {
        Self::new(DoorState::Open, timestamp_seconds, "The door is open.")
    }

    pub fn opening(timestamp_seconds: i64) -> Self {
        Self::new(DoorState::Opening, timestamp_seconds, "The door is opening.")
    }

    pub fn opening_too_long(timestamp_seconds: i64) -> Self {
        Self::new(
            DoorState::OpeningTooLong,
            timestamp_seconds,
            "The door was opening but never successfully opened.",
        )
    }

    /// Flat string map used as the push notification data payload.
    pub fn as_string_map(&self) -> BTreeMap<String, String> {
        let state = match self.state {
            DoorState::Unknown => "UNKNOWN",
            DoorState::ErrorSensorConflict => "ERROR_SENSOR_CONFLICT",
            DoorState::Closed => "CLOSED",
            DoorState::Closing => "CLOSING",
            DoorState::ClosingTooLong => "CLOSING_TOO_LONG",
            DoorState::Open => "OPEN",
            DoorState::Opening => "OPENING",
            DoorState::OpeningTooLong => "OPENING_TOO_LONG",
        };

        BTreeMap::from([
            ("type".to_owned(), state.to_owned()),
            (
                "timestampSeconds".to_owned(),
                self.timestamp_seconds.to_string(),
            ),
            ("message".to_owned(), self.message.clone()),
            (
                "checkInTimestampSeconds".to_owned(),
                self.check_in_timestamp_seconds.to_string(),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors_carry_state_and_timestamps() {
        let event = SensorEvent::closed(1725781091);

        assert_eq!(event.state, DoorState::Closed);
        assert_eq!(event.timestamp_seconds, 1725781091);
        assert_eq!(event.check_in_timestamp_seconds, 1725781091);
        assert_eq!(event.message, "The door is closed.");
    }

    #[test]
    fn test_event_as_string_map() {
        let mut event = SensorEvent::closed(1725781091);
        event.check_in_timestamp_seconds = 1725781092;

        let map = event.as_string_map();

        assert_eq!(map["type"], "CLOSED");
        assert_eq!(map["timestampSeconds"], "1725781091");
        assert_eq!(map["message"], "The door is closed.");
        assert_eq!(map["checkInTimestampSeconds"], "1725781092");
    }
}
