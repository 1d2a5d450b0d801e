use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Accepted snooze lengths, whole hours from zero to twelve.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnoozeDuration {
    #[serde(rename = "0h")]
    H0,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "2h")]
    H2,
    #[serde(rename = "3h")]
    H3,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "5h")]
    H5,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "7h")]
    H7,
    #[serde(rename = "8h")]
    H8,
    #[serde(rename = "9h")]
    H9,
    #[serde(rename = "10h")]
    H10,
    #[serde(rename = "11h")]
    H11,
    #[serde(rename = "12h")]
    H12,
}

impl SnoozeDuration {
    pub const ALL: [SnoozeDuration; 13] = [
        Self::H0,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H5,
        Self::H6,
        Self::H7,
        Self::H8,
        Self::H9,
        Self::H10,
        Self::H11,
        Self::H12,
    ];

    pub fn hours(self) -> i64 {
        match self {
            Self::H0 => 0,
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
            Self::H7 => 7,
            Self::H8 => 8,
            Self::H9 => 9,
            Self::H10 => 10,
            Self::H11 => 11,
            Self::H12 => 12,
        }
    }

    pub fn seconds(self) -> i64 {
        self.hours() * 60 * 60
    }
}

impl fmt::Display for SnoozeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.hours())
    }
}

impl FromStr for SnoozeDuration {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|duration| duration.to_string() == s)
            .ok_or(())
    }
}

/// A notification suppression window, bound to the door state change that
/// was current when it was requested. The window becomes inert once its end
/// time passes or the bound event changes; it is never actively deleted.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnoozeRequest {
    pub current_event_timestamp_seconds: i64,
    pub snooze_request_seconds: i64,
    pub snooze_duration: SnoozeDuration,
    pub snooze_end_time_seconds: i64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SnoozeStatus {
    None,
    Active,
    Expired,
}
