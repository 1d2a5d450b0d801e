use std::sync::Arc;

use garage_api::models::{SnoozeDuration, SnoozeRequest, SnoozeStatus};
use garage_api::restful::SnoozeStatusResponse;

use crate::configs::Snooze;
use crate::errors::{ApiError, SnoozeError};
use crate::repositories::{EventRecordRepository, SnoozeRepository};

/// Manages the per-device notification suppression window.
///
/// A snooze is only meaningful against the door event the user was looking
/// at, so submissions carry that event's timestamp and are refused when the
/// door has since moved; the stored window likewise stops counting the
/// moment the bound event changes.
pub struct SnoozeService {
    events: Arc<EventRecordRepository>,
    snoozes: Arc<SnoozeRepository>,
    enabled: bool,
}

impl SnoozeService {
    pub fn new(
        events: Arc<EventRecordRepository>,
        snoozes: Arc<SnoozeRepository>,
        snooze: &Snooze,
    ) -> Self {
        Self {
            events,
            snoozes,
            enabled: snooze.enabled,
        }
    }

    pub async fn submit(
        &self,
        build_timestamp: &str,
        duration_label: &str,
        event_timestamp_seconds: i64,
        now_seconds: i64,
    ) -> Result<SnoozeRequest, ApiError> {
        if !self.enabled {
            return Err(SnoozeError::Disabled.into());
        }

        let Some(stored) = self.events.find_current(build_timestamp).await? else {
            return Err(SnoozeError::NoCurrentEvent.into());
        };

        let current_event_timestamp_seconds = stored.current_event.0.timestamp_seconds;
        if current_event_timestamp_seconds != event_timestamp_seconds {
            tracing::info!(
                build_timestamp = build_timestamp,
                current = current_event_timestamp_seconds,
                requested = event_timestamp_seconds,
                "stale snooze submission"
            );
            return Err(SnoozeError::EventTimestampMismatch.into());
        }

        let duration: SnoozeDuration = duration_label
            .parse()
            .map_err(|_| SnoozeError::InvalidDuration(duration_label.to_owned()))?;

        let snooze = SnoozeRequest {
            current_event_timestamp_seconds,
            snooze_request_seconds: now_seconds,
            snooze_duration: duration,
            snooze_end_time_seconds: now_seconds + duration.seconds(),
        };

        let record = self.snoozes.save(build_timestamp, &snooze, now_seconds).await?;

        Ok(record.snooze.0)
    }

    pub async fn status(
        &self,
        build_timestamp: &str,
        now_seconds: i64,
    ) -> Result<SnoozeStatusResponse, ApiError> {
        if !self.enabled {
            return Err(SnoozeError::Disabled.into());
        }

        let none = SnoozeStatusResponse {
            status: SnoozeStatus::None,
            snooze: None,
        };

        let Some(event_record) = self.events.find_current(build_timestamp).await? else {
            return Ok(none);
        };

        let Some(snooze_record) = self.snoozes.find_current(build_timestamp).await? else {
            return Ok(none);
        };

        let snooze = snooze_record.snooze.0;

        // The door moved since this window was requested; it no longer
        // applies.
        if snooze.current_event_timestamp_seconds
            != event_record.current_event.0.timestamp_seconds
        {
            return Ok(none);
        }

        if now_seconds > snooze.snooze_end_time_seconds {
            return Ok(SnoozeStatusResponse {
                status: SnoozeStatus::Expired,
                snooze: Some(snooze),
            });
        }

        Ok(SnoozeStatusResponse {
            status: SnoozeStatus::Active,
            snooze: Some(snooze),
        })
    }
}
