use std::sync::Arc;

use garage_api::models::{DoorState, SensorContact, SensorSnapshot};

use crate::configs::Door;
use crate::errors::{ApiError, EventError};
use crate::models::EventRecord;
use crate::repositories::EventRecordRepository;
use crate::services::event_interpreter::EventInterpreter;
use crate::services::notifier_service::{Notifier, notify_sensor_event};

/// Turns device reports into the persisted door state timeline.
///
/// Every confirmed state change replaces the current record and is pushed
/// to subscribers; an unchanged report still refreshes the check-in time so
/// downstream consumers can tell a quiet door from a dead device.
pub struct CheckInService {
    events: Arc<EventRecordRepository>,
    notifier: Arc<dyn Notifier>,
    interpreter: EventInterpreter,
}

impl CheckInService {
    pub fn new(events: Arc<EventRecordRepository>, notifier: Arc<dyn Notifier>, door: &Door) -> Self {
        Self {
            events,
            notifier,
            interpreter: EventInterpreter::new(door.too_long_seconds),
        }
    }

    pub async fn process_check_in(
        &self,
        build_timestamp: &str,
        snapshot: &SensorSnapshot,
        now_seconds: i64,
    ) -> Result<EventRecord, ApiError> {
        let stored = self.events.find_current(build_timestamp).await?;
        let previous = stored.as_ref().map(|record| record.current_event.0.clone());

        match self
            .interpreter
            .next_event(previous.as_ref(), snapshot, now_seconds)
        {
            Some(new_event) => {
                tracing::info!(
                    build_timestamp = build_timestamp,
                    state = ?new_event.state,
                    "door state changed"
                );

                let record = self
                    .events
                    .save(build_timestamp, &new_event, previous.as_ref(), now_seconds)
                    .await?;

                notify_sensor_event(self.notifier.as_ref(), build_timestamp, &new_event).await?;

                Ok(record)
            }
            None => {
                // Only reachable with a stored event: a first report always
                // produces one.
                let Some(existing) = stored else {
                    return Err(EventError::UnknownDevice.into());
                };

                let mut refreshed = existing.current_event.0.clone();
                refreshed.check_in_timestamp_seconds = now_seconds;

                let record = self
                    .events
                    .save(
                        build_timestamp,
                        &refreshed,
                        existing.previous_event.as_ref().map(|event| &event.0),
                        now_seconds,
                    )
                    .await?;

                notify_sensor_event(self.notifier.as_ref(), build_timestamp, &refreshed).await?;

                Ok(record)
            }
        }
    }

    /// Scheduled re-evaluation for a device that may have stopped reporting
    /// mid-motion. A door in motion last read as between the stops, so that
    /// reading is replayed against the clock; only a resulting state change
    /// is written, never a heartbeat.
    pub async fn run_sweep(
        &self,
        build_timestamp: &str,
        now_seconds: i64,
    ) -> Result<Option<EventRecord>, ApiError> {
        let Some(stored) = self.events.find_current(build_timestamp).await? else {
            return Ok(None);
        };

        let current = stored.current_event.0.clone();
        if !matches!(current.state, DoorState::Opening | DoorState::Closing) {
            return Ok(None);
        }

        let between_stops = SensorSnapshot {
            sensor_a: SensorContact::Closed,
            sensor_b: SensorContact::Closed,
            observed_at_seconds: now_seconds,
        };

        match self
            .interpreter
            .next_event(Some(&current), &between_stops, now_seconds)
        {
            Some(new_event) => {
                tracing::info!(
                    build_timestamp = build_timestamp,
                    state = ?new_event.state,
                    "sweep escalated a stalled door"
                );

                let record = self
                    .events
                    .save(build_timestamp, &new_event, Some(&current), now_seconds)
                    .await?;

                notify_sensor_event(self.notifier.as_ref(), build_timestamp, &new_event).await?;

                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
