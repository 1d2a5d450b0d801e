use garage_api::models::{DoorState, SensorContact, SensorEvent, SensorSnapshot};

/// What one snapshot says about the door, before any history is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reading {
    /// Both end-stops report at once, which is physically impossible.
    Conflict,
    AtClosedStop,
    AtOpenStop,
    /// Neither end-stop reports: the door is somewhere in between.
    Between,
}

fn classify(snapshot: &SensorSnapshot) -> Reading {
    match (snapshot.sensor_a, snapshot.sensor_b) {
        (SensorContact::Open, SensorContact::Open) => Reading::Conflict,
        (SensorContact::Open, SensorContact::Closed) => Reading::AtClosedStop,
        (SensorContact::Closed, SensorContact::Open) => Reading::AtOpenStop,
        (SensorContact::Closed, SensorContact::Closed) => Reading::Between,
    }
}

/// Turns a stream of noisy, repetitive sensor snapshots into door state
/// changes. A total function over its inputs: every failure mode is a
/// state, never an error.
#[derive(Debug, Clone, Copy)]
pub struct EventInterpreter {
    too_long_seconds: i64,
}

impl EventInterpreter {
    pub fn new(too_long_seconds: i64) -> Self {
        Self { too_long_seconds }
    }

    /// Returns the new event caused by `snapshot`, or `None` when the state
    /// holds and only the check-in time should be refreshed.
    pub fn next_event(
        &self,
        previous: Option<&SensorEvent>,
        snapshot: &SensorSnapshot,
        now_seconds: i64,
    ) -> Option<SensorEvent> {
        let reading = classify(snapshot);

        let Some(previous) = previous else {
            // First report ever: every reading produces a definite event so
            // the timeline always has an anchor.
            return Some(match reading {
                Reading::Conflict => SensorEvent::error_sensor_conflict(now_seconds),
                Reading::AtClosedStop => SensorEvent::closed(now_seconds),
                Reading::AtOpenStop => SensorEvent::open(now_seconds),
                Reading::Between => SensorEvent::unknown(now_seconds),
            });
        };

        let in_motion_seconds = now_seconds - previous.timestamp_seconds;

        match (previous.state, reading) {
            // A conflicting read always wins, except over itself.
            (DoorState::ErrorSensorConflict, Reading::Conflict) => None,
            (_, Reading::Conflict) => Some(SensorEvent::error_sensor_conflict(now_seconds)),

            // A definite end-stop read is idempotent in its own terminal
            // state and a transition from everywhere else.
            (DoorState::Closed, Reading::AtClosedStop) => None,
            (_, Reading::AtClosedStop) => Some(SensorEvent::closed(now_seconds)),
            (DoorState::Open, Reading::AtOpenStop) => None,
            (_, Reading::AtOpenStop) => Some(SensorEvent::open(now_seconds)),

            // Between the stops: the meaning depends on where the door was.
            (DoorState::Unknown, Reading::Between) => None,
            (DoorState::ErrorSensorConflict, Reading::Between) => {
                Some(SensorEvent::unknown(now_seconds))
            }
            (DoorState::Closed, Reading::Between) => Some(SensorEvent::opening(now_seconds)),
            (DoorState::Open, Reading::Between) => Some(SensorEvent::closing(now_seconds)),
            (DoorState::Opening, Reading::Between) => {
                if in_motion_seconds > self.too_long_seconds {
                    Some(SensorEvent::opening_too_long(now_seconds))
                } else {
                    None
                }
            }
            (DoorState::Closing, Reading::Between) => {
                if in_motion_seconds > self.too_long_seconds {
                    Some(SensorEvent::closing_too_long(now_seconds))
                } else {
                    None
                }
            }
            // The stalled states already said their piece; wait for an
            // end-stop to report.
            (DoorState::OpeningTooLong, Reading::Between) => None,
            (DoorState::ClosingTooLong, Reading::Between) => None,
        }
    }
}
