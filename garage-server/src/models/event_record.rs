use garage_api::models::SensorEvent;
use garage_api::restful::EventRecordResponse;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::Table;

/// The door state timeline entry for one device: the confirmed current
/// event plus the event it replaced. Written as a whole document on every
/// save; the store stamps `recorded_at_seconds`.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub build_timestamp: String,
    pub current_event: Json<SensorEvent>,
    pub previous_event: Option<Json<SensorEvent>>,
    pub recorded_at_seconds: i64,
}

impl From<EventRecord> for EventRecordResponse {
    fn from(record: EventRecord) -> Self {
        Self {
            build_timestamp: record.build_timestamp,
            current_event: record.current_event.0,
            previous_event: record.previous_event.map(|event| event.0),
            recorded_at_seconds: record.recorded_at_seconds,
        }
    }
}

#[derive(Clone)]
pub struct EventCurrentTable;

impl Table for EventCurrentTable {
    fn name(&self) -> &'static str {
        "events_current"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS events_current (
                build_timestamp TEXT PRIMARY KEY,
                current_event JSON NOT NULL,
                previous_event JSON,
                recorded_at_seconds INTEGER NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS events_current;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}

#[derive(Clone)]
pub struct EventHistoryTable;

impl Table for EventHistoryTable {
    fn name(&self) -> &'static str {
        "events_history"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS events_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                build_timestamp TEXT NOT NULL,
                current_event JSON NOT NULL,
                previous_event JSON,
                recorded_at_seconds INTEGER NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS events_history;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
