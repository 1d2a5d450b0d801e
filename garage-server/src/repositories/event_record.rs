use std::sync::Arc;

use garage_api::models::SensorEvent;
use sqlx::Error;
use sqlx::types::Json;

use crate::configs::Storage;
use crate::models::EventRecord;

/// Door state timeline store: an overwritten "current" row per device plus
/// an append-only history, both stamped with the write time.
#[derive(Clone)]
pub struct EventRecordRepository {
    storage: Arc<Storage>,
}

impl EventRecordRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn save(
        &self,
        build_timestamp: &str,
        current: &SensorEvent,
        previous: Option<&SensorEvent>,
        now_seconds: i64,
    ) -> Result<EventRecord, Error> {
        let mut transaction = self.storage.get_pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO events_current (build_timestamp, current_event, previous_event, recorded_at_seconds)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (build_timestamp) DO UPDATE SET
                current_event = excluded.current_event,
                previous_event = excluded.previous_event,
                recorded_at_seconds = excluded.recorded_at_seconds
            "#,
        )
        .bind(build_timestamp)
        .bind(Json(current))
        .bind(previous.map(Json))
        .bind(now_seconds)
        .execute(&mut *transaction)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO events_history (build_timestamp, current_event, previous_event, recorded_at_seconds)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(build_timestamp)
        .bind(Json(current))
        .bind(previous.map(Json))
        .bind(now_seconds)
        .execute(&mut *transaction)
        .await?;

        transaction.commit().await?;

        Ok(EventRecord {
            build_timestamp: build_timestamp.to_owned(),
            current_event: Json(current.clone()),
            previous_event: previous.map(|event| Json(event.clone())),
            recorded_at_seconds: now_seconds,
        })
    }

    pub async fn find_current(&self, build_timestamp: &str) -> Result<Option<EventRecord>, Error> {
        let record: Option<EventRecord> =
            sqlx::query_as("SELECT * FROM events_current WHERE build_timestamp = $1")
                .bind(build_timestamp)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(record)
    }

    /// Newest-first slice of the append-only history.
    pub async fn find_recent(
        &self,
        build_timestamp: &str,
        count: u32,
    ) -> Result<Vec<EventRecord>, Error> {
        let records: Vec<EventRecord> = sqlx::query_as(
            r#"
            SELECT build_timestamp, current_event, previous_event, recorded_at_seconds
            FROM events_history
            WHERE build_timestamp = $1
            ORDER BY recorded_at_seconds DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(build_timestamp)
        .bind(count)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(records)
    }
}
