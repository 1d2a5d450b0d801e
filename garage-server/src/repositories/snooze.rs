use std::sync::Arc;

use garage_api::models::SnoozeRequest;
use sqlx::Error;
use sqlx::types::Json;

use crate::configs::Storage;
use crate::models::SnoozeRecord;

#[derive(Clone)]
pub struct SnoozeRepository {
    storage: Arc<Storage>,
}

impl SnoozeRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn save(
        &self,
        build_timestamp: &str,
        snooze: &SnoozeRequest,
        now_seconds: i64,
    ) -> Result<SnoozeRecord, Error> {
        sqlx::query(
            r#"
            INSERT INTO snoozes_current (build_timestamp, snooze, recorded_at_seconds)
            VALUES ($1, $2, $3)
            ON CONFLICT (build_timestamp) DO UPDATE SET
                snooze = excluded.snooze,
                recorded_at_seconds = excluded.recorded_at_seconds
            "#,
        )
        .bind(build_timestamp)
        .bind(Json(snooze))
        .bind(now_seconds)
        .execute(self.storage.get_pool())
        .await?;

        Ok(SnoozeRecord {
            build_timestamp: build_timestamp.to_owned(),
            snooze: Json(snooze.clone()),
            recorded_at_seconds: now_seconds,
        })
    }

    pub async fn find_current(&self, build_timestamp: &str) -> Result<Option<SnoozeRecord>, Error> {
        let record: Option<SnoozeRecord> =
            sqlx::query_as("SELECT * FROM snoozes_current WHERE build_timestamp = $1")
                .bind(build_timestamp)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(record)
    }
}
