use std::sync::Arc;

use garage_api::models::RemoteCommand;
use sqlx::Error;
use sqlx::types::Json;

use crate::configs::Storage;
use crate::models::CommandRecord;

#[derive(Clone)]
pub struct RemoteCommandRepository {
    storage: Arc<Storage>,
}

impl RemoteCommandRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn save(
        &self,
        command: &RemoteCommand,
        now_seconds: i64,
    ) -> Result<CommandRecord, Error> {
        let mut transaction = self.storage.get_pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO commands_current (build_timestamp, command, recorded_at_seconds)
            VALUES ($1, $2, $3)
            ON CONFLICT (build_timestamp) DO UPDATE SET
                command = excluded.command,
                recorded_at_seconds = excluded.recorded_at_seconds
            "#,
        )
        .bind(&command.build_timestamp)
        .bind(Json(command))
        .bind(now_seconds)
        .execute(&mut *transaction)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO commands_history (build_timestamp, command, recorded_at_seconds)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&command.build_timestamp)
        .bind(Json(command))
        .bind(now_seconds)
        .execute(&mut *transaction)
        .await?;

        transaction.commit().await?;

        Ok(CommandRecord {
            build_timestamp: command.build_timestamp.clone(),
            command: Json(command.clone()),
            recorded_at_seconds: now_seconds,
        })
    }

    pub async fn find_current(&self, build_timestamp: &str) -> Result<Option<CommandRecord>, Error> {
        let record: Option<CommandRecord> =
            sqlx::query_as("SELECT * FROM commands_current WHERE build_timestamp = $1")
                .bind(build_timestamp)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(record)
    }
}
