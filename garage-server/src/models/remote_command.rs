use garage_api::models::RemoteCommand;
use garage_api::restful::RemoteCommandResponse;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::Table;

/// The single actuation command tracked per device, stored as one document
/// so a save can never leave a half-written command behind.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommandRecord {
    pub build_timestamp: String,
    pub command: Json<RemoteCommand>,
    pub recorded_at_seconds: i64,
}

impl From<CommandRecord> for RemoteCommandResponse {
    fn from(record: CommandRecord) -> Self {
        Self {
            command: record.command.0,
            recorded_at_seconds: record.recorded_at_seconds,
        }
    }
}

#[derive(Clone)]
pub struct CommandCurrentTable;

impl Table for CommandCurrentTable {
    fn name(&self) -> &'static str {
        "commands_current"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS commands_current (
                build_timestamp TEXT PRIMARY KEY,
                command JSON NOT NULL,
                recorded_at_seconds INTEGER NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS commands_current;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}

#[derive(Clone)]
pub struct CommandHistoryTable;

impl Table for CommandHistoryTable {
    fn name(&self) -> &'static str {
        "commands_history"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS commands_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                build_timestamp TEXT NOT NULL,
                command JSON NOT NULL,
                recorded_at_seconds INTEGER NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS commands_history;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
