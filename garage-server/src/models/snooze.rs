use garage_api::models::SnoozeRequest;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::Table;

/// The latest snooze request per device. Only the current window matters,
/// so there is no history table; an overwritten or expired window is simply
/// reinterpreted on read.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct SnoozeRecord {
    pub build_timestamp: String,
    pub snooze: Json<SnoozeRequest>,
    pub recorded_at_seconds: i64,
}

#[derive(Clone)]
pub struct SnoozeCurrentTable;

impl Table for SnoozeCurrentTable {
    fn name(&self) -> &'static str {
        "snoozes_current"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS snoozes_current (
                build_timestamp TEXT PRIMARY KEY,
                snooze JSON NOT NULL,
                recorded_at_seconds INTEGER NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS snoozes_current;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
