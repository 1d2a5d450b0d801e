use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auth {
    pub secret: String,
    pub expiration: u64,
}

/// Door motion interpretation thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    /// Seconds a door may stay in motion before the stalled state fires.
    pub too_long_seconds: i64,
}

/// Remote actuation channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remote {
    pub enabled: bool,
    /// Deployment-wide API key presented in the `X-Api-Key` header.
    pub push_key: String,
    /// Emails allowed to issue actuation commands and snoozes.
    pub authorized_emails: Vec<String>,
    /// Minimum seconds between accepted command writes, so the physical
    /// actuator cannot be double-triggered.
    pub min_period_seconds: i64,
    /// Seconds after which an unacknowledged command is abandoned.
    pub command_timeout_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snooze {
    pub enabled: bool,
}

/// Push notification delivery endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messaging {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    pub auth: Auth,
    pub door: Door,
    pub remote: Remote,
    pub snooze: Snooze,
    pub messaging: Messaging,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::default().separator("_"))
            .build()?
            .try_deserialize()
    }
}
