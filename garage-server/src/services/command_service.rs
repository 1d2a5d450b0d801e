use std::sync::Arc;

use garage_api::models::RemoteCommand;
use uuid::Uuid;

use crate::configs::Remote;
use crate::errors::{ApiError, CommandError};
use crate::models::CommandRecord;
use crate::repositories::RemoteCommandRepository;

/// Arbitrates the single outstanding actuation command per device.
///
/// Three parties race on the stored record: the requester submitting, the
/// device polling, and the clock expiring stale commands. The record is
/// read then rewritten without a lock; a lost race costs at most one extra
/// or one skipped actuation, which the physical door tolerates, so
/// last-write-wins is the deliberate policy here.
pub struct CommandService {
    commands: Arc<RemoteCommandRepository>,
    enabled: bool,
    min_period_seconds: i64,
    command_timeout_seconds: i64,
}

impl CommandService {
    pub fn new(commands: Arc<RemoteCommandRepository>, remote: &Remote) -> Self {
        Self {
            commands,
            enabled: remote.enabled,
            min_period_seconds: remote.min_period_seconds,
            command_timeout_seconds: remote.command_timeout_seconds,
        }
    }

    /// Accepts an actuation request from an authorized caller. Any command
    /// write younger than the minimum period blocks the request, including
    /// a fresh acknowledgment, so one button press cannot land twice on the
    /// physical opener.
    pub async fn request_push(
        &self,
        build_timestamp: &str,
        requested_by: &str,
        button_ack_token: Option<String>,
        session: Option<String>,
        now_seconds: i64,
    ) -> Result<CommandRecord, ApiError> {
        if !self.enabled {
            return Err(CommandError::Disabled.into());
        }

        if let Some(existing) = self.commands.find_current(build_timestamp).await? {
            let age_seconds = now_seconds - existing.recorded_at_seconds;
            if age_seconds < self.min_period_seconds {
                tracing::info!(
                    build_timestamp = build_timestamp,
                    age_seconds = age_seconds,
                    "rejecting remote command repeated too soon"
                );
                return Err(CommandError::TooSoon.into());
            }
        }

        let button_ack_token = button_ack_token.unwrap_or_default();
        if button_ack_token.is_empty() {
            // Accepted without a token; the device has nothing to echo back
            // and the command can only clear by timing out.
            tracing::warn!(
                build_timestamp = build_timestamp,
                "remote command issued without an ack token"
            );
        }

        let command = RemoteCommand {
            session: session.unwrap_or_else(|| Uuid::new_v4().to_string()),
            build_timestamp: build_timestamp.to_owned(),
            button_ack_token,
            requested_by: requested_by.to_owned(),
            no_ack_token: false,
            acknowledged: false,
            timed_out: false,
        };

        Ok(self.commands.save(&command, now_seconds).await?)
    }

    /// Answers a device poll with the command it should act on. The stored
    /// command is cleared to idle when there is nothing to do: no command
    /// was ever stored, the device echoed the pending token back, or the
    /// pending command went unacknowledged past the timeout.
    pub async fn device_poll(
        &self,
        build_timestamp: &str,
        observed_ack_token: Option<&str>,
        now_seconds: i64,
    ) -> Result<CommandRecord, ApiError> {
        if !self.enabled {
            return Err(CommandError::Disabled.into());
        }

        let Some(existing) = self.commands.find_current(build_timestamp).await? else {
            // Never commanded: park an explicit idle marker so the poll
            // always returns a concrete record.
            let acknowledged = observed_ack_token == Some("");
            let idle = Self::cleared_command(
                Uuid::new_v4().to_string(),
                build_timestamp,
                true,
                acknowledged,
                false,
            );
            return Ok(self.commands.save(&idle, now_seconds).await?);
        };

        let current = &existing.command.0;
        let acknowledged = observed_ack_token == Some(current.button_ack_token.as_str());
        let timed_out = now_seconds - existing.recorded_at_seconds > self.command_timeout_seconds
            && current.is_pending();

        if acknowledged || timed_out {
            tracing::info!(
                build_timestamp = build_timestamp,
                acknowledged = acknowledged,
                timed_out = timed_out,
                "clearing remote command"
            );

            let cleared = Self::cleared_command(
                current.session.clone(),
                build_timestamp,
                false,
                acknowledged,
                timed_out,
            );
            return Ok(self.commands.save(&cleared, now_seconds).await?);
        }

        Ok(existing)
    }

    fn cleared_command(
        session: String,
        build_timestamp: &str,
        no_ack_token: bool,
        acknowledged: bool,
        timed_out: bool,
    ) -> RemoteCommand {
        RemoteCommand {
            session,
            build_timestamp: build_timestamp.to_owned(),
            button_ack_token: String::new(),
            requested_by: String::new(),
            no_ack_token,
            acknowledged,
            timed_out,
        }
    }
}
