use super::{AuthError, CommandError, EventError, NotifierError, SnoozeError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Event error: {0}")]
    EventError(#[from] EventError),

    #[error("Command error: {0}")]
    CommandError(#[from] CommandError),

    #[error("Snooze error: {0}")]
    SnoozeError(#[from] SnoozeError),

    #[error("Notifier error: {0}")]
    NotifierError(#[from] NotifierError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
