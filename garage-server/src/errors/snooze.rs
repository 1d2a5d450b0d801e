use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SnoozeError {
    #[error("Snooze notifications are disabled")]
    Disabled,

    #[error("Invalid snooze duration: {0}. Must be one of 0h through 12h")]
    InvalidDuration(String),

    #[error("No current event")]
    NoCurrentEvent,

    #[error("Snooze event timestamp does not match current event timestamp")]
    EventTimestampMismatch,
}

impl SnoozeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SnoozeError::Disabled => StatusCode::BAD_REQUEST,
            SnoozeError::InvalidDuration(_) => StatusCode::BAD_REQUEST,
            SnoozeError::NoCurrentEvent => StatusCode::NOT_FOUND,
            SnoozeError::EventTimestampMismatch => StatusCode::CONFLICT,
        }
    }
}
