use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Remote actuation is disabled")]
    Disabled,

    #[error("Conflict (too many recent requests)")]
    TooSoon,
}

impl CommandError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CommandError::Disabled => StatusCode::BAD_REQUEST,
            CommandError::TooSoon => StatusCode::CONFLICT,
        }
    }
}
