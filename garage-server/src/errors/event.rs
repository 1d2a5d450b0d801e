use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("No events recorded for this device")]
    UnknownDevice,
}

impl EventError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventError::UnknownDevice => StatusCode::NOT_FOUND,
        }
    }
}
