use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unauthorized (key)")]
    MissingApiKey,

    #[error("Forbidden (key)")]
    ApiKeyRejected,

    #[error("Unauthorized (token)")]
    MissingToken,

    #[error("Unauthorized (token)")]
    InvalidToken,

    #[error("Forbidden (user)")]
    NotAuthorized,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingApiKey => StatusCode::UNAUTHORIZED,
            AuthError::ApiKeyRejected => StatusCode::FORBIDDEN,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::NotAuthorized => StatusCode::FORBIDDEN,
        }
    }
}
