#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Push request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Push endpoint rejected the message with status {0}")]
    Rejected(u16),
}
