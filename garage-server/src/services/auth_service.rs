use crate::configs::Remote;
use crate::errors::AuthError;

/// Deployment-level authorization: an API key shared by trusted clients,
/// plus an allow-list of user emails permitted to actuate the door.
#[derive(Clone)]
pub struct AuthService {
    push_key: String,
    authorized_emails: Vec<String>,
}

impl AuthService {
    pub fn new(remote: &Remote) -> Self {
        Self {
            push_key: remote.push_key.clone(),
            authorized_emails: remote.authorized_emails.clone(),
        }
    }

    /// Missing credential and wrong credential are distinct failures so the
    /// caller can tell a misconfigured client from a rejected one.
    pub fn verify_api_key(&self, presented: Option<&str>) -> Result<(), AuthError> {
        match presented {
            None | Some("") => Err(AuthError::MissingApiKey),
            Some(key) if key == self.push_key => Ok(()),
            Some(_) => Err(AuthError::ApiKeyRejected),
        }
    }

    pub fn is_authorized(&self, email: &str) -> bool {
        self.authorized_emails
            .iter()
            .any(|authorized| authorized == email)
    }
}
