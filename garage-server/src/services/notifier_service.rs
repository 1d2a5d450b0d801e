use async_trait::async_trait;
use garage_api::models::{SensorEvent, notification_topic};
use serde_json::json;

use crate::configs::Messaging;
use crate::errors::NotifierError;

/// Push delivery collaborator. The check-in path publishes every confirmed
/// state change and every heartbeat refresh to the device's topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, event: &SensorEvent) -> Result<(), NotifierError>;
}

/// Sends topic messages to the configured push endpoint.
pub struct PushNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl PushNotifier {
    pub fn new(messaging: &Messaging) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: messaging.endpoint.clone(),
            api_key: messaging.api_key.clone(),
        }
    }
}

#[async_trait]
impl Notifier for PushNotifier {
    async fn publish(&self, topic: &str, event: &SensorEvent) -> Result<(), NotifierError> {
        let message = json!({
            "message": {
                "topic": topic,
                "data": event.as_string_map(),
                "android": {
                    "collapse_key": "sensor_event_update",
                    "priority": "high",
                },
            }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifierError::Rejected(response.status().as_u16()));
        }

        tracing::debug!(topic = topic, "notification sent");

        Ok(())
    }
}

/// Publishes to the topic derived from the device identity.
pub async fn notify_sensor_event(
    notifier: &dyn Notifier,
    build_timestamp: &str,
    event: &SensorEvent,
) -> Result<(), NotifierError> {
    let topic = notification_topic(build_timestamp);

    tracing::info!(topic = %topic, state = ?event.state, "publishing door event");

    notifier.publish(&topic, event).await
}
