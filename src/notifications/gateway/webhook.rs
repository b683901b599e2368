use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{NotificationError, NotificationGateway};
use crate::destinations::entities::DestinationId;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    destination: &'a str,
    content: &'a str,
}

/// Posts each notification as JSON to a single webhook URL, leaving the
/// routing to `destination` up to the receiver.
pub struct WebhookNotificationGateway {
    client: Client,
    url: String,
}

impl WebhookNotificationGateway {
    pub fn new(url: &str, request_timeout: Duration) -> Result<Self, NotificationError> {
        if url.is_empty() {
            return Err(NotificationError::InitializationFailed(
                "Webhook url is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| NotificationError::InitializationFailed(err.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl NotificationGateway for WebhookNotificationGateway {
    #[instrument(skip_all, fields(destination = %destination))]
    async fn send_message(
        &self,
        destination: &DestinationId,
        text: &str,
    ) -> Result<(), NotificationError> {
        let payload = WebhookPayload {
            destination: destination.as_str(),
            content: text,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(NotificationError::SendFailure(format!(
                "Webhook responded with status {}",
                response.status()
            )));
        }

        debug!("Webhook response: {:?}", response.status());
        Ok(())
    }
}

impl From<reqwest::Error> for NotificationError {
    fn from(err: reqwest::Error) -> Self {
        NotificationError::SendFailure(format!("Webhook error: {}", err))
    }
}
