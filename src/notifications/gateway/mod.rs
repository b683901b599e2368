pub mod dummy;
pub mod webhook;

use async_trait::async_trait;
use thiserror::Error;

use crate::destinations::entities::DestinationId;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Failed to send notification: {0}")]
    SendFailure(String),

    #[error("Failed to initialize notification service: {0}")]
    InitializationFailed(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Deliver one text message to the given destination.
    async fn send_message(
        &self,
        destination: &DestinationId,
        text: &str,
    ) -> Result<(), NotificationError>;
}

/// Gateway chosen at startup from the notification settings.
pub enum ConfiguredNotificationGateway {
    Log(dummy::DummyNotificationGateway),
    Webhook(webhook::WebhookNotificationGateway),
}

#[async_trait]
impl NotificationGateway for ConfiguredNotificationGateway {
    async fn send_message(
        &self,
        destination: &DestinationId,
        text: &str,
    ) -> Result<(), NotificationError> {
        match self {
            Self::Log(gateway) => gateway.send_message(destination, text).await,
            Self::Webhook(gateway) => gateway.send_message(destination, text).await,
        }
    }
}
