use async_trait::async_trait;
use tracing::info;

use super::{NotificationError, NotificationGateway};
use crate::destinations::entities::DestinationId;

/// Writes every notification to the log instead of delivering it.
pub struct DummyNotificationGateway;

#[async_trait]
impl NotificationGateway for DummyNotificationGateway {
    async fn send_message(
        &self,
        destination: &DestinationId,
        text: &str,
    ) -> Result<(), NotificationError> {
        info!(%destination, "Notification: {}", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_gateway_always_succeeds() {
        let result = DummyNotificationGateway
            .send_message(&DestinationId::new("100200"), "hello")
            .await;
        assert!(result.is_ok());
    }
}
