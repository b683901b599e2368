use async_trait::async_trait;

use super::entities::{AccountId, PresenceRecord};

#[derive(Debug, thiserror::Error)]
pub enum PresenceGatewayError {
    #[error("Presence request failed: {0}")]
    Request(String),
    #[error("Presence API responded with status {0}")]
    Status(u16),
    #[error("Malformed presence response: {0}")]
    MalformedResponse(String),
    #[error("No credential configured for the presence API")]
    MissingCredential,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceGateway: Send + Sync {
    /// Whether a credential is available. Callers skip fetching when this is false.
    fn is_configured(&self) -> bool;

    /// Fetch the current presence of all given accounts in a single batch.
    ///
    /// Fails the whole batch on any transport, status or decoding error.
    async fn fetch_presence(
        &self,
        account_ids: &[AccountId],
    ) -> Result<Vec<PresenceRecord>, PresenceGatewayError>;
}
