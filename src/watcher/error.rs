use std::time::Duration;
use thiserror::Error;

use crate::{
    notifications::gateway::NotificationError, presence::gateway::PresenceGatewayError,
    status::error::StatusError,
};

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Presence fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Notification delivery failed: {0}")]
    Dispatch(String),

    #[error("Status store error: {0}")]
    Status(String),

    #[error("Cancelled")]
    Cancelled,
}

impl From<PresenceGatewayError> for WatchError {
    fn from(err: PresenceGatewayError) -> Self {
        match err {
            PresenceGatewayError::MissingCredential => WatchError::Configuration(err.to_string()),
            PresenceGatewayError::MalformedResponse(msg) => WatchError::MalformedResponse(msg),
            PresenceGatewayError::Request(_) | PresenceGatewayError::Status(_) => {
                WatchError::Upstream(err.to_string())
            }
        }
    }
}

impl From<NotificationError> for WatchError {
    fn from(err: NotificationError) -> Self {
        WatchError::Dispatch(err.to_string())
    }
}

impl From<StatusError> for WatchError {
    fn from(err: StatusError) -> Self {
        WatchError::Status(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_errors_map_to_taxonomy() {
        assert!(matches!(
            WatchError::from(PresenceGatewayError::Status(503)),
            WatchError::Upstream(_)
        ));
        assert!(matches!(
            WatchError::from(PresenceGatewayError::MalformedResponse("eof".to_string())),
            WatchError::MalformedResponse(_)
        ));
        assert!(matches!(
            WatchError::from(PresenceGatewayError::MissingCredential),
            WatchError::Configuration(_)
        ));
    }
}
