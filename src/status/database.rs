use async_trait::async_trait;

use super::error::StatusError;
use crate::presence::entities::{AccountId, StatusCode};

/// Last observed status per account.
///
/// Implementations must serialize access so that the scheduler may call them
/// from several tasks at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusDatabase: Send + Sync {
    async fn get_status(&self, account_id: &AccountId) -> Result<Option<StatusCode>, StatusError>;

    async fn set_status(&self, account_id: &AccountId, status: StatusCode)
    -> Result<(), StatusError>;
}
