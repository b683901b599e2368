use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    presence::entities::{AccountId, StatusCode},
    status::{database::StatusDatabase, error::StatusError},
};

pub struct InMemoryDatabase {
    pub statuses: Mutex<HashMap<AccountId, StatusCode>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        InMemoryDatabase {
            statuses: Mutex::new(HashMap::new()),
        }
    }

    /// Number of accounts observed so far.
    pub fn len(&self) -> usize {
        self.statuses.lock().map(|lock| lock.len()).unwrap_or_default()
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusDatabase for InMemoryDatabase {
    async fn get_status(&self, account_id: &AccountId) -> Result<Option<StatusCode>, StatusError> {
        let status_lock = self
            .statuses
            .lock()
            .map_err(|e| StatusError::Database(format!("Lock poisoned during status read: {}", e)))?;

        Ok(status_lock.get(account_id).copied())
    }

    async fn set_status(
        &self,
        account_id: &AccountId,
        status: StatusCode,
    ) -> Result<(), StatusError> {
        let mut status_lock = self.statuses.lock().map_err(|e| {
            StatusError::Database(format!("Lock poisoned during status update: {}", e))
        })?;

        status_lock.insert(account_id.clone(), status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_account_has_no_status() {
        let db = InMemoryDatabase::new();
        let status = db.get_status(&AccountId::new("A")).await.unwrap();
        assert_eq!(status, None);
    }

    #[tokio::test]
    async fn test_set_status_overwrites_previous() {
        let db = InMemoryDatabase::new();
        let id = AccountId::new("A");

        db.set_status(&id, StatusCode::Offline).await.unwrap();
        db.set_status(&id, StatusCode::Online).await.unwrap();

        assert_eq!(db.get_status(&id).await.unwrap(), Some(StatusCode::Online));
        assert_eq!(db.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_serialized() {
        let db = std::sync::Arc::new(InMemoryDatabase::new());

        let handles = (0..16)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    let id = AccountId::new(format!("acc-{}", i % 4));
                    db.set_status(&id, StatusCode::from(i)).await
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(db.len(), 4);
    }
}
