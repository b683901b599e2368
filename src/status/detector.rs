use std::sync::Arc;
use tracing::{instrument, trace};

use super::{database::StatusDatabase, entities::Transition, error::StatusError};
use crate::presence::entities::{PresenceRecord, StatusCode};

/// Decide whether going from `prior` to the record's status is a transition.
///
/// The first observation of an account has no baseline and never is.
pub fn evaluate(prior: Option<StatusCode>, current: &PresenceRecord) -> Option<Transition> {
    let prior = prior?;
    if prior == current.status {
        return None;
    }

    Some(Transition {
        account_id: current.account_id.clone(),
        display_name: current.display_name.clone(),
        from: prior,
        to: current.status,
    })
}

pub struct ChangeDetector<D: StatusDatabase> {
    status_db: Arc<D>,
}

impl<D: StatusDatabase> ChangeDetector<D> {
    pub fn new(status_db: Arc<D>) -> Self {
        Self { status_db }
    }

    /// Compare a fresh record against the last stored status of its account.
    #[instrument(skip_all, fields(account_id = %record.account_id))]
    pub async fn detect(&self, record: &PresenceRecord) -> Result<Option<Transition>, StatusError> {
        if record.account_id.is_empty() {
            return Err(StatusError::MissingAccountId);
        }

        let prior = self.status_db.get_status(&record.account_id).await?;
        trace!(
            prior = ?prior.map(|status| status.code()),
            current = record.status.code(),
            "comparing status"
        );
        Ok(evaluate(prior, record))
    }

    /// Store the record's status as the new baseline for its account.
    pub async fn record(&self, record: &PresenceRecord) -> Result<(), StatusError> {
        if record.account_id.is_empty() {
            return Err(StatusError::MissingAccountId);
        }

        self.status_db
            .set_status(&record.account_id, record.status)
            .await
    }
}
