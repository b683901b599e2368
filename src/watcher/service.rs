use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::error::WatchError;
use crate::{
    destinations::entities::{Destination, DestinationId},
    notifications::{gateway::NotificationGateway, service::NotificationService},
    presence::gateway::PresenceGateway,
    status::{database::StatusDatabase, detector::ChangeDetector, error::StatusError},
};

/// Counters of a single poll cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub destinations_polled: usize,
    pub destinations_skipped: usize,
    pub destinations_failed: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

#[derive(Debug, Default)]
struct DestinationOutcome {
    notifications_sent: usize,
    notifications_failed: usize,
}

pub struct WatcherService<P, D, G>
where
    P: PresenceGateway + 'static,
    D: StatusDatabase + 'static,
    G: NotificationGateway + 'static,
{
    presence_gateway: Arc<P>,
    change_detector: ChangeDetector<D>,
    notification_service: NotificationService<G>,
    destinations: Vec<Destination>,
    poll_interval: Duration,
    fetch_timeout: Duration,
    misconfigured: Mutex<HashSet<DestinationId>>,
}

impl<P, D, G> WatcherService<P, D, G>
where
    P: PresenceGateway + 'static,
    D: StatusDatabase + 'static,
    G: NotificationGateway + 'static,
{
    pub fn new(
        presence_gateway: Arc<P>,
        status_db: Arc<D>,
        notification_gateway: Arc<G>,
        destinations: Vec<Destination>,
        poll_interval: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            presence_gateway,
            change_detector: ChangeDetector::new(status_db),
            notification_service: NotificationService::new(notification_gateway),
            destinations,
            poll_interval,
            fetch_timeout,
            misconfigured: Mutex::new(HashSet::new()),
        }
    }

    /// Spawn the background task that polls until `cancel` fires.
    pub fn spawn_watcher(self: Arc<Self>, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }

    #[instrument(skip_all)]
    pub async fn run(&self, cancel: CancellationToken) {
        info!(
            destinations = self.destinations.len(),
            interval = ?self.poll_interval,
            "Starting presence watcher"
        );
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let report = self.run_cycle(&cancel).await;
            debug!(?report, "Poll cycle finished");
        }

        info!("Presence watcher stopped");
    }

    /// Run one poll cycle over all destinations.
    ///
    /// Failures are isolated per destination; the cycle stops early only when
    /// `cancel` fires.
    #[instrument(skip_all)]
    pub async fn run_cycle(&self, cancel: &CancellationToken) -> CycleReport {
        let mut report = CycleReport::default();

        for destination in &self.destinations {
            if cancel.is_cancelled() {
                break;
            }

            match self.process_destination(destination, cancel).await {
                Ok(outcome) => {
                    report.destinations_polled += 1;
                    report.notifications_sent += outcome.notifications_sent;
                    report.notifications_failed += outcome.notifications_failed;
                }
                Err(WatchError::Cancelled) => {
                    debug!(destination = %destination.id, "Fetch abandoned on shutdown");
                    break;
                }
                Err(WatchError::Configuration(reason)) => {
                    self.warn_misconfigured(&destination.id, &reason);
                    report.destinations_skipped += 1;
                }
                Err(e) => {
                    error!(destination = %destination.id, error = %e, "Failed to check destination");
                    report.destinations_failed += 1;
                }
            }
        }

        report
    }

    #[instrument(skip_all, fields(destination = %destination.id))]
    async fn process_destination(
        &self,
        destination: &Destination,
        cancel: &CancellationToken,
    ) -> Result<DestinationOutcome, WatchError> {
        if destination.accounts().is_empty() {
            return Err(WatchError::Configuration("empty watch list".to_string()));
        }
        if !self.presence_gateway.is_configured() {
            return Err(WatchError::Configuration(
                "missing presence API credential".to_string(),
            ));
        }

        let fetch = timeout(
            self.fetch_timeout,
            self.presence_gateway.fetch_presence(destination.accounts()),
        );
        let records = tokio::select! {
            _ = cancel.cancelled() => return Err(WatchError::Cancelled),
            result = fetch => result.map_err(|_| WatchError::Timeout(self.fetch_timeout))??,
        };

        let mut outcome = DestinationOutcome::default();
        for record in records {
            let transition = match self.change_detector.detect(&record).await {
                Ok(transition) => transition,
                Err(StatusError::MissingAccountId) => {
                    warn!("Skipping presence record without account id");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if let Some(transition) = transition {
                match self
                    .notification_service
                    .send_transition_notification(&destination.id, &transition)
                    .await
                {
                    Ok(()) => outcome.notifications_sent += 1,
                    Err(e) => {
                        // The new status is still recorded below so the change is not re-sent.
                        warn!(
                            account_id = %transition.account_id,
                            error = %WatchError::from(e),
                            "Failed to deliver status change"
                        );
                        outcome.notifications_failed += 1;
                    }
                }
            }

            self.change_detector.record(&record).await?;
        }

        Ok(outcome)
    }

    fn warn_misconfigured(&self, destination: &DestinationId, reason: &str) {
        let Ok(mut misconfigured) = self.misconfigured.lock() else {
            warn!(%destination, "Skipping destination: {}", reason);
            return;
        };

        if misconfigured.insert(destination.clone()) {
            warn!(%destination, "Skipping destination: {}", reason);
        }
    }
}
