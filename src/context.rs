use anyhow::Result;
use std::{sync::Arc, time::Duration};

use crate::{
    database::inmemory::InMemoryDatabase,
    notifications::gateway::{
        ConfiguredNotificationGateway, dummy::DummyNotificationGateway,
        webhook::WebhookNotificationGateway,
    },
    presence::steam::SteamPresenceGateway,
    settings::{NotificationSettings, Settings},
    watcher::service::WatcherService,
};

pub struct AppContext {
    pub status_db: Arc<InMemoryDatabase>,
    pub watcher_service:
        Arc<WatcherService<SteamPresenceGateway, InMemoryDatabase, ConfiguredNotificationGateway>>,
}

impl AppContext {
    /// Creates the application context from the loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let destinations = settings.resolve_destinations();
        if destinations.is_empty() {
            tracing::warn!("No destinations configured - nothing will be watched");
        }

        // Presence
        let steam_gateway = SteamPresenceGateway::new(
            &settings.steam.api_key,
            &settings.steam.base_url,
            Duration::from_secs(settings.steam.request_timeout_secs.max(1)),
        )?;

        // Notifications
        let notification_gateway = match &settings.notifications {
            NotificationSettings::Log => ConfiguredNotificationGateway::Log(DummyNotificationGateway),
            NotificationSettings::Webhook { url } => ConfiguredNotificationGateway::Webhook(
                WebhookNotificationGateway::new(url, settings.fetch_timeout())?,
            ),
        };

        let status_db = Arc::new(InMemoryDatabase::new());

        let watcher_service = WatcherService::new(
            Arc::new(steam_gateway),
            status_db.clone(),
            Arc::new(notification_gateway),
            destinations,
            settings.poll_interval(),
            settings.fetch_timeout(),
        );

        Ok(Self {
            status_db,
            watcher_service: Arc::new(watcher_service),
        })
    }
}
