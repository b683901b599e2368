use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::destinations::{
    entities::{Destination, DestinationId},
    parser::{merge_destination, parse_destination_lines},
};
use crate::presence::entities::AccountId;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STEAM_BASE_URL: &str = "https://api.steampowered.com";

#[derive(Debug, Clone, Deserialize)]
pub struct SteamSettings {
    #[serde(default)]
    pub api_key: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationSettings {
    pub id: String,
    #[serde(default)]
    pub accounts: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum NotificationSettings {
    Log,
    Webhook { url: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub poll_interval_secs: u64,
    pub fetch_timeout_secs: u64,
    pub steam: SteamSettings,
    #[serde(default)]
    pub destinations: Vec<DestinationSettings>,
    /// Destinations in `destination:id1,id2` lines, merged with `destinations`.
    #[serde(default)]
    pub group_config: Option<String>,
    pub notifications: NotificationSettings,
}

impl Settings {
    pub fn load() -> Result<Settings, ConfigError> {
        let settings = Self::builder()?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("PRESENCE_WATCH").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
        let settings = Self::builder()?
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix("PRESENCE_WATCH").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("poll_interval_secs", DEFAULT_POLL_INTERVAL_SECS)?
            .set_default("fetch_timeout_secs", DEFAULT_FETCH_TIMEOUT_SECS)?
            .set_default("steam.base_url", DEFAULT_STEAM_BASE_URL)?
            .set_default("steam.request_timeout_secs", DEFAULT_FETCH_TIMEOUT_SECS)?
            .set_default("notifications.type", "log")
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    /// All configured destinations, structured entries first, then the ones
    /// from `group_config`. Destinations with the same id are merged.
    pub fn resolve_destinations(&self) -> Vec<Destination> {
        let mut destinations = Vec::new();

        for entry in &self.destinations {
            let destination_id = entry.id.trim();
            if destination_id.is_empty() {
                tracing::warn!(accounts = ?entry.accounts, "Skipping destination without id");
                continue;
            }

            let accounts = entry
                .accounts
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(AccountId::from);
            merge_destination(
                &mut destinations,
                Destination::new(DestinationId::new(destination_id), accounts),
            );
        }

        if let Some(group_config) = &self.group_config {
            for destination in parse_destination_lines(group_config) {
                merge_destination(&mut destinations, destination);
            }
        }

        destinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        Settings::builder()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_are_applied() {
        let settings = from_toml(
            r#"
            [steam]
            api_key = "secret"
            "#,
        );

        assert_eq!(settings.poll_interval(), Duration::from_secs(60));
        assert_eq!(settings.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(settings.steam.base_url, DEFAULT_STEAM_BASE_URL);
        assert!(matches!(settings.notifications, NotificationSettings::Log));
        assert!(settings.resolve_destinations().is_empty());
    }

    #[test]
    fn test_destinations_are_merged_from_both_sources() {
        let settings = from_toml(
            r#"
            poll_interval_secs = 30
            group_config = """
            100200:B,C
            other-dest:D
            """

            [steam]
            api_key = "secret"

            [[destinations]]
            id = "100200"
            accounts = ["A", "B"]

            [notifications]
            type = "webhook"
            url = "http://localhost:8080/hook"
            "#,
        );

        let destinations = settings.resolve_destinations();

        assert_eq!(settings.poll_interval(), Duration::from_secs(30));
        assert_eq!(destinations.len(), 2);
        assert_eq!(destinations[0].id, DestinationId::new("100200"));
        assert_eq!(
            destinations[0].accounts(),
            &[AccountId::new("A"), AccountId::new("B"), AccountId::new("C")]
        );
        assert_eq!(destinations[1].id, DestinationId::new("other-dest"));
        assert!(matches!(
            settings.notifications,
            NotificationSettings::Webhook { .. }
        ));
    }

    #[test]
    fn test_destination_with_empty_watch_list_is_kept() {
        let settings = from_toml(
            r#"
            [steam]
            api_key = ""

            [[destinations]]
            id = "100200"
            "#,
        );

        let destinations = settings.resolve_destinations();
        assert_eq!(destinations.len(), 1);
        assert!(destinations[0].accounts().is_empty());
    }

    #[test]
    fn test_destination_with_blank_id_is_skipped() {
        let settings = from_toml(
            r#"
            [steam]
            api_key = "secret"

            [[destinations]]
            id = "   "
            accounts = ["A"]

            [[destinations]]
            id = "100200"
            accounts = ["B"]
            "#,
        );

        let destinations = settings.resolve_destinations();

        assert_eq!(destinations.len(), 1);
        assert_eq!(destinations[0].id, DestinationId::new("100200"));
        assert_eq!(destinations[0].accounts(), &[AccountId::new("B")]);
    }
}
