use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::{
    entities::{AccountId, PresenceRecord, StatusCode},
    gateway::{PresenceGateway, PresenceGatewayError},
};

const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v0002/";

#[derive(Debug, Deserialize)]
struct PlayerSummariesEnvelope {
    #[serde(default)]
    response: PlayerSummariesResponse,
}

#[derive(Debug, Default, Deserialize)]
struct PlayerSummariesResponse {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    steamid: String,
    #[serde(default)]
    personastate: i64,
    personaname: Option<String>,
}

impl From<PlayerSummary> for PresenceRecord {
    fn from(player: PlayerSummary) -> Self {
        let display_name = player
            .personaname
            .unwrap_or_else(|| player.steamid.clone());
        PresenceRecord::new(
            AccountId::new(player.steamid),
            StatusCode::from(player.personastate),
            display_name,
        )
    }
}

/// Decode a `GetPlayerSummaries` body into presence records, keeping the
/// order in which the API returned the players.
pub fn parse_player_summaries(body: &str) -> Result<Vec<PresenceRecord>, PresenceGatewayError> {
    let envelope: PlayerSummariesEnvelope = serde_json::from_str(body)
        .map_err(|err| PresenceGatewayError::MalformedResponse(err.to_string()))?;

    Ok(envelope
        .response
        .players
        .into_iter()
        .map(PresenceRecord::from)
        .collect())
}

/// Presence gateway backed by the Steam Web API.
pub struct SteamPresenceGateway {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SteamPresenceGateway {
    pub fn new(
        api_key: &str,
        base_url: &str,
        request_timeout: Duration,
    ) -> Result<Self, PresenceGatewayError> {
        if api_key.is_empty() {
            tracing::warn!("Steam API key is empty - presence will not be polled");
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| PresenceGatewayError::Request(err.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn player_summaries_url(&self) -> String {
        format!("{}{}", self.base_url, PLAYER_SUMMARIES_PATH)
    }
}

#[async_trait]
impl PresenceGateway for SteamPresenceGateway {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    #[instrument(skip_all, fields(accounts = account_ids.len()))]
    async fn fetch_presence(
        &self,
        account_ids: &[AccountId],
    ) -> Result<Vec<PresenceRecord>, PresenceGatewayError> {
        if !self.is_configured() {
            return Err(PresenceGatewayError::MissingCredential);
        }

        let steam_ids = account_ids
            .iter()
            .map(AccountId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(self.player_summaries_url())
            .query(&[("key", self.api_key.as_str()), ("steamids", steam_ids.as_str())])
            .send()
            .await
            .map_err(|e| PresenceGatewayError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Steam API error - Status: {}", status);
            return Err(PresenceGatewayError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PresenceGatewayError::Request(e.to_string()))?;

        let records = parse_player_summaries(&body)?;
        debug!("Steam API returned {} players", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_summaries() {
        let body = r#"{
            "response": {
                "players": [
                    {"steamid": "76561198000000001", "personastate": 1, "personaname": "alice"},
                    {"steamid": "76561198000000002", "personastate": 6, "personaname": "bob"}
                ]
            }
        }"#;

        let records = parse_player_summaries(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].account_id, AccountId::new("76561198000000001"));
        assert_eq!(records[0].status, StatusCode::Online);
        assert_eq!(records[0].display_name, "alice");
        assert_eq!(records[1].status, StatusCode::InGame);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let body = r#"{"response": {"players": [{"steamid": "42"}]}}"#;

        let records = parse_player_summaries(body).unwrap();

        assert_eq!(records[0].status, StatusCode::Offline);
        assert_eq!(records[0].display_name, "42");
    }

    #[test]
    fn test_missing_players_is_empty() {
        assert!(parse_player_summaries(r#"{"response": {}}"#).unwrap().is_empty());
        assert!(parse_player_summaries("{}").unwrap().is_empty());
    }

    #[test]
    fn test_missing_steamid_is_malformed() {
        let body = r#"{"response": {"players": [{"personastate": 1}]}}"#;

        let result = parse_player_summaries(body);

        assert!(matches!(
            result,
            Err(PresenceGatewayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let result = parse_player_summaries("<html>rate limited</html>");
        assert!(matches!(
            result,
            Err(PresenceGatewayError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_without_api_key_fails_without_request() {
        let gateway =
            SteamPresenceGateway::new("", "http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

        assert!(!gateway.is_configured());
        let result = gateway.fetch_presence(&[AccountId::new("1")]).await;
        assert!(matches!(result, Err(PresenceGatewayError::MissingCredential)));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let gateway = SteamPresenceGateway::new(
            "key",
            "https://api.steampowered.com/",
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            gateway.player_summaries_url(),
            "https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v0002/"
        );
    }
}
