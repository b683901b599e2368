use std::fmt;

/// Opaque identifier of a watched account, e.g. a 64-bit Steam id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Presence state as reported by the upstream API.
///
/// Codes outside the known range are kept verbatim in `Unknown` so that two
/// different unrecognized codes still compare as different states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Offline,
    Online,
    Busy,
    Away,
    Invisible,
    LookingToPlay,
    InGame,
    Unknown(i64),
}

impl StatusCode {
    pub fn code(&self) -> i64 {
        match self {
            StatusCode::Offline => 0,
            StatusCode::Online => 1,
            StatusCode::Busy => 2,
            StatusCode::Away => 3,
            StatusCode::Invisible => 4,
            StatusCode::LookingToPlay => 5,
            StatusCode::InGame => 6,
            StatusCode::Unknown(code) => *code,
        }
    }

    /// Human readable label used in notification texts.
    pub fn label(&self) -> &'static str {
        match self {
            StatusCode::Offline => "offline",
            StatusCode::Online => "online",
            StatusCode::Busy => "busy",
            StatusCode::Away => "away",
            StatusCode::Invisible => "invisible",
            StatusCode::LookingToPlay => "looking to play",
            StatusCode::InGame => "in game",
            StatusCode::Unknown(_) => "unknown status",
        }
    }
}

impl From<i64> for StatusCode {
    fn from(code: i64) -> Self {
        match code {
            0 => StatusCode::Offline,
            1 => StatusCode::Online,
            2 => StatusCode::Busy,
            3 => StatusCode::Away,
            4 => StatusCode::Invisible,
            5 => StatusCode::LookingToPlay,
            6 => StatusCode::InGame,
            other => StatusCode::Unknown(other),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single account's presence as seen in one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceRecord {
    pub account_id: AccountId,
    pub status: StatusCode,
    pub display_name: String,
}

impl PresenceRecord {
    pub fn new(account_id: AccountId, status: StatusCode, display_name: impl Into<String>) -> Self {
        Self {
            account_id,
            status,
            display_name: display_name.into(),
        }
    }
}
