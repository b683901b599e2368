use std::fmt;

use crate::presence::entities::AccountId;

/// Name of a notification target, e.g. a chat group number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DestinationId(String);

impl DestinationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DestinationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A destination together with the accounts it watches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub id: DestinationId,
    accounts: Vec<AccountId>,
}

impl Destination {
    /// Builds a destination, dropping repeated account ids while keeping the
    /// order of first occurrence.
    pub fn new(id: DestinationId, accounts: impl IntoIterator<Item = AccountId>) -> Self {
        let mut destination = Self {
            id,
            accounts: Vec::new(),
        };
        destination.extend(accounts);
        destination
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn extend(&mut self, accounts: impl IntoIterator<Item = AccountId>) {
        for account in accounts {
            if !self.accounts.contains(&account) {
                self.accounts.push(account);
            }
        }
    }
}
