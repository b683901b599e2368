use crate::presence::entities::{AccountId, StatusCode};

/// A status change of one account between two consecutive polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub account_id: AccountId,
    pub display_name: String,
    pub from: StatusCode,
    pub to: StatusCode,
}
