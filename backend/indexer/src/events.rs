//! Canonical event types emitted by the crowdfund contracts.
//!
//! These mirror the topics published from `contracts/crowdfund_shared/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the ledger, reward token and badge contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The ledger accepted a contribution (`contrib` topic).
    ContributionReceived,
    /// The reward token credited a contributor (`reward` topic).
    TokenRewardSent,
    /// The badge contract minted a contributor badge (`badge` topic).
    NftRewardSent,
    /// The owner withdrew the raised funds (`withdrawn` topic).
    FundsWithdrawn,
    /// An event from a watched contract that we don't recognise.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "contrib" => Self::ContributionReceived,
            "reward" => Self::TokenRewardSent,
            "badge" => Self::NftRewardSent,
            "withdrawn" => Self::FundsWithdrawn,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContributionReceived => "contribution_received",
            Self::TokenRewardSent => "token_reward_sent",
            Self::NftRewardSent => "nft_reward_sent",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`], for rows read back from the database.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "contribution_received" => Self::ContributionReceived,
            "token_reward_sent" => Self::TokenRewardSent,
            "nft_reward_sent" => Self::NftRewardSent,
            "funds_withdrawn" => Self::FundsWithdrawn,
            _ => Self::Unknown,
        }
    }
}

/// A fully decoded crowdfund event, ready to be stored in the database.
///
/// `amount` is kept as a decimal string: contract amounts are `i128`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdfundEvent {
    pub event_type: String,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub badge_id: Option<i64>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub badge_id: Option<i64>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
