//! # Types
//!
//! ## Config / State split
//!
//! The campaign is stored as:
//!
//! - [`CampaignConfig`]: written once by the constructor, never mutated.
//! - `TotalRaised` and one `Contribution(address)` entry per contributor,
//!   written on every contribution.
//!
//! The public API exposes the reconstructed [`CampaignInfo`].
//!
//! ## Status
//!
//! [`CampaignStatus`] is derived, never stored:
//!
//! ```text
//! Open ──(total_raised >= funding_goal)──► GoalReached
//! ```
//!
//! `GoalReached` is terminal. Withdrawal drains the held balance but does not
//! change the status.

use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting contributions.
    Open,
    /// Goal met; contributions closed, withdrawal enabled.
    GoalReached,
}

impl CampaignStatus {
    pub fn of(total_raised: i128, funding_goal: i128) -> Self {
        if total_raised >= funding_goal {
            CampaignStatus::GoalReached
        } else {
            CampaignStatus::Open
        }
    }
}

/// Immutable campaign configuration, written once at construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    /// Sole address allowed to withdraw.
    pub owner: Address,
    /// Token contract in which contributions are made and held.
    pub asset: Address,
    /// Target total; strictly positive.
    pub funding_goal: i128,
    /// Reward token issuer bound to this ledger.
    pub reward_token: Address,
    /// Badge issuer bound to this ledger.
    pub badge: Address,
}

/// Full view of the campaign returned by `get_campaign`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignInfo {
    pub owner: Address,
    pub asset: Address,
    pub funding_goal: i128,
    pub reward_token: Address,
    pub badge: Address,
    /// Cumulative value accepted; never reduced by withdrawal.
    pub total_raised: i128,
    pub status: CampaignStatus,
}
