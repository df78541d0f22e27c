//! # Events
//!
//! Every observable side effect of the crowdfunding contracts is published
//! here. Topics are `(name, subject_address)`; data is one of the structs
//! below so off-chain consumers can decode fields by name.
//!
//! | Topic       | Emitted by   | Data                     |
//! |-------------|--------------|--------------------------|
//! | `contrib`   | ledger       | [`ContributionReceived`] |
//! | `reward`    | reward token | [`TokenRewardSent`]      |
//! | `badge`     | badge        | [`NftRewardSent`]        |
//! | `withdrawn` | ledger       | [`FundsWithdrawn`]       |
//!
//! Within a single `contribute` call the order is always
//! `contrib` → `reward` → `badge`.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

pub const CONTRIBUTION_RECEIVED: Symbol = symbol_short!("contrib");
pub const TOKEN_REWARD_SENT: Symbol = symbol_short!("reward");
pub const NFT_REWARD_SENT: Symbol = symbol_short!("badge");
pub const FUNDS_WITHDRAWN: Symbol = symbol_short!("withdrawn");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReceived {
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRewardSent {
    pub contributor: Address,
    pub tokens: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftRewardSent {
    pub contributor: Address,
    pub badge_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub owner: Address,
    pub amount: i128,
}

pub fn emit_contribution_received(env: &Env, contributor: &Address, amount: i128) {
    env.events().publish(
        (CONTRIBUTION_RECEIVED, contributor.clone()),
        ContributionReceived {
            contributor: contributor.clone(),
            amount,
        },
    );
}

pub fn emit_token_reward_sent(env: &Env, contributor: &Address, tokens: i128) {
    env.events().publish(
        (TOKEN_REWARD_SENT, contributor.clone()),
        TokenRewardSent {
            contributor: contributor.clone(),
            tokens,
        },
    );
}

pub fn emit_nft_reward_sent(env: &Env, contributor: &Address, badge_id: u64) {
    env.events().publish(
        (NFT_REWARD_SENT, contributor.clone()),
        NftRewardSent {
            contributor: contributor.clone(),
            badge_id,
        },
    );
}

pub fn emit_funds_withdrawn(env: &Env, owner: &Address, amount: i128) {
    env.events().publish(
        (FUNDS_WITHDRAWN, owner.clone()),
        FundsWithdrawn {
            owner: owner.clone(),
            amount,
        },
    );
}
