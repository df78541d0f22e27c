//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type             | Description                      |
//! |---------------|------------------|----------------------------------|
//! | `Config`      | `CampaignConfig` | Immutable campaign configuration |
//! | `TotalRaised` | `i128`           | Sum of every contribution        |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type   | Description                        |
//! |-------------------------|--------|------------------------------------|
//! | `Contribution(address)` | `i128` | Cumulative amount for a contributor |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::CampaignConfig;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable campaign configuration (Instance).
    Config,
    /// Running total of accepted contributions (Instance).
    TotalRaised,
    /// Cumulative contribution keyed by contributor (Persistent).
    Contribution(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn save_config(env: &Env, config: &CampaignConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// The constructor always writes the config, so a miss is unreachable.
pub fn load_config(env: &Env) -> CampaignConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("campaign not configured")
}

pub fn get_total_raised(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &total);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Cumulative contribution of `contributor`; 0 if they never contributed.
pub fn get_contribution(env: &Env, contributor: &Address) -> i128 {
    let key = DataKey::Contribution(contributor.clone());
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn set_contribution(env: &Env, contributor: &Address, amount: i128) {
    let key = DataKey::Contribution(contributor.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
