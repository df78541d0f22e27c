//! # Storage
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type          | Description                          |
//! |---------------|---------------|--------------------------------------|
//! | `Config`      | `BadgeConfig` | Admin and threshold (immutable)      |
//! | `Ledger`      | `Address`     | Only address allowed to mint         |
//! | `NextBadgeId` | `u64`         | Global issuance counter, starts at 0 |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                | Type      | Description                            |
//! |--------------------|-----------|----------------------------------------|
//! | `BadgeOf(address)` | `u64`     | Badge held by a contributor; presence is the "already issued" flag |
//! | `OwnerOf(id)`      | `Address` | Holder of a badge id                   |

use soroban_sdk::{contracttype, Address, Env};

use crate::types::BadgeConfig;

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Ledger,
    NextBadgeId,
    BadgeOf(Address),
    OwnerOf(u64),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn save_config(env: &Env, config: &BadgeConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> BadgeConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("config not set")
}

pub fn get_ledger(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Ledger)
}

pub fn set_ledger(env: &Env, ledger: &Address) {
    env.storage().instance().set(&DataKey::Ledger, ledger);
    bump_instance(env);
}

pub fn get_next_badge_id(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::NextBadgeId)
        .unwrap_or(0)
}

pub fn set_next_badge_id(env: &Env, next: u64) {
    env.storage().instance().set(&DataKey::NextBadgeId, &next);
    bump_instance(env);
}

pub fn get_badge_of(env: &Env, holder: &Address) -> Option<u64> {
    let key = DataKey::BadgeOf(holder.clone());
    let badge: Option<u64> = env.storage().persistent().get(&key);
    if badge.is_some() {
        bump_persistent(env, &key);
    }
    badge
}

pub fn get_owner_of(env: &Env, badge_id: u64) -> Option<Address> {
    let key = DataKey::OwnerOf(badge_id);
    let owner: Option<Address> = env.storage().persistent().get(&key);
    if owner.is_some() {
        bump_persistent(env, &key);
    }
    owner
}

/// Record `badge_id` as held by `holder` under both lookups.
pub fn save_badge(env: &Env, holder: &Address, badge_id: u64) {
    let badge_key = DataKey::BadgeOf(holder.clone());
    let owner_key = DataKey::OwnerOf(badge_id);
    env.storage().persistent().set(&badge_key, &badge_id);
    env.storage().persistent().set(&owner_key, holder);
    bump_persistent(env, &badge_key);
    bump_persistent(env, &owner_key);
}
