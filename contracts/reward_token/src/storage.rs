//! # Storage
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type      | Description                               |
//! |---------------|-----------|-------------------------------------------|
//! | `Config`      | `RewardConfig` | Admin, rate and decimals (immutable) |
//! | `Ledger`      | `Address` | Only address allowed to issue rewards     |
//! | `TotalSupply` | `i128`    | Sum of every balance                      |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                | Type   | Description            |
//! |--------------------|--------|------------------------|
//! | `Balance(address)` | `i128` | Reward credit held     |

use soroban_sdk::{contracttype, Address, Env};

use crate::types::RewardConfig;

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
    TotalSupply,
    Balance(Address),
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

pub fn save_config(env: &Env, config: &RewardConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Panics if the constructor never ran, which the host makes impossible.
pub fn load_config(env: &Env) -> RewardConfig {
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

pub fn get_total_supply(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    bump_instance(env);
}

pub fn get_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    match env.storage().persistent().get(&key) {
        Some(balance) => {
            bump_persistent(env, &key);
            balance
        }
        None => 0,
    }
}

pub fn set_balance(env: &Env, id: &Address, balance: i128) {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().set(&key, &balance);
    bump_persistent(env, &key);
}
