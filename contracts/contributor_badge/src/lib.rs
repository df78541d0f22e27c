//! # Contributor Badge
//!
//! One non-fungible badge per contributor, minted the first time their
//! cumulative contribution reaches the threshold. Badge ids come from a single
//! global counter in issuance order, starting at 0.
//!
//! ```text
//! consider_badge(c, total)
//!   ├─ c already badged      → no-op
//!   ├─ total >= threshold    → mint next id, emit `badge`
//!   └─ otherwise             → no-op
//! ```

#![no_std]

use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env};

use crowdfund_shared::auth::require_bound_ledger;
use crowdfund_shared::events::emit_nft_reward_sent;
pub use crowdfund_shared::Error;

mod storage;
mod types;


use storage::{
    get_badge_of, get_ledger, get_next_badge_id, get_owner_of, load_config, save_badge,
    save_config, set_ledger, set_next_badge_id,
};
pub use types::BadgeConfig;

#[contract]
pub struct ContributorBadge;

#[contractimpl]
impl ContributorBadge {
    pub fn __constructor(env: Env, admin: Address, threshold: i128) {
        if threshold <= 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }
        save_config(&env, &BadgeConfig { admin, threshold });
        set_next_badge_id(&env, 0);
    }

    /// Bind the ledger allowed to call [`ContributorBadge::consider_badge`].
    pub fn set_ledger(env: Env, ledger: Address) -> Result<(), Error> {
        let config = load_config(&env);
        config.admin.require_auth();

        if get_ledger(&env).is_some() {
            return Err(Error::LedgerAlreadyBound);
        }
        set_ledger(&env, &ledger);
        Ok(())
    }

    /// Mint a badge for `contributor` if `cumulative_total` qualifies and they
    /// do not already hold one. Returns the id of the badge minted by this
    /// call, if any.
    pub fn consider_badge(
        env: Env,
        ledger: Address,
        contributor: Address,
        cumulative_total: i128,
    ) -> Result<Option<u64>, Error> {
        require_bound_ledger(&ledger, get_ledger(&env))?;

        if get_badge_of(&env, &contributor).is_some() {
            return Ok(None);
        }
        if cumulative_total < load_config(&env).threshold {
            return Ok(None);
        }

        let badge_id = get_next_badge_id(&env);
        let next = badge_id.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        save_badge(&env, &contributor, badge_id);
        set_next_badge_id(&env, next);

        emit_nft_reward_sent(&env, &contributor, badge_id);
        Ok(Some(badge_id))
    }

    pub fn has_received_badge(env: Env, contributor: Address) -> bool {
        get_badge_of(&env, &contributor).is_some()
    }

    /// Badge held by `contributor`, if any.
    pub fn badge_of(env: Env, contributor: Address) -> Option<u64> {
        get_badge_of(&env, &contributor)
    }

    pub fn owner_of(env: Env, badge_id: u64) -> Option<Address> {
        get_owner_of(&env, badge_id)
    }

    /// Number of badges held; at most one per contributor.
    pub fn balance(env: Env, owner: Address) -> u32 {
        u32::from(get_badge_of(&env, &owner).is_some())
    }

    pub fn next_badge_id(env: Env) -> u64 {
        get_next_badge_id(&env)
    }

    pub fn threshold(env: Env) -> i128 {
        load_config(&env).threshold
    }

    pub fn ledger(env: Env) -> Option<Address> {
        get_ledger(&env)
    }
}
