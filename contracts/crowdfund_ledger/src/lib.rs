//! # Crowdfund Ledger Contract
//!
//! The contribution ledger of the crowdfunding system. It accepts value
//! toward a fixed goal, drives the two reward issuers, and releases the
//! funds to the owner once the goal is met.
//!
//! | Phase        | Entry Point(s)                                   |
//! |--------------|--------------------------------------------------|
//! | Bootstrap    | `__constructor`                                  |
//! | Funding      | [`CrowdfundLedger::contribute`]                  |
//! | Payout       | [`CrowdfundLedger::withdraw_funds`]              |
//! | Queries      | `get_contribution`, `total_funds_raised`, `is_funding_complete`, `has_received_badge`, `get_campaign`, `status`, `held_balance` |
//!
//! ## Contribution flow
//!
//! ```text
//! contribute(c, amount)
//!   ├─ validate            amount > 0, campaign Open
//!   ├─ asset.transfer      c → ledger
//!   ├─ record              contributions[c] += amount; total_raised += amount
//!   ├─ emit `contrib`
//!   ├─ reward_token.issue_reward(ledger, c, amount)        emits `reward`
//!   └─ badge.consider_badge(ledger, c, contributions[c])   may emit `badge`
//! ```
//!
//! Returning an `Err` from an entry point makes the host discard every
//! effect of the call, nested issuer writes and the asset transfer included,
//! so a contribution either lands with its rewards or not at all.

#![no_std]

use soroban_sdk::{contract, contractimpl, log, panic_with_error, token, Address, Env};

use crowdfund_shared::events::{emit_contribution_received, emit_funds_withdrawn};
use crowdfund_shared::math::checked_add;
pub use crowdfund_shared::Error;

mod issuers;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test;
#[cfg(test)]
mod test_events;

use issuers::{lift, BadgeIssuerClient, RewardIssuerClient};
use storage::{get_total_raised, load_config, save_config, set_contribution, set_total_raised};
pub use types::{CampaignConfig, CampaignInfo, CampaignStatus};

#[contract]
pub struct CrowdfundLedger;

#[contractimpl]
impl CrowdfundLedger {
    /// Fix the campaign parameters. `funding_goal` must be positive.
    ///
    /// Both issuers must bind this contract's address with their own
    /// `set_ledger` before the first contribution.
    pub fn __constructor(
        env: Env,
        owner: Address,
        asset: Address,
        funding_goal: i128,
        reward_token: Address,
        badge: Address,
    ) {
        if funding_goal <= 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }
        save_config(
            &env,
            &CampaignConfig {
                owner,
                asset,
                funding_goal,
                reward_token,
                badge,
            },
        );
        set_total_raised(&env, 0);
    }

    // ─────────────────────────────────────────────────────────
    // Mutating entry points
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the campaign asset.
    ///
    /// A contribution that overshoots the goal is accepted in full; the
    /// reward and badge are computed on the full amount.
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<(), Error> {
        contributor.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidContribution);
        }

        let config = load_config(&env);
        let total_raised = get_total_raised(&env);
        if total_raised >= config.funding_goal {
            return Err(Error::GoalAlreadyReached);
        }

        let cumulative = checked_add(storage::get_contribution(&env, &contributor), amount)?;
        let new_total = checked_add(total_raised, amount)?;

        let ledger = env.current_contract_address();
        token::Client::new(&env, &config.asset).transfer(&contributor, &ledger, &amount);

        set_contribution(&env, &contributor, cumulative);
        set_total_raised(&env, new_total);
        emit_contribution_received(&env, &contributor, amount);

        let tokens = lift(
            RewardIssuerClient::new(&env, &config.reward_token)
                .try_issue_reward(&ledger, &contributor, &amount),
        )?;
        let badge_id = lift(
            BadgeIssuerClient::new(&env, &config.badge)
                .try_consider_badge(&ledger, &contributor, &cumulative),
        )?;

        log!(&env, "contribution accepted", contributor, amount, tokens, badge_id);
        Ok(())
    }

    /// Send everything the ledger holds to the owner.
    ///
    /// Owner-only, and only once the goal is met. A repeated call succeeds
    /// and transfers zero. Returns the amount transferred.
    pub fn withdraw_funds(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();

        let config = load_config(&env);
        if caller != config.owner {
            return Err(Error::Unauthorized);
        }
        if get_total_raised(&env) < config.funding_goal {
            return Err(Error::GoalNotReached);
        }

        let ledger = env.current_contract_address();
        let asset = token::Client::new(&env, &config.asset);
        let held = asset.balance(&ledger);
        if held > 0 {
            asset.transfer(&ledger, &config.owner, &held);
        }

        emit_funds_withdrawn(&env, &config.owner, held);
        Ok(held)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Cumulative contribution of `contributor`; 0 if none.
    pub fn get_contribution(env: Env, contributor: Address) -> i128 {
        storage::get_contribution(&env, &contributor)
    }

    pub fn total_funds_raised(env: Env) -> i128 {
        get_total_raised(&env)
    }

    pub fn is_funding_complete(env: Env) -> bool {
        Self::status(env) == CampaignStatus::GoalReached
    }

    pub fn status(env: Env) -> CampaignStatus {
        CampaignStatus::of(get_total_raised(&env), load_config(&env).funding_goal)
    }

    /// Whether `contributor` holds a badge, as recorded by the badge issuer.
    pub fn has_received_badge(env: Env, contributor: Address) -> bool {
        let config = load_config(&env);
        BadgeIssuerClient::new(&env, &config.badge).has_received_badge(&contributor)
    }

    /// Asset balance currently held by the ledger (zero after withdrawal).
    pub fn held_balance(env: Env) -> i128 {
        let config = load_config(&env);
        token::Client::new(&env, &config.asset).balance(&env.current_contract_address())
    }

    pub fn owner(env: Env) -> Address {
        load_config(&env).owner
    }

    pub fn funding_goal(env: Env) -> i128 {
        load_config(&env).funding_goal
    }

    pub fn reward_token(env: Env) -> Address {
        load_config(&env).reward_token
    }

    pub fn badge(env: Env) -> Address {
        load_config(&env).badge
    }

    pub fn get_campaign(env: Env) -> CampaignInfo {
        let config = load_config(&env);
        let total_raised = get_total_raised(&env);
        CampaignInfo {
            status: CampaignStatus::of(total_raised, config.funding_goal),
            owner: config.owner,
            asset: config.asset,
            funding_goal: config.funding_goal,
            reward_token: config.reward_token,
            badge: config.badge,
            total_raised,
        }
    }
}
