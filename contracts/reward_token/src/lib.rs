//! # Reward Token
//!
//! Fungible reward credit for crowdfunding contributors. Every contribution
//! the ledger accepts is forwarded here and converted at a fixed rate:
//!
//! ```text
//! tokens = ⌊contribution · reward_rate / 10^decimals⌋
//! ```
//!
//! Issuance is pure credit: no cap and no supply ceiling. Only the ledger
//! bound through [`RewardToken::set_ledger`] may issue.

#![no_std]

use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, String};

use crowdfund_shared::auth::require_bound_ledger;
use crowdfund_shared::events::emit_token_reward_sent;
use crowdfund_shared::math::{checked_add, mul_div_floor, scaling_unit, MAX_DECIMALS};
pub use crowdfund_shared::Error;

mod storage;
mod types;


use storage::{
    get_balance, get_ledger, get_total_supply, load_config, save_config, set_balance,
    set_ledger, set_total_supply,
};
pub use types::RewardConfig;

const NAME: &str = "CrowdToken";
const SYMBOL: &str = "CRWD";

#[contract]
pub struct RewardToken;

#[contractimpl]
impl RewardToken {
    /// Fix the issuance parameters.
    ///
    /// `decimals` must match the contributed asset so that one whole unit of
    /// value earns exactly `reward_rate` token base units.
    pub fn __constructor(env: Env, admin: Address, reward_rate: u32, decimals: u32) {
        if decimals > MAX_DECIMALS {
            panic_with_error!(&env, Error::InvalidConfig);
        }
        save_config(
            &env,
            &RewardConfig {
                admin,
                reward_rate,
                decimals,
            },
        );
        set_total_supply(&env, 0);
    }

    /// Bind the ledger allowed to call [`RewardToken::issue_reward`].
    ///
    /// Admin-only and one-shot; a second call fails with `LedgerAlreadyBound`.
    pub fn set_ledger(env: Env, ledger: Address) -> Result<(), Error> {
        let config = load_config(&env);
        config.admin.require_auth();

        if get_ledger(&env).is_some() {
            return Err(Error::LedgerAlreadyBound);
        }
        set_ledger(&env, &ledger);
        Ok(())
    }

    /// Mint the reward for a `contribution` into `contributor`'s balance.
    ///
    /// `ledger` must be the bound ledger and must authorize the call.
    /// Returns the number of tokens minted (possibly zero for dust).
    pub fn issue_reward(
        env: Env,
        ledger: Address,
        contributor: Address,
        contribution: i128,
    ) -> Result<i128, Error> {
        require_bound_ledger(&ledger, get_ledger(&env))?;

        let config = load_config(&env);
        let unit = scaling_unit(config.decimals)?;
        let tokens = mul_div_floor(&env, contribution, i128::from(config.reward_rate), unit)?;

        let balance = checked_add(get_balance(&env, &contributor), tokens)?;
        let supply = checked_add(get_total_supply(&env), tokens)?;
        set_balance(&env, &contributor, balance);
        set_total_supply(&env, supply);

        emit_token_reward_sent(&env, &contributor, tokens);
        Ok(tokens)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        get_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        get_total_supply(&env)
    }

    pub fn reward_rate(env: Env) -> u32 {
        load_config(&env).reward_rate
    }

    pub fn decimals(env: Env) -> u32 {
        load_config(&env).decimals
    }

    pub fn name(env: Env) -> String {
        String::from_str(&env, NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, SYMBOL)
    }

    /// The bound ledger, if any.
    pub fn ledger(env: Env) -> Option<Address> {
        get_ledger(&env)
    }
}
