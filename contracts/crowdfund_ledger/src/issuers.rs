//! Cross-contract interfaces of the two issuers the ledger drives.
//!
//! Only the entry points the ledger calls are declared. Issuance goes through
//! the `try_*` client methods so an issuer's contract error comes back as a
//! value the ledger can return, which rolls back the whole contribution.

use soroban_sdk::{contractclient, Address, Env};

use crowdfund_shared::Error;

#[allow(dead_code)]
#[contractclient(name = "RewardIssuerClient")]
pub trait RewardIssuer {
    fn issue_reward(
        env: Env,
        ledger: Address,
        contributor: Address,
        contribution: i128,
    ) -> Result<i128, Error>;
}

#[allow(dead_code)]
#[contractclient(name = "BadgeIssuerClient")]
pub trait BadgeIssuer {
    fn consider_badge(
        env: Env,
        ledger: Address,
        contributor: Address,
        cumulative_total: i128,
    ) -> Result<Option<u64>, Error>;

    fn has_received_badge(env: Env, contributor: Address) -> bool;
}

/// Flatten a `try_*` client result into the shared [`Error`].
///
/// A decoded contract error is passed through unchanged; anything else
/// (a host trap, an undecodable value) becomes [`Error::IssuerUnavailable`].
pub fn lift<T, C, I>(result: Result<Result<T, C>, Result<Error, I>>) -> Result<T, Error> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(error)) => Err(error),
        Ok(Err(_)) | Err(Err(_)) => Err(Error::IssuerUnavailable),
    }
}
