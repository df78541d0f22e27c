use soroban_sdk::{contracttype, Address};

/// Immutable issuance parameters, written once by the constructor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardConfig {
    /// May bind the ledger, once.
    pub admin: Address,
    /// Token base units minted per whole unit of contributed value.
    pub reward_rate: u32,
    /// Decimal precision of the contributed asset; one whole unit is `10^decimals`.
    pub decimals: u32,
}
