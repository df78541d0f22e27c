use soroban_sdk::{contracttype, Address};

/// Immutable badge parameters, written once by the constructor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeConfig {
    /// May bind the ledger, once.
    pub admin: Address,
    /// Minimum cumulative contribution that earns a badge.
    pub threshold: i128,
}
