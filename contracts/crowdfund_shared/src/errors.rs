use soroban_sdk::contracterror;

/// Error codes returned by the ledger, reward token and badge contracts.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contribution amount is zero or negative.
    InvalidContribution = 1,
    /// The funding goal has already been met; the campaign is closed.
    GoalAlreadyReached  = 2,
    /// Caller is not the owner (withdrawal) or not the bound ledger (issuance).
    Unauthorized        = 3,
    /// Withdrawal attempted before the funding goal was met.
    GoalNotReached      = 4,
    /// A checked arithmetic operation overflowed.
    ArithmeticOverflow  = 5,
    /// `set_ledger` was called on an issuer that already has a ledger.
    LedgerAlreadyBound  = 6,
    /// A constructor parameter is out of range.
    InvalidConfig       = 7,
    /// An issuer call failed without returning a contract error.
    IssuerUnavailable   = 8,
}
