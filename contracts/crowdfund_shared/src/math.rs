//! # Fixed-point math
//!
//! Reward amounts are `contribution * rate / 10^decimals`, floored. The
//! product is taken in 256 bits and narrowed back to `i128` after the
//! division, so only an unrepresentable *result* overflows:
//!
//! ```text
//! ⌊a·b / u⌋ = narrow(I256(a) · I256(b) / I256(u))
//! ```

use soroban_sdk::{Env, I256};

use crate::errors::Error;

/// Largest power of ten representable in `i128`.
pub const MAX_DECIMALS: u32 = 38;

/// `10^decimals`, or `InvalidConfig` when it does not fit in `i128`.
pub fn scaling_unit(decimals: u32) -> Result<i128, Error> {
    10i128.checked_pow(decimals).ok_or(Error::InvalidConfig)
}

/// `⌊amount · rate / unit⌋` for non-negative `amount` and `rate` and positive `unit`.
pub fn mul_div_floor(env: &Env, amount: i128, rate: i128, unit: i128) -> Result<i128, Error> {
    if amount < 0 || rate < 0 || unit <= 0 {
        return Err(Error::InvalidContribution);
    }
    // |amount · rate| < 2^254; cannot overflow I256.
    let product = I256::from_i128(env, amount).mul(&I256::from_i128(env, rate));
    product
        .div(&I256::from_i128(env, unit))
        .to_i128()
        .ok_or(Error::ArithmeticOverflow)
}

/// Checked `a + b` mapped onto [`Error::ArithmeticOverflow`].
pub fn checked_add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::ArithmeticOverflow)
}
