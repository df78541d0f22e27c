//! # Crowdfund Shared
//!
//! Plumbing shared by the three crowdfunding contracts:
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`errors`] | The single [`Error`] enum every entry point returns         |
//! | [`events`] | Event payloads and `emit_*` helpers                         |
//! | [`math`]   | Checked fixed-point arithmetic for reward computation       |
//! | [`auth`]   | Issuer-side check that the caller is the bound ledger       |
//!
//! Keeping the error codes in one place means a contract error raised inside
//! an issuer keeps its meaning when the ledger surfaces it to the caller.

#![no_std]

pub mod auth;
pub mod errors;
pub mod events;
pub mod math;

pub use errors::Error;
