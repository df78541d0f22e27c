use soroban_sdk::Address;

use crate::errors::Error;

/// Gate for issuer entry points: `caller` must be the ledger bound to this
/// issuer and must have authorized the call.
///
/// A contract invoking an issuer directly is authorized by the host.
pub fn require_bound_ledger(caller: &Address, bound: Option<Address>) -> Result<(), Error> {
    match bound {
        Some(ledger) if ledger == *caller => {
            caller.require_auth();
            Ok(())
        }
        _ => Err(Error::Unauthorized),
    }
}
