//! # Ledger Constants
//!
//! Every magic number in the ledger lives here. These values are part of
//! the system's economic parameters — changing them after deployment is a
//! consensus-level decision, not a refactor.

/// Default maximum total supply, in smallest credit units (milli-credits).
///
/// One trillion milli-credits = one billion whole energy credits. Minting
/// that would push total supply past the cap is rejected in full — there
/// are no partial mints.
pub const DEFAULT_SUPPLY_CAP: u64 = 1_000_000_000_000;

/// The reserved all-zeros identity.
///
/// Used as the "nobody" placeholder. Minting to it is rejected with a
/// zero-address error, and no privileged role may ever be assigned to it.
pub const NULL_IDENTITY: &str =
    "watt:0000000000000000000000000000000000000000000000000000000000000000";
