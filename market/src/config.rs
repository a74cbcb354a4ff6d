//! # Marketplace Constants

/// Offer ids are allocated per seller, starting here and never reused.
pub const FIRST_OFFER_ID: u64 = 1;

/// Maximum number of purchases accepted in a single batch buy.
///
/// Small on purpose: each purchase moves funds through the ledger, and the
/// batch deliberately does not roll back earlier purchases on a later
/// failure, so the blast radius of a partial batch is kept to a few offers.
pub const MAX_BATCH_PURCHASES: usize = 3;

/// Identity of the marketplace's custodial escrow account.
///
/// Value locked between purchase and settlement sits in this ledger account,
/// owned by neither buyer nor seller until the offer is claimed.
pub const ESCROW_CUSTODIAN: &str = "watt:escrow-custodian";
