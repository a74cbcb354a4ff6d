//! Marketplace error taxonomy.
//!
//! Errors are local to the failing operation: every engine operation is
//! validate-then-commit, so a returned error means no offer, escrow, or
//! balance state changed — with the single documented exception of the
//! non-atomic batch buy, where earlier purchases in the batch stay
//! committed.

use thiserror::Error;

/// Errors that can occur during offer and escrow operations.
#[derive(Debug, Clone, Error)]
pub enum MarketError {
    /// The caller is not permitted to perform this transition.
    #[error("not authorized")]
    NotAuthorized,

    /// Trading is halted. Dispute resolution is exempt.
    #[error("marketplace is paused")]
    Paused,

    /// Zero quantity/price, or the purchase total would overflow.
    #[error("invalid amount")]
    InvalidAmount,

    /// No offer exists under this `(seller, offer id)` key — or, at
    /// settlement time, the offer was never purchased.
    #[error("offer not found")]
    OfferNotFound,

    /// The offer's expiry height has passed (or, at creation, the expiry
    /// is not in the future).
    #[error("offer expired")]
    Expired,

    /// The offer already has a buyer or is already settled. Both block any
    /// further mutation of the offer.
    #[error("offer already claimed")]
    AlreadyClaimed,

    /// The escrow hold is missing or empty at settlement, or the
    /// underlying ledger transfer failed.
    #[error("escrow failure: {reason}")]
    EscrowFailure {
        /// What went wrong, including the ledger's own error text when the
        /// failure originated there.
        reason: String,
    },

    /// The batch exceeds the fixed purchase bound.
    #[error("batch limit exceeded: {requested} purchases, maximum {max}")]
    BatchLimitExceeded {
        /// Number of purchases requested.
        requested: usize,
        /// The fixed bound.
        max: usize,
    },

    /// Parallel batch slices differ in length.
    #[error("length mismatch: {sellers} sellers vs {offer_ids} offer ids")]
    LengthMismatch {
        /// Number of sellers supplied.
        sellers: usize,
        /// Number of offer ids supplied.
        offer_ids: usize,
    },
}
