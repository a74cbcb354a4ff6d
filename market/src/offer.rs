//! # Offer Listings
//!
//! An offer is a seller-posted listing of a fixed quantity at a fixed unit
//! price, valid until an expiry height. Its lifecycle:
//!
//! ```text
//! created (no buyer, unclaimed)
//!    │ buy_offer
//!    ▼
//! purchased (buyer set, escrow held, unclaimed)
//!    │ confirm_delivery / resolve_dispute
//!    ▼
//! settled (claimed, terminal)
//! ```
//!
//! An offer that expires without a buyer never transitions further: it stays
//! queryable but can no longer be bought. Once an offer has a buyer it is
//! consumed by that one purchase — it can never be reassigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use watt_ledger::identity::AccountId;

/// A seller-posted listing.
///
/// Keyed externally by `(seller, offer_id)`; ids are allocated per seller,
/// monotonically from 1, and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// The identity that created and exclusively owns this listing.
    pub seller: AccountId,
    /// Units offered. Always positive.
    pub quantity: u64,
    /// Price per unit in smallest credit units. Always positive.
    pub unit_price: u64,
    /// Logical height at which the offer stops being purchasable. Purchase
    /// requires the current height to be strictly below this.
    pub expiry: u64,
    /// The buyer, absent until purchased. Never reassigned once set.
    pub buyer: Option<AccountId>,
    /// Whether the offer has been settled (delivery confirmed or dispute
    /// resolved). Terminal once true.
    pub claimed: bool,
    /// Wall-clock creation time, informational only.
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Creates an unpurchased, unsettled listing.
    pub fn new(seller: AccountId, quantity: u64, unit_price: u64, expiry: u64) -> Self {
        Self {
            seller,
            quantity,
            unit_price,
            expiry,
            buyer: None,
            claimed: false,
            created_at: Utc::now(),
        }
    }

    /// The escrow value locked at purchase time: quantity × unit price.
    /// `None` when the product overflows.
    pub fn total_price(&self) -> Option<u64> {
        self.quantity.checked_mul(self.unit_price)
    }

    /// Whether a buyer has locked funds against this offer.
    pub fn is_purchased(&self) -> bool {
        self.buyer.is_some()
    }

    /// Whether the offer has reached its terminal settled state.
    pub fn is_settled(&self) -> bool {
        self.claimed
    }

    /// Whether the offer can still be bought at logical height `now`.
    pub fn is_open(&self, now: u64) -> bool {
        !self.claimed && self.buyer.is_none() && now < self.expiry
    }
}
