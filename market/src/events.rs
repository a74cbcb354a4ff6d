//! # Marketplace Event Journal
//!
//! Observable side effects of offer lifecycle transitions, journalled the
//! same way as ledger events (see [`watt_ledger::events::EventRecord`]) so
//! a single indexer can consume both streams.

use serde::{Deserialize, Serialize};

use watt_ledger::identity::AccountId;

/// A committed marketplace state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A seller listed a new offer.
    OfferCreated {
        /// The listing seller.
        seller: AccountId,
        /// Seller-scoped offer id.
        offer_id: u64,
        /// Units offered.
        quantity: u64,
        /// Price per unit, in smallest credit units.
        unit_price: u64,
        /// Logical height after which the offer can no longer be bought.
        expiry: u64,
    },
    /// A buyer locked the purchase total in escrow against an offer.
    OfferPurchased {
        /// The purchasing buyer.
        buyer: AccountId,
        /// The listing seller.
        seller: AccountId,
        /// Seller-scoped offer id.
        offer_id: u64,
        /// Escrowed amount: quantity × unit price, frozen at purchase.
        total: u64,
    },
    /// Escrow released to the seller on attested delivery.
    DeliveryConfirmed {
        /// The listing seller, who received the funds.
        seller: AccountId,
        /// Seller-scoped offer id.
        offer_id: u64,
        /// Amount released from escrow.
        amount: u64,
    },
    /// The admin arbitrator settled a disputed offer.
    DisputeResolved {
        /// The listing seller.
        seller: AccountId,
        /// Seller-scoped offer id.
        offer_id: u64,
        /// Amount released from escrow.
        amount: u64,
        /// Whether the ruling refunded the buyer.
        refund_buyer: bool,
        /// The identity that received the escrowed funds.
        recipient: AccountId,
    },
}
