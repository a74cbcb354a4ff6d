// Copyright (c) 2026 Watt Labs. MIT License.
// See LICENSE for details.

//! # WATT Marketplace — Escrowed Offers
//!
//! The two-party marketplace for WATT energy credits. A seller lists a
//! quantity of some good at a fixed unit price; a buyer locks the purchase
//! total in escrow against that listing; a trusted party — the seller
//! itself, the delivery oracle, or the admin arbitrator — releases or
//! refunds the escrowed funds exactly once.
//!
//! - **offer** — Listings keyed by `(seller, per-seller sequential id)`,
//!   with the purchase/settlement lifecycle.
//! - **engine** — The [`Market`](engine::Market) state machine: create,
//!   buy, confirm delivery, resolve disputes, batch buy.
//! - **error** — The marketplace error taxonomy.
//! - **events** — Serializable journal records for external indexing.
//! - **config** — Marketplace constants.
//!
//! ## Design Principles
//!
//! 1. The engine never touches a balance directly. All value moves through
//!    the ledger's [`TransferCapability`](watt_ledger::TransferCapability),
//!    so the ledger's validation cannot be bypassed.
//! 2. Escrowed value is always held by a real ledger account — the engine's
//!    own custodial identity — never a floating unassigned balance.
//! 3. Settlement is terminal: once an offer is claimed, no operation can
//!    move its funds again, and its escrow hold is gone.
//! 4. Dispute resolution bypasses the trading halt. A pause must never
//!    strand funds already locked in escrow.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod offer;

pub use engine::Market;
pub use error::MarketError;
pub use offer::Offer;
