// Copyright (c) 2026 Watt Labs. MIT License.
// See LICENSE for details.

//! # WATT Ledger — Core Value Transfer
//!
//! The authoritative ledger for WATT energy credits. Every credit in
//! circulation lives in exactly one account on this ledger, and every
//! component that moves value — the escrowed-offer marketplace included —
//! does so by calling into this crate. Nothing else is allowed to touch a
//! balance.
//!
//! ## Architecture
//!
//! - **identity** — Opaque caller identities. The environment authenticates;
//!   we only compare.
//! - **roles** — Process-wide privileged identities (admin, oracle, token
//!   authority) and the trading pause flag, with admin-gated mutation.
//! - **ledger** — Account balances and total supply under a fixed cap.
//!   Mint, transfer, and atomic batch transfer.
//! - **capability** — The [`TransferCapability`] seam consumed by the
//!   marketplace engine, so it never depends on a concrete ledger type.
//! - **events** — Serializable journal records for external indexing.
//! - **config** — Protocol constants.
//!
//! ## Design Principles
//!
//! 1. All monetary arithmetic is checked — `checked_add` / `checked_sub`
//!    everywhere, because wrapping arithmetic and money do not mix.
//! 2. Every operation is validate-then-commit: a returned error always
//!    means state is unchanged.
//! 3. Single-writer execution: operations take `&mut self` and run to
//!    completion. No locks, no async, no partial visibility.
//! 4. Every failure is a typed error. Nothing here is fatal to the process.

pub mod capability;
pub mod config;
pub mod error;
pub mod events;
pub mod identity;
pub mod ledger;
pub mod roles;

pub use capability::TransferCapability;
pub use error::LedgerError;
pub use identity::AccountId;
pub use ledger::Ledger;
pub use roles::Roles;
