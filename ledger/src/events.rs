//! # Ledger Event Journal
//!
//! Observable side effects for external indexing. Events are appended to an
//! in-memory journal as operations commit and drained by the environment;
//! the core never consumes its own events. Each journal entry carries a
//! unique id and a wall-clock timestamp so indexers can deduplicate and
//! order across restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::AccountId;

/// A committed ledger state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// New supply was created and credited to `to`.
    Mint {
        /// Recipient of the minted credits.
        to: AccountId,
        /// Amount minted, in smallest units.
        amount: u64,
    },
    /// Value moved between two accounts.
    Transfer {
        /// The debited account.
        from: AccountId,
        /// The credited account.
        to: AccountId,
        /// Amount moved, in smallest units.
        amount: u64,
    },
}

/// Journal wrapper adding an id and timestamp to an emitted event.
///
/// Generic over the event payload so the marketplace crate can reuse the
/// same journal shape for its own events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord<E> {
    /// Unique id of this journal entry.
    pub id: String,
    /// Wall-clock time the entry was recorded. Informational only — expiry
    /// logic uses logical block height, never this timestamp.
    pub recorded_at: DateTime<Utc>,
    /// The event payload.
    pub event: E,
}

impl<E> EventRecord<E> {
    /// Wraps an event in a fresh journal entry.
    pub fn new(event: E) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            recorded_at: Utc::now(),
            event,
        }
    }
}
