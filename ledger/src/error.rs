//! Ledger error taxonomy.
//!
//! Every failure is surfaced to the caller as a typed [`LedgerError`]. There
//! is no retry logic in the core — the environment decides whether to
//! resubmit — and no failure path commits partial state.

use thiserror::Error;

/// Errors that can occur during ledger and role-configuration operations.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// The caller does not hold the role this operation requires.
    #[error("not authorized")]
    NotAuthorized,

    /// Trading is halted; value-moving operations are rejected.
    #[error("ledger is paused")]
    Paused,

    /// Amount is zero, or the arithmetic would overflow.
    #[error("invalid amount")]
    InvalidAmount,

    /// The null identity was supplied where a real account is required.
    #[error("zero address")]
    ZeroAddress,

    /// Self-transfers are rejected outright, not treated as no-ops.
    #[error("transfer to self")]
    SelfTransfer,

    /// The sender's balance does not cover the requested debit.
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// The sender's current balance.
        available: u64,
        /// The amount the caller tried to move.
        requested: u64,
    },

    /// Minting this amount would push total supply past the cap.
    #[error("supply cap exceeded: supply {supply} + mint {requested} > cap {cap}")]
    SupplyCapExceeded {
        /// Total supply before the failed mint.
        supply: u64,
        /// The amount the caller tried to mint.
        requested: u64,
        /// The fixed maximum supply.
        cap: u64,
    },

    /// Parallel batch slices differ in length.
    #[error("length mismatch: {recipients} recipients vs {amounts} amounts")]
    LengthMismatch {
        /// Number of recipients supplied.
        recipients: usize,
        /// Number of amounts supplied.
        amounts: usize,
    },
}
