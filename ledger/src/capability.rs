//! # Transfer Capability
//!
//! The seam between the ledger and everything that moves value on it. The
//! marketplace engine is generic over this trait rather than depending on
//! the concrete [`Ledger`](crate::ledger::Ledger) type, so the engine's test
//! suite can substitute a double and so the ledger backing a deployment is
//! itself a piece of configuration.
//!
//! Pause policy deliberately lives with the *calling operation*, not here:
//! the marketplace gates its own trading operations on the pause flag, while
//! dispute resolution bypasses the halt so escrowed funds can never be
//! stranded. A capability transfer therefore validates amounts and balances
//! but never consults the pause flag.

use crate::error::LedgerError;
use crate::identity::AccountId;

/// The ledger surface consumed by value-moving components.
pub trait TransferCapability {
    /// Moves `amount` from `from` to `to`.
    ///
    /// Debits and credits atomically: both happen or neither. Validation
    /// (zero amount, self-transfer, insufficient balance, credit overflow)
    /// is the implementor's responsibility.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Current balance of `id`. Never fails; unknown identities hold 0.
    fn balance_of(&self, id: &AccountId) -> u64;
}
