//! # Account Ledger
//!
//! Owns every balance and the total supply. Minting is gated on the token
//! authority (or the production oracle), supply is bounded by a fixed cap,
//! and all arithmetic is checked. The conservation invariant maintained
//! here is simple because escrow holds live in an ordinary custodial
//! account: the sum of all balances always equals the total minted supply.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::capability::TransferCapability;
use crate::config::DEFAULT_SUPPLY_CAP;
use crate::error::LedgerError;
use crate::events::{EventRecord, LedgerEvent};
use crate::identity::AccountId;
use crate::roles::Roles;

/// The account ledger: balances, total supply, and the supply cap.
///
/// Single-writer: every operation takes `&mut self`, runs to completion
/// against a consistent view, and either commits all of its effects or none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// Account balances in smallest units. Absent means zero.
    balances: HashMap<AccountId, u64>,
    /// Sum of all minted, never-burned credits.
    total_supply: u64,
    /// Fixed maximum supply. Mints that would exceed it fail in full.
    supply_cap: u64,
    /// Journal of committed events, drained by the environment.
    #[serde(skip)]
    events: Vec<EventRecord<LedgerEvent>>,
}

impl Ledger {
    /// Creates an empty ledger with the given supply cap.
    pub fn new(supply_cap: u64) -> Self {
        Self {
            balances: HashMap::new(),
            total_supply: 0,
            supply_cap,
            events: Vec::new(),
        }
    }

    /// Mints `amount` new credits to `recipient`.
    ///
    /// The caller must be the token authority or the oracle. Minting is a
    /// value-moving operation, so it is blocked while trading is paused.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotAuthorized`] for any other caller,
    /// [`LedgerError::Paused`] while halted,
    /// [`LedgerError::InvalidAmount`] on zero or overflowing amounts,
    /// [`LedgerError::ZeroAddress`] for the null recipient, and
    /// [`LedgerError::SupplyCapExceeded`] when the mint would pass the cap —
    /// the mint is rejected in full, supply stays unchanged.
    pub fn mint(
        &mut self,
        roles: &Roles,
        caller: &AccountId,
        recipient: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        roles.ensure_minter(caller)?;
        roles.ensure_active()?;
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if recipient.is_null() {
            return Err(LedgerError::ZeroAddress);
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;
        if new_supply > self.supply_cap {
            return Err(LedgerError::SupplyCapExceeded {
                supply: self.total_supply,
                requested: amount,
                cap: self.supply_cap,
            });
        }
        let credited = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;

        self.balances.insert(recipient.clone(), credited);
        self.total_supply = new_supply;

        info!(%recipient, amount, supply = self.total_supply, "minted credits");
        self.events.push(EventRecord::new(LedgerEvent::Mint {
            to: recipient.clone(),
            amount,
        }));
        Ok(())
    }

    /// Moves `amount` from `sender` to `recipient`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Paused`] while halted,
    /// [`LedgerError::InvalidAmount`] on zero amount or credit overflow,
    /// [`LedgerError::SelfTransfer`] when sender and recipient coincide, and
    /// [`LedgerError::InsufficientBalance`] when the sender cannot cover it.
    pub fn transfer(
        &mut self,
        roles: &Roles,
        sender: &AccountId,
        recipient: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        roles.ensure_active()?;
        self.apply_transfer(sender, recipient, amount)
    }

    /// Applies a sequence of transfers from one sender, atomically.
    ///
    /// `recipients` and `amounts` are parallel slices. The whole batch is
    /// staged against a copy of the balance map and committed only when
    /// every pair passes — the first failure is returned and no balance
    /// moves, unlike the marketplace's deliberately non-atomic batch buy.
    pub fn batch_transfer(
        &mut self,
        roles: &Roles,
        sender: &AccountId,
        recipients: &[AccountId],
        amounts: &[u64],
    ) -> Result<(), LedgerError> {
        roles.ensure_active()?;
        if recipients.len() != amounts.len() {
            return Err(LedgerError::LengthMismatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
            });
        }

        let mut staged = self.balances.clone();
        for (recipient, &amount) in recipients.iter().zip(amounts) {
            Self::move_between(&mut staged, sender, recipient, amount)?;
        }
        self.balances = staged;

        debug!(%sender, pairs = recipients.len(), "batch transfer committed");
        for (recipient, &amount) in recipients.iter().zip(amounts) {
            self.events.push(EventRecord::new(LedgerEvent::Transfer {
                from: sender.clone(),
                to: recipient.clone(),
                amount,
            }));
        }
        Ok(())
    }

    /// Current balance of `id`. Unknown identities hold 0.
    pub fn balance_of(&self, id: &AccountId) -> u64 {
        self.balances.get(id).copied().unwrap_or(0)
    }

    /// Total minted supply.
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// The fixed maximum supply.
    pub fn supply_cap(&self) -> u64 {
        self.supply_cap
    }

    /// All non-zero balances as `(account, amount)` pairs.
    pub fn all_balances(&self) -> Vec<(AccountId, u64)> {
        self.balances
            .iter()
            .filter(|(_, &amount)| amount > 0)
            .map(|(id, &amount)| (id.clone(), amount))
            .collect()
    }

    /// Yields and clears the event journal.
    pub fn drain_events(&mut self) -> Vec<EventRecord<LedgerEvent>> {
        std::mem::take(&mut self.events)
    }

    /// Validates and applies a single balance movement. All checks happen
    /// before either account is touched.
    fn move_between(
        balances: &mut HashMap<AccountId, u64>,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        let available = balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        let credited = balances
            .get(to)
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;

        balances.insert(from.clone(), available - amount);
        balances.insert(to.clone(), credited);
        Ok(())
    }

    /// Validated transfer without the pause gate. Shared by the public
    /// operation and the [`TransferCapability`] impl.
    fn apply_transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        Self::move_between(&mut self.balances, from, to, amount)?;
        debug!(%from, %to, amount, "transfer committed");
        self.events.push(EventRecord::new(LedgerEvent::Transfer {
            from: from.clone(),
            to: to.clone(),
            amount,
        }));
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPLY_CAP)
    }
}

impl TransferCapability for Ledger {
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.apply_transfer(from, to, amount)
    }

    fn balance_of(&self, id: &AccountId) -> u64 {
        Ledger::balance_of(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LedgerEvent;

    fn roles() -> Roles {
        Roles::new(
            AccountId::from("admin"),
            AccountId::from("oracle"),
            AccountId::from("authority"),
        )
        .unwrap()
    }

    fn authority() -> AccountId {
        AccountId::from("authority")
    }

    fn alice() -> AccountId {
        AccountId::from("alice")
    }

    fn bob() -> AccountId {
        AccountId::from("bob")
    }

    #[test]
    fn mint_credits_recipient_and_supply() {
        let r = roles();
        let mut ledger = Ledger::new(1_000_000);
        ledger.mint(&r, &authority(), &alice(), 500).unwrap();
        assert_eq!(ledger.balance_of(&alice()), 500);
        assert_eq!(ledger.total_supply(), 500);
    }

    #[test]
    fn oracle_may_also_mint() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger
            .mint(&r, &AccountId::from("oracle"), &alice(), 100)
            .unwrap();
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn mint_by_other_caller_rejected() {
        let r = roles();
        let mut ledger = Ledger::default();
        let result = ledger.mint(&r, &alice(), &alice(), 100);
        assert!(matches!(result, Err(LedgerError::NotAuthorized)));
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn mint_zero_rejected() {
        let r = roles();
        let mut ledger = Ledger::default();
        let result = ledger.mint(&r, &authority(), &alice(), 0);
        assert!(matches!(result, Err(LedgerError::InvalidAmount)));
    }

    #[test]
    fn mint_to_null_rejected() {
        let r = roles();
        let mut ledger = Ledger::default();
        let result = ledger.mint(&r, &authority(), &AccountId::null(), 100);
        assert!(matches!(result, Err(LedgerError::ZeroAddress)));
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn mint_past_cap_rejected_in_full() {
        let r = roles();
        let mut ledger = Ledger::new(1_000_000);
        ledger.mint(&r, &authority(), &alice(), 400_000).unwrap();

        let result = ledger.mint(&r, &authority(), &alice(), 600_001);
        assert!(matches!(
            result,
            Err(LedgerError::SupplyCapExceeded {
                supply: 400_000,
                requested: 600_001,
                cap: 1_000_000,
            })
        ));
        // Supply stays at the prior value — no partial mint.
        assert_eq!(ledger.total_supply(), 400_000);
        assert_eq!(ledger.balance_of(&alice()), 400_000);
    }

    #[test]
    fn mint_exactly_to_cap_allowed() {
        let r = roles();
        let mut ledger = Ledger::new(1_000);
        ledger.mint(&r, &authority(), &alice(), 1_000).unwrap();
        assert_eq!(ledger.total_supply(), 1_000);
    }

    #[test]
    fn transfer_moves_value_atomically() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 1_000).unwrap();

        ledger.transfer(&r, &alice(), &bob(), 300).unwrap();
        assert_eq!(ledger.balance_of(&alice()), 700);
        assert_eq!(ledger.balance_of(&bob()), 300);
        assert_eq!(ledger.total_supply(), 1_000);
    }

    #[test]
    fn transfer_zero_rejected() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 100).unwrap();
        let result = ledger.transfer(&r, &alice(), &bob(), 0);
        assert!(matches!(result, Err(LedgerError::InvalidAmount)));
    }

    #[test]
    fn self_transfer_rejected() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 100).unwrap();
        let result = ledger.transfer(&r, &alice(), &alice(), 50);
        assert!(matches!(result, Err(LedgerError::SelfTransfer)));
        assert_eq!(ledger.balance_of(&alice()), 100);
    }

    #[test]
    fn overdraw_rejected_with_amounts() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 100).unwrap();
        let result = ledger.transfer(&r, &alice(), &bob(), 200);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance {
                available: 100,
                requested: 200,
            })
        ));
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let ledger = Ledger::default();
        assert_eq!(ledger.balance_of(&AccountId::from("nobody")), 0);
    }

    #[test]
    fn batch_transfer_applies_in_order() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 1_000).unwrap();

        let recipients = [bob(), AccountId::from("carol")];
        ledger
            .batch_transfer(&r, &alice(), &recipients, &[100, 200])
            .unwrap();
        assert_eq!(ledger.balance_of(&alice()), 700);
        assert_eq!(ledger.balance_of(&bob()), 100);
        assert_eq!(ledger.balance_of(&AccountId::from("carol")), 200);
    }

    #[test]
    fn batch_transfer_is_atomic_on_failure() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 250).unwrap();

        // The second pair overdraws; the first must not stick.
        let recipients = [bob(), AccountId::from("carol"), AccountId::from("dave")];
        let result = ledger.batch_transfer(&r, &alice(), &recipients, &[100, 500, 1]);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance {
                available: 150,
                requested: 500,
            })
        ));
        assert_eq!(ledger.balance_of(&alice()), 250);
        assert_eq!(ledger.balance_of(&bob()), 0);
    }

    #[test]
    fn batch_transfer_length_mismatch_rejected() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 100).unwrap();
        let result = ledger.batch_transfer(&r, &alice(), &[bob()], &[10, 20]);
        assert!(matches!(
            result,
            Err(LedgerError::LengthMismatch {
                recipients: 1,
                amounts: 2,
            })
        ));
    }

    #[test]
    fn pause_blocks_value_movement_but_not_queries() {
        let mut r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 100).unwrap();

        r.set_paused(&AccountId::from("admin"), true).unwrap();
        assert!(matches!(
            ledger.mint(&r, &authority(), &alice(), 1),
            Err(LedgerError::Paused)
        ));
        assert!(matches!(
            ledger.transfer(&r, &alice(), &bob(), 1),
            Err(LedgerError::Paused)
        ));
        assert!(matches!(
            ledger.batch_transfer(&r, &alice(), &[bob()], &[1]),
            Err(LedgerError::Paused)
        ));
        // Queries keep working while halted.
        assert_eq!(ledger.balance_of(&alice()), 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn capability_transfer_bypasses_pause() {
        // The trait path validates balances but leaves pause policy to the
        // calling operation — dispute resolution relies on this.
        let mut r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 100).unwrap();
        r.set_paused(&AccountId::from("admin"), true).unwrap();

        TransferCapability::transfer(&mut ledger, &alice(), &bob(), 40).unwrap();
        assert_eq!(ledger.balance_of(&bob()), 40);
    }

    #[test]
    fn events_journal_mints_and_transfers() {
        let r = roles();
        let mut ledger = Ledger::default();
        ledger.mint(&r, &authority(), &alice(), 100).unwrap();
        ledger.transfer(&r, &alice(), &bob(), 30).unwrap();

        let events = ledger.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].event, LedgerEvent::Mint { amount: 100, .. }));
        assert!(matches!(
            events[1].event,
            LedgerEvent::Transfer { amount: 30, .. }
        ));
        // Draining clears the journal.
        assert!(ledger.drain_events().is_empty());
    }

    #[test]
    fn conservation_holds_after_every_operation() {
        let r = roles();
        let mut ledger = Ledger::default();
        let sum = |l: &Ledger| l.all_balances().iter().map(|(_, a)| a).sum::<u64>();

        ledger.mint(&r, &authority(), &alice(), 1_000).unwrap();
        assert_eq!(sum(&ledger), ledger.total_supply());

        ledger.transfer(&r, &alice(), &bob(), 123).unwrap();
        assert_eq!(sum(&ledger), ledger.total_supply());

        let _ = ledger.transfer(&r, &alice(), &bob(), u64::MAX);
        assert_eq!(sum(&ledger), ledger.total_supply());
    }

    #[test]
    fn ledger_serialization_roundtrip() {
        let r = roles();
        let mut ledger = Ledger::new(5_000);
        ledger.mint(&r, &authority(), &alice(), 1_200).unwrap();

        let json = serde_json::to_string(&ledger).expect("serialize");
        let back: Ledger = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.balance_of(&alice()), 1_200);
        assert_eq!(back.total_supply(), 1_200);
        assert_eq!(back.supply_cap(), 5_000);
    }
}
