//! # Offer & Escrow Engine
//!
//! The state machine driving the marketplace. On every lifecycle transition
//! the engine moves value by calling into the ledger's transfer capability;
//! it never mutates a balance itself. Escrowed funds are parked in the
//! engine's own custodial ledger account between purchase and settlement,
//! so the ledger-level conservation invariant (sum of balances == total
//! supply) covers escrow with no special cases.
//!
//! ## Pause semantics
//!
//! Listing, buying, and delivery confirmation are gated on the process-wide
//! pause flag. Dispute resolution is not: the admin must always be able to
//! unwind an escrow, even — especially — while trading is halted.

use std::collections::HashMap;

use tracing::{info, warn};

use watt_ledger::capability::TransferCapability;
use watt_ledger::events::EventRecord;
use watt_ledger::identity::AccountId;
use watt_ledger::roles::Roles;

use crate::config::{ESCROW_CUSTODIAN, FIRST_OFFER_ID, MAX_BATCH_PURCHASES};
use crate::error::MarketError;
use crate::events::MarketEvent;
use crate::offer::Offer;

/// Composite key for offers: `(seller, seller-scoped offer id)`.
type OfferKey = (AccountId, u64);

/// Composite key for escrow holds: `(buyer, seller, offer id)`.
///
/// The seller is part of the key because offer ids are only unique per
/// seller — one buyer can hold escrow against offer id 1 of two different
/// sellers at the same time.
type EscrowKey = (AccountId, AccountId, u64);

/// The offer & escrow engine.
///
/// Generic over the ledger capability so deployments can inject the real
/// [`Ledger`](watt_ledger::Ledger) and tests can substitute a double.
#[derive(Debug, Clone)]
pub struct Market<L> {
    /// The injected ledger capability. The engine's only path to balances.
    ledger: L,
    /// Listings, live and settled alike. Settled and expired offers stay
    /// queryable forever.
    offers: HashMap<OfferKey, Offer>,
    /// Outstanding escrow holds. An entry exists iff the matching offer is
    /// purchased and unclaimed.
    escrows: HashMap<EscrowKey, u64>,
    /// Per-seller id allocation. Monotonic, never reused.
    counters: HashMap<AccountId, u64>,
    /// The custodial account holding all escrowed value.
    custodian: AccountId,
    /// Journal of committed events, drained by the environment.
    events: Vec<EventRecord<MarketEvent>>,
}

impl<L: TransferCapability> Market<L> {
    /// Creates an empty marketplace over the given ledger capability.
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            offers: HashMap::new(),
            escrows: HashMap::new(),
            counters: HashMap::new(),
            custodian: AccountId::new(ESCROW_CUSTODIAN),
            events: Vec::new(),
        }
    }

    /// Lists a new offer and returns its seller-scoped id.
    ///
    /// # Errors
    ///
    /// [`MarketError::Paused`] while trading is halted,
    /// [`MarketError::InvalidAmount`] on zero quantity or unit price, and
    /// [`MarketError::Expired`] unless `expiry` is strictly in the future.
    pub fn create_offer(
        &mut self,
        roles: &Roles,
        seller: &AccountId,
        quantity: u64,
        unit_price: u64,
        expiry: u64,
        now: u64,
    ) -> Result<u64, MarketError> {
        if roles.is_paused() {
            return Err(MarketError::Paused);
        }
        if quantity == 0 || unit_price == 0 {
            return Err(MarketError::InvalidAmount);
        }
        if expiry <= now {
            return Err(MarketError::Expired);
        }

        let counter = self
            .counters
            .entry(seller.clone())
            .or_insert(FIRST_OFFER_ID - 1);
        *counter += 1;
        let offer_id = *counter;

        self.offers.insert(
            (seller.clone(), offer_id),
            Offer::new(seller.clone(), quantity, unit_price, expiry),
        );

        info!(%seller, offer_id, quantity, unit_price, expiry, "offer created");
        self.record(MarketEvent::OfferCreated {
            seller: seller.clone(),
            offer_id,
            quantity,
            unit_price,
            expiry,
        });
        Ok(offer_id)
    }

    /// Purchases an offer, locking `quantity × unit_price` in escrow.
    ///
    /// Funds move from the buyer into the custodial account; the offer is
    /// marked purchased but stays unclaimed until settlement. If the ledger
    /// rejects the transfer nothing changes here.
    ///
    /// # Errors
    ///
    /// [`MarketError::Paused`], [`MarketError::OfferNotFound`],
    /// [`MarketError::AlreadyClaimed`] when settled or already purchased,
    /// [`MarketError::Expired`] at or past the expiry height,
    /// [`MarketError::InvalidAmount`] when the total overflows, and
    /// [`MarketError::EscrowFailure`] when the ledger transfer fails.
    pub fn buy_offer(
        &mut self,
        roles: &Roles,
        buyer: &AccountId,
        seller: &AccountId,
        offer_id: u64,
        now: u64,
    ) -> Result<(), MarketError> {
        if roles.is_paused() {
            return Err(MarketError::Paused);
        }
        let key = (seller.clone(), offer_id);
        let offer = self.offers.get(&key).ok_or(MarketError::OfferNotFound)?;
        // A pre-existing buyer blocks purchase exactly like settlement does.
        if offer.claimed || offer.buyer.is_some() {
            return Err(MarketError::AlreadyClaimed);
        }
        if now >= offer.expiry {
            return Err(MarketError::Expired);
        }
        let total = offer.total_price().ok_or(MarketError::InvalidAmount)?;

        self.ledger
            .transfer(buyer, &self.custodian, total)
            .map_err(|e| {
                warn!(%buyer, %seller, offer_id, error = %e, "escrow transfer rejected");
                MarketError::EscrowFailure {
                    reason: e.to_string(),
                }
            })?;

        let offer = self.offers.get_mut(&key).ok_or(MarketError::OfferNotFound)?;
        offer.buyer = Some(buyer.clone());
        self.escrows
            .insert((buyer.clone(), seller.clone(), offer_id), total);

        info!(%buyer, %seller, offer_id, total, "offer purchased, funds escrowed");
        self.record(MarketEvent::OfferPurchased {
            buyer: buyer.clone(),
            seller: seller.clone(),
            offer_id,
            total,
        });
        Ok(())
    }

    /// Settles a purchased offer in the seller's favor on attested delivery.
    ///
    /// The caller must be the seller or the oracle. Releases the full hold
    /// from the custodial account to the seller, marks the offer claimed,
    /// and deletes the escrow entry. Terminal and irreversible.
    ///
    /// # Errors
    ///
    /// [`MarketError::NotAuthorized`] for any other caller,
    /// [`MarketError::Paused`] while halted,
    /// [`MarketError::OfferNotFound`] for a missing or never-purchased
    /// offer, [`MarketError::AlreadyClaimed`] once settled, and
    /// [`MarketError::EscrowFailure`] when the hold is missing/empty or the
    /// release transfer fails.
    pub fn confirm_delivery(
        &mut self,
        roles: &Roles,
        caller: &AccountId,
        seller: &AccountId,
        offer_id: u64,
    ) -> Result<(), MarketError> {
        if caller != seller && caller != roles.oracle() {
            return Err(MarketError::NotAuthorized);
        }
        if roles.is_paused() {
            return Err(MarketError::Paused);
        }
        let (amount, _) = self.settle(seller, offer_id, false)?;

        info!(%caller, %seller, offer_id, amount, "delivery confirmed, escrow released to seller");
        self.record(MarketEvent::DeliveryConfirmed {
            seller: seller.clone(),
            offer_id,
            amount,
        });
        Ok(())
    }

    /// Settles a purchased offer by admin ruling, to either party.
    ///
    /// Admin-only. Deliberately not gated on the pause flag: funds already
    /// in escrow must stay reachable while trading is halted. Releases the
    /// full hold to the buyer when `refund_buyer` is true, otherwise to the
    /// seller. Terminal.
    ///
    /// # Errors
    ///
    /// [`MarketError::NotAuthorized`] unless the caller is admin; otherwise
    /// the same preconditions as [`confirm_delivery`](Self::confirm_delivery).
    pub fn resolve_dispute(
        &mut self,
        roles: &Roles,
        caller: &AccountId,
        seller: &AccountId,
        offer_id: u64,
        refund_buyer: bool,
    ) -> Result<(), MarketError> {
        roles
            .ensure_admin(caller)
            .map_err(|_| MarketError::NotAuthorized)?;
        let (amount, recipient) = self.settle(seller, offer_id, refund_buyer)?;

        info!(%seller, offer_id, amount, refund_buyer, %recipient, "dispute resolved");
        self.record(MarketEvent::DisputeResolved {
            seller: seller.clone(),
            offer_id,
            amount,
            refund_buyer,
            recipient,
        });
        Ok(())
    }

    /// Purchases up to [`MAX_BATCH_PURCHASES`] offers in order.
    ///
    /// `sellers` and `offer_ids` are parallel slices. The batch
    /// short-circuits on the first failing purchase and returns that error
    /// **without rolling back** purchases already committed in the same
    /// batch — a preserved policy, intentionally weaker than the ledger's
    /// atomic batch transfer.
    ///
    /// # Errors
    ///
    /// [`MarketError::BatchLimitExceeded`] beyond the bound,
    /// [`MarketError::LengthMismatch`] when the slices differ, plus
    /// anything [`buy_offer`](Self::buy_offer) returns.
    pub fn batch_buy(
        &mut self,
        roles: &Roles,
        buyer: &AccountId,
        sellers: &[AccountId],
        offer_ids: &[u64],
        now: u64,
    ) -> Result<(), MarketError> {
        if sellers.len() > MAX_BATCH_PURCHASES {
            return Err(MarketError::BatchLimitExceeded {
                requested: sellers.len(),
                max: MAX_BATCH_PURCHASES,
            });
        }
        if sellers.len() != offer_ids.len() {
            return Err(MarketError::LengthMismatch {
                sellers: sellers.len(),
                offer_ids: offer_ids.len(),
            });
        }

        for (seller, &offer_id) in sellers.iter().zip(offer_ids) {
            self.buy_offer(roles, buyer, seller, offer_id, now)?;
        }
        Ok(())
    }

    /// Looks up an offer. Settled and expired offers remain queryable.
    pub fn get_offer(&self, seller: &AccountId, offer_id: u64) -> Option<&Offer> {
        self.offers.get(&(seller.clone(), offer_id))
    }

    /// The outstanding escrow hold for `(buyer, seller, offer_id)`, if any.
    pub fn get_escrow(&self, buyer: &AccountId, seller: &AccountId, offer_id: u64) -> Option<u64> {
        self.escrows
            .get(&(buyer.clone(), seller.clone(), offer_id))
            .copied()
    }

    /// The highest offer id allocated for `seller` so far; 0 before any.
    pub fn get_offer_counter(&self, seller: &AccountId) -> u64 {
        self.counters.get(seller).copied().unwrap_or(0)
    }

    /// The custodial escrow account identity.
    pub fn custodian(&self) -> &AccountId {
        &self.custodian
    }

    /// Borrows the underlying ledger capability.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutably borrows the underlying ledger capability, e.g. for the
    /// environment to run mints and direct transfers.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Yields and clears the event journal.
    pub fn drain_events(&mut self) -> Vec<EventRecord<MarketEvent>> {
        std::mem::take(&mut self.events)
    }

    /// Shared settlement path for delivery confirmation and dispute
    /// resolution: verifies the offer is purchased and unclaimed, releases
    /// the full hold from custody, marks the offer claimed, and deletes the
    /// escrow entry. Returns the released amount and its recipient.
    fn settle(
        &mut self,
        seller: &AccountId,
        offer_id: u64,
        refund_buyer: bool,
    ) -> Result<(u64, AccountId), MarketError> {
        let key = (seller.clone(), offer_id);
        let offer = self.offers.get(&key).ok_or(MarketError::OfferNotFound)?;
        if offer.claimed {
            return Err(MarketError::AlreadyClaimed);
        }
        // A never-purchased offer has nothing to settle; treated as not
        // found rather than a distinct condition.
        let buyer = offer.buyer.clone().ok_or(MarketError::OfferNotFound)?;

        let escrow_key = (buyer.clone(), seller.clone(), offer_id);
        let amount = self
            .escrows
            .get(&escrow_key)
            .copied()
            .ok_or_else(|| MarketError::EscrowFailure {
                reason: format!("no escrow hold for buyer {buyer} on offer {offer_id}"),
            })?;
        if amount == 0 {
            return Err(MarketError::EscrowFailure {
                reason: format!("empty escrow hold on offer {offer_id}"),
            });
        }

        let recipient = if refund_buyer { buyer.clone() } else { seller.clone() };
        self.ledger
            .transfer(&self.custodian, &recipient, amount)
            .map_err(|e| {
                warn!(%seller, offer_id, error = %e, "escrow release rejected");
                MarketError::EscrowFailure {
                    reason: e.to_string(),
                }
            })?;

        let offer = self.offers.get_mut(&key).ok_or(MarketError::OfferNotFound)?;
        offer.claimed = true;
        self.escrows.remove(&escrow_key);
        Ok((amount, recipient))
    }

    fn record(&mut self, event: MarketEvent) {
        self.events.push(EventRecord::new(event));
    }
}
