//! # Role Configuration
//!
//! Process-wide configuration of the privileged identities and the trading
//! pause flag. A [`Roles`] value is created once at system init and injected
//! by reference into every operation that needs an authorization or pause
//! check; it is mutated only through the admin-gated setters here.
//!
//! The admin role is self-transferable (never to the null identity). The
//! oracle and token authority are ordinary configuration values with no
//! uniqueness constraint between them — the same identity may hold both.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LedgerError;
use crate::identity::AccountId;

/// Privileged identities and the trading pause flag.
///
/// The pause flag gates every value-moving operation but never blocks
/// balance queries, admin reconfiguration, or dispute resolution — funds
/// already in escrow must stay reachable while trading is halted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roles {
    admin: AccountId,
    oracle: AccountId,
    token_authority: AccountId,
    paused: bool,
}

impl Roles {
    /// Creates the initial role configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroAddress`] if `admin` is the null identity.
    /// The oracle and token authority are unconstrained at init.
    pub fn new(
        admin: AccountId,
        oracle: AccountId,
        token_authority: AccountId,
    ) -> Result<Self, LedgerError> {
        if admin.is_null() {
            return Err(LedgerError::ZeroAddress);
        }
        Ok(Self {
            admin,
            oracle,
            token_authority,
            paused: false,
        })
    }

    /// Transfers the admin role. Admin-gated; the new admin must be a real
    /// identity.
    pub fn set_admin(&mut self, caller: &AccountId, new_admin: AccountId) -> Result<(), LedgerError> {
        self.ensure_admin(caller)?;
        if new_admin.is_null() {
            return Err(LedgerError::ZeroAddress);
        }
        info!(old = %self.admin, new = %new_admin, "admin role transferred");
        self.admin = new_admin;
        Ok(())
    }

    /// Replaces the delivery/production oracle. Admin-gated.
    pub fn set_oracle(&mut self, caller: &AccountId, new_oracle: AccountId) -> Result<(), LedgerError> {
        self.ensure_admin(caller)?;
        info!(old = %self.oracle, new = %new_oracle, "oracle reconfigured");
        self.oracle = new_oracle;
        Ok(())
    }

    /// Replaces the token authority. Admin-gated.
    pub fn set_authority(
        &mut self,
        caller: &AccountId,
        new_authority: AccountId,
    ) -> Result<(), LedgerError> {
        self.ensure_admin(caller)?;
        info!(old = %self.token_authority, new = %new_authority, "token authority reconfigured");
        self.token_authority = new_authority;
        Ok(())
    }

    /// Halts or resumes trading. Admin-gated, and deliberately never blocked
    /// by the pause flag itself — otherwise a halt could not be lifted.
    pub fn set_paused(&mut self, caller: &AccountId, paused: bool) -> Result<(), LedgerError> {
        self.ensure_admin(caller)?;
        info!(paused, "pause flag updated");
        self.paused = paused;
        Ok(())
    }

    /// The current admin identity.
    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    /// The current oracle identity.
    pub fn oracle(&self) -> &AccountId {
        &self.oracle
    }

    /// The current token authority identity.
    pub fn token_authority(&self) -> &AccountId {
        &self.token_authority
    }

    /// Whether trading is currently halted.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Fails with [`LedgerError::NotAuthorized`] unless `caller` is admin.
    pub fn ensure_admin(&self, caller: &AccountId) -> Result<(), LedgerError> {
        if caller != &self.admin {
            return Err(LedgerError::NotAuthorized);
        }
        Ok(())
    }

    /// Fails unless `caller` may mint new credits.
    ///
    /// Both the token authority and the oracle are accepted: in the
    /// energy-credit deployment, the production oracle mints credits as
    /// generation is attested.
    pub fn ensure_minter(&self, caller: &AccountId) -> Result<(), LedgerError> {
        if caller != &self.token_authority && caller != &self.oracle {
            return Err(LedgerError::NotAuthorized);
        }
        Ok(())
    }

    /// Fails with [`LedgerError::Paused`] while trading is halted.
    pub fn ensure_active(&self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }
}
