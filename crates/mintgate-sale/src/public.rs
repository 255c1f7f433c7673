//! # Public-Sale Controller — Open Purchases
//!
//! The unrestricted issuance path: once the window opens, any caller may
//! buy, subject only to a positive quantity and the optional per-wallet
//! quota. No signature gating; payment handling is an external
//! collaborator's concern and never reaches this controller.
//!
//! Scheduling convention: the public sale opens when the presale closes.
//! [`PublicSaleConfig::after_presale`] derives that wiring directly from
//! the presale configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mintgate_core::{Address, MintError, SalePhase, SaleWindow, Timestamp, TokenId};
use mintgate_ledger::Collection;

use crate::allocate::allocate_identifiers;
use crate::error::SaleConfigError;
use crate::presale::PresaleConfig;

/// Constructor configuration for a public sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSaleConfig {
    controller: Address,
    window: SaleWindow,
    per_wallet_limit: Option<u64>,
    first_identifier: TokenId,
}

impl PublicSaleConfig {
    /// A public sale run by `controller` inside `window`, with no
    /// per-wallet quota, allocating identifiers from 1 upwards.
    pub fn new(controller: Address, window: SaleWindow) -> Self {
        Self {
            controller,
            window,
            per_wallet_limit: None,
            first_identifier: TokenId::MIN,
        }
    }

    /// A public sale opening the moment `presale` closes, open-ended.
    ///
    /// Allocation continues in the same identifier namespace, starting
    /// from the presale's first identifier; already-minted identifiers
    /// are skipped at claim time.
    ///
    /// # Errors
    ///
    /// [`SaleConfigError::PresaleNeverCloses`] when the presale window
    /// has no closing instant to hand over at.
    pub fn after_presale(
        controller: Address,
        presale: &PresaleConfig,
    ) -> Result<Self, SaleConfigError> {
        let opens_at = presale
            .window()
            .closes_at()
            .ok_or(SaleConfigError::PresaleNeverCloses)?;
        Ok(Self {
            controller,
            window: SaleWindow::starting_at(opens_at),
            per_wallet_limit: None,
            first_identifier: presale.first_identifier(),
        })
    }

    /// Cap the number of tokens any single wallet may buy in total.
    pub fn with_per_wallet_limit(mut self, limit: u64) -> Self {
        self.per_wallet_limit = Some(limit);
        self
    }

    /// Lowest identifier the controller will allocate from.
    pub fn with_first_identifier(mut self, first_identifier: TokenId) -> Self {
        self.first_identifier = first_identifier;
        self
    }

    /// The controller's own operator identity.
    pub fn controller(&self) -> Address {
        self.controller
    }

    /// The purchase window.
    pub fn window(&self) -> SaleWindow {
        self.window
    }

    /// The per-wallet quota, if configured.
    pub fn per_wallet_limit(&self) -> Option<u64> {
        self.per_wallet_limit
    }

    /// Lowest identifier allocated by this controller.
    pub fn first_identifier(&self) -> TokenId {
        self.first_identifier
    }
}

/// The open purchase path.
///
/// Mints through a [`Collection`] under its configured controller
/// identity, which must be registered as an operator there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSaleController {
    config: PublicSaleConfig,
    purchased: BTreeMap<Address, u64>,
    next_identifier: TokenId,
}

impl PublicSaleController {
    /// Wire a public sale from its configuration.
    ///
    /// # Errors
    ///
    /// [`SaleConfigError::ZeroWalletLimit`] when a quota of zero is
    /// configured.
    pub fn new(config: PublicSaleConfig) -> Result<Self, SaleConfigError> {
        if config.per_wallet_limit == Some(0) {
            return Err(SaleConfigError::ZeroWalletLimit);
        }
        let next_identifier = config.first_identifier;
        Ok(Self {
            config,
            purchased: BTreeMap::new(),
            next_identifier,
        })
    }

    /// The controller configuration.
    pub fn config(&self) -> &PublicSaleConfig {
        &self.config
    }

    /// The identity this controller mints under.
    pub fn controller_address(&self) -> Address {
        self.config.controller
    }

    /// Total tokens bought by `caller` so far.
    pub fn purchased_by(&self, caller: Address) -> u64 {
        self.purchased.get(&caller).copied().unwrap_or(0)
    }

    /// The window phase at `now`.
    pub fn phase(&self, now: Timestamp) -> SalePhase {
        self.config.window.phase(now)
    }

    /// Buy `quantity` tokens.
    ///
    /// On success mints `quantity` sequentially allocated identifiers to
    /// the caller through `collection` and records them against the
    /// caller's quota. Returns the minted identifiers.
    ///
    /// # Errors
    ///
    /// - [`MintError::NotStarted`] / [`MintError::SaleClosed`] outside
    ///   the window.
    /// - [`MintError::InvalidQuantity`] for a zero quantity.
    /// - [`MintError::QuotaExceeded`] when the purchase would take the
    ///   caller past the per-wallet limit.
    /// - Any ledger error from the mint itself, in which case nothing is
    ///   recorded against the caller.
    pub fn buy(
        &mut self,
        collection: &mut Collection,
        caller: Address,
        quantity: u64,
        now: Timestamp,
    ) -> Result<Vec<TokenId>, MintError> {
        self.require_open(now)?;

        if quantity == 0 {
            return Err(MintError::InvalidQuantity);
        }

        if let Some(limit) = self.config.per_wallet_limit {
            let already = self.purchased_by(caller);
            if already.saturating_add(quantity) > limit {
                return Err(MintError::QuotaExceeded { caller, limit });
            }
        }

        let (allocated, next) =
            allocate_identifiers(collection, self.next_identifier, quantity)?;
        collection.mint_batch(self.config.controller, caller, &allocated)?;

        *self.purchased.entry(caller).or_insert(0) += quantity;
        self.next_identifier = next;
        Ok(allocated)
    }

    fn require_open(&self, now: Timestamp) -> Result<(), MintError> {
        match self.config.window.phase(now) {
            SalePhase::Upcoming => Err(MintError::NotStarted {
                opens_at: self.config.window.opens_at(),
                now,
            }),
            SalePhase::Closed => Err(MintError::SaleClosed {
                closed_at: self
                    .config
                    .window
                    .closes_at()
                    .unwrap_or_else(|| self.config.window.opens_at()),
                now,
            }),
            SalePhase::Open => Ok(()),
        }
    }
}
