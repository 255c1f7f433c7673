//! # Collection — The Issuance Facade
//!
//! Composes the permission registry, the token ledger, the delegate
//! registry, and the event log into one aggregate. Every privileged
//! operation takes the caller's address and is gated here before any
//! state changes; the sub-structures stay pure.
//!
//! ## Gate Order
//!
//! Authorization is checked before ledger state on every path: a
//! non-operator minting an existing identifier gets `Unauthorized`, not
//! `DuplicateIdentifier`. Errors therefore never leak ledger contents to
//! unprivileged callers.
//!
//! ## Audit Trail
//!
//! The ordered event log records issuance, operator changes, and
//! ownership transfers, one entry per change, appended only after the
//! change succeeds. It is the sole externally observable audit surface.

use serde::{Deserialize, Serialize};

use mintgate_core::{Address, MintError, RequiredRole, TokenId};

use crate::events::Event;
use crate::ledger::TokenLedger;
use crate::proxy::{DelegateRegistry, NullDelegateRegistry};
use crate::registry::PermissionRegistry;

// ─── Configuration ───────────────────────────────────────────────────

/// Constructor configuration for a collection.
///
/// Consumed at construction; the base URI is the only field that can
/// change afterwards, and only at the owner's request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    name: String,
    symbol: String,
    base_uri: String,
    contract_uri: String,
    supply_cap: Option<u64>,
}

impl CollectionConfig {
    /// A configuration with the given display name and symbol, empty
    /// URIs, and unbounded supply.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            base_uri: String::new(),
            contract_uri: String::new(),
            supply_cap: None,
        }
    }

    /// Set the metadata base URI tokens resolve under.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Set the collection-level metadata URI.
    pub fn with_contract_uri(mut self, contract_uri: impl Into<String>) -> Self {
        self.contract_uri = contract_uri.into();
        self
    }

    /// Bound the number of tokens that may ever exist.
    pub fn with_supply_cap(mut self, cap: u64) -> Self {
        self.supply_cap = Some(cap);
        self
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

// ─── Collection ──────────────────────────────────────────────────────

/// One deployed collection: permissions, ledger, delegation, and audit
/// log behind a caller-gated API.
pub struct Collection {
    config: CollectionConfig,
    registry: PermissionRegistry,
    ledger: TokenLedger,
    delegates: Box<dyn DelegateRegistry + Send + Sync>,
    events: Vec<Event>,
}

impl Collection {
    /// A collection owned by `owner`, with no operators and no
    /// marketplace proxy.
    pub fn new(config: CollectionConfig, owner: Address) -> Self {
        Self::with_delegate_registry(config, owner, Box::new(NullDelegateRegistry))
    }

    /// A collection with an initial operator set, as wired at deployment.
    ///
    /// Seeded operators are initial state rather than changes: the
    /// registry version stays 0 and no `OperatorChanged` events are
    /// recorded.
    pub fn with_operators(
        config: CollectionConfig,
        owner: Address,
        operators: impl IntoIterator<Item = Address>,
    ) -> Self {
        let mut collection = Self::new(config, owner);
        collection.registry = PermissionRegistry::with_operators(owner, operators);
        collection
    }

    /// A collection wired to an external delegate registry.
    pub fn with_delegate_registry(
        config: CollectionConfig,
        owner: Address,
        delegates: Box<dyn DelegateRegistry + Send + Sync>,
    ) -> Self {
        let ledger = match config.supply_cap {
            Some(cap) => TokenLedger::with_supply_cap(cap),
            None => TokenLedger::new(),
        };
        Self {
            config,
            registry: PermissionRegistry::new(owner),
            ledger,
            delegates,
            events: Vec::new(),
        }
    }

    // ─── Reads ───────────────────────────────────────────────────────

    /// The display name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// The metadata base URI.
    pub fn base_uri(&self) -> &str {
        &self.config.base_uri
    }

    /// The collection-level metadata URI.
    pub fn contract_uri(&self) -> &str {
        &self.config.contract_uri
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.registry.owner()
    }

    /// Whether `identity` is a registered operator.
    pub fn is_operator(&self, identity: Address) -> bool {
        self.registry.is_operator(identity)
    }

    /// Monotonic version of the permission registry.
    pub fn registry_version(&self) -> u64 {
        self.registry.version()
    }

    /// The current holder of `identifier`.
    pub fn holder_of(&self, identifier: TokenId) -> Result<Address, MintError> {
        self.ledger.holder_of(identifier)
    }

    /// Whether `identifier` has been minted.
    pub fn is_minted(&self, identifier: TokenId) -> bool {
        self.ledger.is_minted(identifier)
    }

    /// Number of tokens minted so far.
    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    /// Number of tokens currently held by `holder`.
    pub fn balance_of(&self, holder: Address) -> u64 {
        self.ledger.balance_of(holder)
    }

    /// The configured supply cap, if any.
    pub fn supply_cap(&self) -> Option<u64> {
        self.ledger.supply_cap()
    }

    /// The ordered audit trail.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The metadata pointer of a minted token: base URI followed by the
    /// decimal identifier.
    ///
    /// # Errors
    ///
    /// [`MintError::NotFound`] if the identifier was never minted.
    pub fn token_uri(&self, identifier: TokenId) -> Result<String, MintError> {
        if !self.ledger.is_minted(identifier) {
            return Err(MintError::NotFound { identifier });
        }
        Ok(format!("{}{}", self.config.base_uri, identifier))
    }

    /// Whether `operator` is the marketplace-proxy delegate of `holder`.
    pub fn is_approved_for_all(&self, holder: Address, operator: Address) -> bool {
        self.delegates.delegate_of(holder) == Some(operator)
    }

    // ─── Owner-gated administration ──────────────────────────────────

    /// Add or remove an operator. Owner only.
    pub fn set_operator(
        &mut self,
        caller: Address,
        identity: Address,
        enabled: bool,
    ) -> Result<(), MintError> {
        self.registry.set_operator(caller, identity, enabled)?;
        self.events.push(Event::OperatorChanged { identity, enabled });
        Ok(())
    }

    /// Atomically replace the owner. Owner only.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), MintError> {
        let previous_owner = self.registry.transfer_ownership(caller, new_owner)?;
        self.events.push(Event::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    /// Change the metadata base URI. Owner only.
    pub fn update_base_uri(
        &mut self,
        caller: Address,
        base_uri: impl Into<String>,
    ) -> Result<(), MintError> {
        self.registry.require_owner(caller)?;
        self.config.base_uri = base_uri.into();
        Ok(())
    }

    // ─── Operator-gated issuance (the direct-mint path) ──────────────

    /// Mint one token to `recipient`. Operators only.
    ///
    /// # Errors
    ///
    /// - [`MintError::Unauthorized`] when `caller` is not an operator.
    /// - [`MintError::DuplicateIdentifier`] if the identifier exists.
    /// - [`MintError::SupplyExhausted`] if the supply cap is reached.
    pub fn mint(
        &mut self,
        caller: Address,
        recipient: Address,
        identifier: TokenId,
    ) -> Result<(), MintError> {
        self.registry.require_operator(caller)?;
        self.ledger.mint(recipient, identifier)?;
        self.events.push(Event::Issued {
            recipient,
            identifier,
        });
        Ok(())
    }

    /// Mint a batch of tokens to `recipient`, atomically. Operators only.
    ///
    /// A failing batch mints nothing and records no events.
    pub fn mint_batch(
        &mut self,
        caller: Address,
        recipient: Address,
        identifiers: &[TokenId],
    ) -> Result<(), MintError> {
        self.registry.require_operator(caller)?;
        self.ledger.mint_batch(recipient, identifiers)?;
        for &identifier in identifiers {
            self.events.push(Event::Issued {
                recipient,
                identifier,
            });
        }
        Ok(())
    }

    // ─── Transfers ───────────────────────────────────────────────────

    /// Move a minted token to `to`.
    ///
    /// Permitted for the current holder and for the holder's
    /// marketplace-proxy delegate. Transfers are record-keeping moves:
    /// they do not touch supply and do not appear in the event log.
    ///
    /// # Errors
    ///
    /// - [`MintError::NotFound`] if the identifier was never minted.
    /// - [`MintError::Unauthorized`] when `caller` is neither the holder
    ///   nor the holder's delegate.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        identifier: TokenId,
    ) -> Result<(), MintError> {
        let holder = self.ledger.holder_of(identifier)?;
        let delegated = self.delegates.delegate_of(holder) == Some(caller);
        if caller != holder && !delegated {
            return Err(MintError::Unauthorized {
                caller,
                required: RequiredRole::HolderOrDelegate,
            });
        }
        self.ledger.transfer(identifier, to)?;
        Ok(())
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.config.name)
            .field("symbol", &self.config.symbol)
            .field("owner", &self.registry.owner())
            .field("total_supply", &self.ledger.total_supply())
            .field("events", &self.events.len())
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
