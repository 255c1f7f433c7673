//! # Marketplace-Proxy Delegation
//!
//! The interface to an external proxy registry that maps each holder to
//! at most one delegate identity (a marketplace's transfer proxy).
//!
//! ## Security Invariant
//!
//! A delegate is an implicitly approved transfer agent for its holder's
//! tokens and **nothing more**. Delegation never grants mint rights;
//! minting always goes through the operator set.

use std::collections::BTreeMap;

use mintgate_core::Address;

/// Resolves each holder's marketplace-proxy delegate, if any.
///
/// Consulted per transfer; implementations must answer from current
/// state rather than a snapshot.
pub trait DelegateRegistry {
    /// The delegate approved to move `holder`'s tokens, if one exists.
    fn delegate_of(&self, holder: Address) -> Option<Address>;
}

/// A registry with no delegations. The default wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDelegateRegistry;

impl DelegateRegistry for NullDelegateRegistry {
    fn delegate_of(&self, _holder: Address) -> Option<Address> {
        None
    }
}

/// A fixed holder-to-delegate map.
///
/// Stands in for a real proxy registry in tests and single-market
/// deployments.
#[derive(Debug, Clone, Default)]
pub struct StaticDelegateRegistry {
    delegates: BTreeMap<Address, Address>,
}

impl StaticDelegateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the delegate for `holder`.
    pub fn set_delegate(&mut self, holder: Address, delegate: Address) {
        self.delegates.insert(holder, delegate);
    }

    /// Remove the delegation for `holder`, if any.
    pub fn clear_delegate(&mut self, holder: Address) {
        self.delegates.remove(&holder);
    }
}

impl DelegateRegistry for StaticDelegateRegistry {
    fn delegate_of(&self, holder: Address) -> Option<Address> {
        self.delegates.get(&holder).copied()
    }
}
