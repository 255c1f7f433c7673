//! # Permission Registry — Owner and Operator Set
//!
//! Tracks the single collection owner and the set of operator identities
//! authorized for privileged issuance.
//!
//! ## Security Invariant
//!
//! - Exactly one owner exists at all times; ownership changes atomically
//!   and only at the current owner's request.
//! - The operator set is mutated only by the owner. Membership is binary
//!   and explicit — absence means not an operator, there are no partial
//!   or implied grants.
//! - Ownership does **not** imply operator rights. An owner who wants to
//!   mint directly must register itself as an operator like anyone else.
//!
//! Every successful mutation bumps a monotonic version counter, so two
//! registry states can be compared without diffing the set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mintgate_core::{Address, MintError, RequiredRole};

/// The owner and operator set of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRegistry {
    owner: Address,
    operators: BTreeSet<Address>,
    version: u64,
}

impl PermissionRegistry {
    /// A registry with `owner` and an empty operator set.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            operators: BTreeSet::new(),
            version: 0,
        }
    }

    /// A registry with an initial operator set, as wired at deployment.
    pub fn with_operators(owner: Address, operators: impl IntoIterator<Item = Address>) -> Self {
        Self {
            owner,
            operators: operators.into_iter().collect(),
            version: 0,
        }
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Monotonic counter of successful mutations.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether `identity` is currently an operator.
    pub fn is_operator(&self, identity: Address) -> bool {
        self.operators.contains(&identity)
    }

    /// The current operator set, in address order.
    pub fn operators(&self) -> impl Iterator<Item = Address> + '_ {
        self.operators.iter().copied()
    }

    /// Add or remove an operator. Owner only.
    ///
    /// Idempotent in effect: enabling an existing operator or disabling
    /// an absent one leaves the set unchanged but still counts as a
    /// successful mutation.
    ///
    /// # Errors
    ///
    /// [`MintError::Unauthorized`] when `caller` is not the owner.
    pub fn set_operator(
        &mut self,
        caller: Address,
        identity: Address,
        enabled: bool,
    ) -> Result<(), MintError> {
        self.require_owner(caller)?;
        if enabled {
            self.operators.insert(identity);
        } else {
            self.operators.remove(&identity);
        }
        self.version += 1;
        Ok(())
    }

    /// Atomically replace the owner. Owner only.
    ///
    /// Returns the previous owner so the caller can record the change.
    ///
    /// # Errors
    ///
    /// [`MintError::Unauthorized`] when `caller` is not the owner.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Address, MintError> {
        self.require_owner(caller)?;
        let previous = self.owner;
        self.owner = new_owner;
        self.version += 1;
        Ok(previous)
    }

    /// Validate that `caller` is the current owner.
    pub fn require_owner(&self, caller: Address) -> Result<(), MintError> {
        if caller != self.owner {
            return Err(MintError::Unauthorized {
                caller,
                required: RequiredRole::Owner,
            });
        }
        Ok(())
    }

    /// Validate that `caller` is a registered operator.
    pub fn require_operator(&self, caller: Address) -> Result<(), MintError> {
        if !self.is_operator(caller) {
            return Err(MintError::Unauthorized {
                caller,
                required: RequiredRole::Operator,
            });
        }
        Ok(())
    }
}
