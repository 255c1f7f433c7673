//! # Issuance Events
//!
//! The entries of the collection's ordered event log, the sole
//! externally observable audit trail. Exactly three things are audited:
//! token issuance, operator-set changes, and ownership transfers.
//! Transfers of already-minted tokens are record-keeping moves and do
//! not appear here.

use serde::{Deserialize, Serialize};

use mintgate_core::{Address, TokenId};

/// An audit-trail entry recorded by the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A token was minted.
    Issued {
        /// The holder the token was minted to.
        recipient: Address,
        /// The minted identifier.
        identifier: TokenId,
    },

    /// An identity was added to or removed from the operator set.
    OperatorChanged {
        /// The affected identity.
        identity: Address,
        /// `true` for added, `false` for removed.
        enabled: bool,
    },

    /// The collection owner changed.
    OwnershipTransferred {
        /// The owner before the transfer.
        previous_owner: Address,
        /// The owner after the transfer.
        new_owner: Address,
    },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Issued {
                recipient,
                identifier,
            } => write!(f, "ISSUED token {identifier} to {recipient}"),
            Event::OperatorChanged { identity, enabled } => {
                let verb = if *enabled { "ENABLED" } else { "DISABLED" };
                write!(f, "OPERATOR_{verb} {identity}")
            }
            Event::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => write!(f, "OWNERSHIP {previous_owner} -> {new_owner}"),
        }
    }
}
