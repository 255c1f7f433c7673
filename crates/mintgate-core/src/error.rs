//! # Error Types — The Issuance Failure Taxonomy
//!
//! Defines `MintError`, the single error vocabulary shared by every
//! issuance path. All errors use `thiserror` for derive-based `Display`
//! and `Error` implementations.
//!
//! ## Design
//!
//! - Every variant carries the context a caller needs to act on the
//!   failure: which caller was rejected, which identifier collided,
//!   which instant the gate compared against.
//! - An error always means the whole operation was rejected with no
//!   partial state change; callers never need to inspect state after a
//!   failure to learn what happened.
//! - Parse errors for individual primitives (`AddressError`,
//!   `TokenIdError`, `TimestampError`) stay beside their types; this
//!   enum covers the domain operations.

use thiserror::Error;

use crate::address::Address;
use crate::temporal::Timestamp;
use crate::token::TokenId;

/// The role an operation required of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// The single collection owner.
    Owner,
    /// A member of the operator set.
    Operator,
    /// The current token holder or the holder's approved delegate.
    HolderOrDelegate,
}

impl std::fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RequiredRole::Owner => "only the owner",
            RequiredRole::Operator => "only operators",
            RequiredRole::HolderOrDelegate => "only the holder or an approved delegate",
        };
        f.write_str(s)
    }
}

/// Failure of an issuance-path operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintError {
    /// Caller lacks the required privilege.
    #[error("unauthorized caller {caller}: {required}")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
        /// The role the operation demanded.
        required: RequiredRole,
    },

    /// Temporal gate not yet open.
    #[error("sale has not started: opens at {opens_at}, now {now}")]
    NotStarted {
        /// Configured opening instant.
        opens_at: Timestamp,
        /// The clock value the gate compared against.
        now: Timestamp,
    },

    /// Temporal gate already closed.
    #[error("sale is closed: closed at {closed_at}, now {now}")]
    SaleClosed {
        /// Configured closing instant.
        closed_at: Timestamp,
        /// The clock value the gate compared against.
        now: Timestamp,
    },

    /// Eligibility proof did not verify for this recipient.
    #[error("invalid eligibility proof for recipient {recipient}")]
    InvalidProof {
        /// The recipient the proof was checked for.
        recipient: Address,
    },

    /// Recipient already consumed their presale claim.
    #[error("recipient {recipient} has already claimed")]
    AlreadyClaimed {
        /// The recipient whose claim was replayed.
        recipient: Address,
    },

    /// Token identifier already minted.
    #[error("token identifier {identifier} already exists")]
    DuplicateIdentifier {
        /// The colliding identifier.
        identifier: TokenId,
    },

    /// Query for an identifier that was never minted.
    #[error("token identifier {identifier} not found")]
    NotFound {
        /// The unknown identifier.
        identifier: TokenId,
    },

    /// The configured supply cap has been reached.
    #[error("supply cap of {cap} tokens reached")]
    SupplyExhausted {
        /// The configured maximum number of tokens.
        cap: u64,
    },

    /// Caller exceeded the per-wallet purchase limit.
    #[error("quota exceeded: caller {caller} is limited to {limit} tokens")]
    QuotaExceeded {
        /// The over-limit caller.
        caller: Address,
        /// The configured per-wallet limit.
        limit: u64,
    },

    /// A purchase must request at least one token.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}
