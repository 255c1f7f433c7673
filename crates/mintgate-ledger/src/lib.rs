//! # mintgate-ledger — Issuance State
//!
//! The stateful core of the issuance stack:
//!
//! - **`PermissionRegistry`**: the single owner and the operator set,
//!   with owner-gated mutation and a monotonic version counter.
//! - **`TokenLedger`**: identifier-to-holder records with an optional
//!   supply cap and atomic batch mint.
//! - **`DelegateRegistry`**: the marketplace-proxy seam; delegates may
//!   move a holder's tokens but can never mint.
//! - **`Event`**: the three audit-trail entry kinds.
//! - **`Collection`**: the facade that composes all of the above behind
//!   a caller-gated API. The operator-gated direct-mint path lives here;
//!   the sale controllers in `mintgate-sale` mint through it.
//!
//! ## Crate Policy
//!
//! - Every mutation takes `&mut self` and validates before writing; an
//!   error implies no state change.
//! - Caller gating sits at the aggregate boundaries: the registry gates
//!   its own mutations, the `Collection` gates issuance and transfer.
//!   The `TokenLedger` stays a pure data structure.

pub mod collection;
pub mod events;
pub mod ledger;
pub mod proxy;
pub mod registry;

pub use collection::{Collection, CollectionConfig};
pub use events::Event;
pub use ledger::TokenLedger;
pub use proxy::{DelegateRegistry, NullDelegateRegistry, StaticDelegateRegistry};
pub use registry::PermissionRegistry;
