//! # mintgate-core — Foundational Types for the Issuance Stack
//!
//! This crate is the bedrock of the mintgate workspace. It defines the
//! type-system primitives every other crate builds on: 20-byte account
//! addresses, positive-integer token identifiers, UTC-only timestamps,
//! sale windows with derived phases, and the single error taxonomy shared
//! by every issuance path. Every other crate in the workspace depends on
//! `mintgate-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Address` and `TokenId`
//!    are newtypes with validated constructors. No bare strings for
//!    identities, no bare integers for token identifiers.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Sale gating compares instants, so a
//!    timezone ambiguity would change who is allowed to mint.
//!
//! 3. **Derived sale phases.** `SaleWindow::phase()` recomputes
//!    `Upcoming`/`Open`/`Closed` from the supplied clock on every call.
//!    Nothing caches a phase; there is no stale-state window.
//!
//! 4. **One failure vocabulary.** Every operation across the workspace
//!    fails with a `MintError` variant carrying the context a caller needs
//!    (who, which identifier, which instant). No stringly-typed errors at
//!    crate boundaries.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mintgate-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod address;
pub mod error;
pub mod temporal;
pub mod token;

// Re-export primary types for ergonomic imports.
pub use address::{Address, AddressError};
pub use error::{MintError, RequiredRole};
pub use temporal::{SalePhase, SaleWindow, Timestamp, TimestampError, WindowError};
pub use token::{TokenId, TokenIdError};
