//! # mintgate-sale — Scheduled Issuance Controllers
//!
//! The two timed issuance paths that sit in front of a
//! [`Collection`](mintgate_ledger::Collection):
//!
//! - [`PresaleController`]: signature-gated early access. A claim needs a
//!   recoverable proof from the configured issuing authority binding the
//!   claimant to this controller, and each wallet claims at most once.
//! - [`PublicSaleController`]: open purchases once the public window is
//!   live, bounded only by the optional per-wallet quota.
//!
//! Both controllers are operators of the collection they mint through and
//! are subject to its authorization and supply rules like any other
//! caller. Neither holds a clock: every entry point takes the caller's
//! `now`, so phase decisions are explicit and replayable in tests.
//!
//! ## Security Invariant
//!
//! Controller state advances only after the underlying mint commits. A
//! claim or purchase that fails in the ledger leaves the replay marker
//! and quota ledger untouched, so the caller can retry once the cause is
//! fixed.

mod allocate;
mod error;
mod presale;
mod public;

pub use error::SaleConfigError;
pub use presale::{PresaleConfig, PresaleController};
pub use public::{PublicSaleConfig, PublicSaleController};
