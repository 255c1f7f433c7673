//! # mintgate-cli — Issuance Tooling Command-Line Interface
//!
//! Operator-side tooling for running a presale allowlist: generate the
//! issuing authority's keypair, sign eligibility proofs for approved
//! wallets, and spot-check proofs before they ship.
//!
//! ## Subcommands
//!
//! - `keygen` — Generate an issuing-authority keypair
//! - `sign` — Produce an eligibility proof for a recipient/controller pair
//! - `verify` — Check a proof against an authority address
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no signing or recovery
//!   logic lives here.
//! - Output is plain text on stdout, one value per line, for scripting.
//!   Diagnostics go to `tracing`, never stdout.

pub mod keygen;
pub mod sign;
pub mod verify;
