//! # mintgate-crypto — Cryptographic Primitives
//!
//! Provides the cryptographic building blocks of the issuance stack:
//!
//! - **Keccak-256** hashing and the canonical claim digest binding a
//!   proof to one (recipient, controller) pair.
//! - **Eligibility proofs**: recoverable secp256k1 signatures in the
//!   65-byte `r ‖ s ‖ v` wire format, with legacy 27/28 recovery bytes
//!   normalized on parse.
//! - **`ProofVerifier`**: recover-and-compare verification against a
//!   configured authority address. Total over adversarial input.
//! - **`IssuingAuthority`**: the off-band signer that produces proofs.
//!
//! ## Crate Policy
//!
//! - Depends only on `mintgate-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use
//!   real keccak-256 and real secp256k1 keys.
//! - Secret key material never implements `Serialize` and never appears
//!   in `Debug` output.

pub mod authority;
pub mod error;
pub mod keccak;
pub mod proof;
pub mod verifier;

pub use authority::IssuingAuthority;
pub use error::CryptoError;
pub use keccak::{claim_digest, eth_signed_digest, keccak256, ETH_SIGNED_MESSAGE_PREFIX};
pub use proof::{EligibilityProof, PROOF_LEN};
pub use verifier::{address_of, recover_signer, ProofVerifier};
