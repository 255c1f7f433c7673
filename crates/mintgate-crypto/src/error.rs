//! # Crypto Error Types
//!
//! Failure modes of key handling, proof parsing, and proof issuance.
//! Verification deliberately has no error type: [`crate::ProofVerifier`]
//! answers with `bool` and the calling controller picks the domain error
//! to surface.

use thiserror::Error;

/// Error in cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Proof bytes or hex did not match the 65-byte `r ‖ s ‖ v` format.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// Producing a signature failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            CryptoError::KeyError("bad seed".into()).to_string(),
            "key error: bad seed"
        );
        assert_eq!(
            CryptoError::MalformedProof("truncated".into()).to_string(),
            "malformed proof: truncated"
        );
        assert_eq!(
            CryptoError::SigningFailed("rng".into()).to_string(),
            "signing failed: rng"
        );
    }
}
