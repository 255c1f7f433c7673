//! # The Issuing Authority
//!
//! The off-band signer side of the eligibility scheme: holds the
//! secp256k1 secret key and produces [`EligibilityProof`]s for approved
//! (recipient, controller) pairs. This runs in the operator's backend,
//! never inside a sale controller.
//!
//! ## Security Invariant
//!
//! - The secret key is never serialized or logged. `IssuingAuthority`
//!   does not implement `Serialize`, and its `Debug` output shows only
//!   the derived address.
//! - [`IssuingAuthority::secret_hex()`] exists solely for the key-file
//!   path of the `mintgate keygen` tool and is the only way the secret
//!   leaves the type.

use k256::ecdsa::{SigningKey, VerifyingKey};
use mintgate_core::Address;
use rand_core::OsRng;

use crate::error::CryptoError;
use crate::keccak::claim_digest;
use crate::proof::EligibilityProof;
use crate::verifier::address_of;

/// A secp256k1 keypair that signs eligibility proofs.
pub struct IssuingAuthority {
    signing_key: SigningKey,
}

impl IssuingAuthority {
    /// Generate a new random authority keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Load an authority from a 64-character hex secret key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyError`] for bad hex or a value outside
    /// the curve order.
    pub fn from_secret_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        if hex.len() != 64 {
            return Err(CryptoError::KeyError(format!(
                "secret key hex must be 64 chars, got {}",
                hex.len()
            )));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in bytes.iter_mut().enumerate() {
            *chunk = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|e| CryptoError::KeyError(format!("invalid hex: {e}")))?;
        }
        let signing_key = SigningKey::from_slice(&bytes)
            .map_err(|e| CryptoError::KeyError(format!("invalid secret key: {e}")))?;
        Ok(Self { signing_key })
    }

    /// The secret key as 64 lowercase hex chars, for key-file export.
    pub fn secret_hex(&self) -> String {
        self.signing_key
            .to_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    /// The authority's verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        *self.signing_key.verifying_key()
    }

    /// The authority's address, as configured into verifiers.
    pub fn address(&self) -> Address {
        address_of(self.signing_key.verifying_key())
    }

    /// Sign an eligibility proof for a (recipient, controller) pair.
    ///
    /// The proof verifies only for exactly this pair.
    pub fn issue(
        &self,
        recipient: Address,
        controller: Address,
    ) -> Result<EligibilityProof, CryptoError> {
        let digest = claim_digest(recipient, controller);
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let r: [u8; 32] = signature.r().to_bytes().into();
        let s: [u8; 32] = signature.s().to_bytes().into();
        EligibilityProof::from_parts(r, s, recovery_id.to_byte())
    }
}

impl std::fmt::Debug for IssuingAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IssuingAuthority({})", self.address())
    }
}
