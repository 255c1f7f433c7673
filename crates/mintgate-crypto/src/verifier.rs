//! # Proof Verification
//!
//! Recover-and-compare verification of eligibility proofs: recover the
//! signer's public key from the signature over the claim digest, derive
//! its address, and compare against the configured trusted authority.
//!
//! ## Security Invariant
//!
//! - Verification is total over adversarial input. Truncated hex,
//!   out-of-range scalars, and invalid recovery ids all yield `false`,
//!   never a panic; the calling controller decides which domain error to
//!   surface.
//! - The verifier holds only the authority's **address**. No public key
//!   is configured or stored; it is recovered from each proof, which is
//!   what makes the scheme allowlist-free.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use mintgate_core::Address;
use serde::{Deserialize, Serialize};

use crate::keccak::{claim_digest, keccak256};
use crate::proof::EligibilityProof;

/// Derive the 20-byte address of a secp256k1 verifying key.
///
/// Keccak-256 of the uncompressed SEC1 point without its `0x04` tag,
/// keeping the final 20 bytes.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address::from_bytes(bytes)
}

/// Recover the address that signed `digest`, if the proof is well formed.
///
/// Returns `None` when the scalars do not form a valid signature or no
/// point can be recovered.
pub fn recover_signer(digest: &[u8; 32], proof: &EligibilityProof) -> Option<Address> {
    let signature = Signature::from_scalars(*proof.r(), *proof.s()).ok()?;
    let recovery_id = RecoveryId::from_byte(proof.recovery_id())?;
    let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id).ok()?;
    Some(address_of(&key))
}

/// Checks eligibility proofs against one trusted authority address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofVerifier {
    authority: Address,
}

impl ProofVerifier {
    /// A verifier trusting `authority`.
    pub fn new(authority: Address) -> Self {
        Self { authority }
    }

    /// The trusted authority address.
    pub fn authority(&self) -> Address {
        self.authority
    }

    /// Check a proof for a (recipient, controller) pair.
    ///
    /// `true` iff the proof's signer recovers to the trusted authority
    /// over the canonical claim digest of exactly this pair. Any
    /// malformed component yields `false`.
    pub fn verify(
        &self,
        recipient: Address,
        controller: Address,
        proof: &EligibilityProof,
    ) -> bool {
        let digest = claim_digest(recipient, controller);
        match recover_signer(&digest, proof) {
            Some(signer) => signer == self.authority,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::IssuingAuthority;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn test_valid_proof_verifies() {
        let authority = IssuingAuthority::generate();
        let verifier = ProofVerifier::new(authority.address());
        let recipient = addr(0x11);
        let controller = addr(0x22);
        let proof = authority.issue(recipient, controller).unwrap();
        assert!(verifier.verify(recipient, controller, &proof));
    }

    #[test]
    fn test_proof_rejected_for_other_recipient() {
        let authority = IssuingAuthority::generate();
        let verifier = ProofVerifier::new(authority.address());
        let controller = addr(0x22);
        let proof = authority.issue(addr(0x11), controller).unwrap();
        assert!(!verifier.verify(addr(0x33), controller, &proof));
    }

    #[test]
    fn test_proof_rejected_for_other_controller() {
        let authority = IssuingAuthority::generate();
        let verifier = ProofVerifier::new(authority.address());
        let recipient = addr(0x11);
        let proof = authority.issue(recipient, addr(0x22)).unwrap();
        assert!(!verifier.verify(recipient, addr(0x44), &proof));
    }

    #[test]
    fn test_proof_from_untrusted_signer_rejected() {
        let authority = IssuingAuthority::generate();
        let imposter = IssuingAuthority::generate();
        let verifier = ProofVerifier::new(authority.address());
        let recipient = addr(0x11);
        let controller = addr(0x22);
        let proof = imposter.issue(recipient, controller).unwrap();
        assert!(!verifier.verify(recipient, controller, &proof));
    }

    #[test]
    fn test_garbage_scalars_do_not_verify() {
        let authority = IssuingAuthority::generate();
        let verifier = ProofVerifier::new(authority.address());
        // All-zero r is not a valid scalar; recovery must fail cleanly.
        let proof = EligibilityProof::from_parts([0u8; 32], [0u8; 32], 0).unwrap();
        assert!(!verifier.verify(addr(0x11), addr(0x22), &proof));
    }

    #[test]
    fn test_flipped_recovery_id_changes_signer() {
        let authority = IssuingAuthority::generate();
        let verifier = ProofVerifier::new(authority.address());
        let recipient = addr(0x11);
        let controller = addr(0x22);
        let proof = authority.issue(recipient, controller).unwrap();
        let flipped =
            EligibilityProof::from_parts(*proof.r(), *proof.s(), 1 - proof.recovery_id()).unwrap();
        assert!(!verifier.verify(recipient, controller, &flipped));
    }

    #[test]
    fn test_address_of_matches_authority_address() {
        let authority = IssuingAuthority::generate();
        assert_eq!(address_of(&authority.verifying_key()), authority.address());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Arbitrary bytes must never panic the verifier, and all but
            // an astronomically unlikely forgery must fail to verify.
            #[test]
            fn verify_is_total_over_arbitrary_proof_bytes(
                r in proptest::array::uniform32(any::<u8>()),
                s in proptest::array::uniform32(any::<u8>()),
                v in 0u8..=1,
            ) {
                let verifier = ProofVerifier::new(Address::from_bytes([0x77; 20]));
                let proof = EligibilityProof::from_parts(r, s, v).unwrap();
                let recipient = Address::from_bytes([0x11; 20]);
                let controller = Address::from_bytes([0x22; 20]);
                prop_assert!(!verifier.verify(recipient, controller, &proof));
            }

            #[test]
            fn from_hex_is_total_over_arbitrary_strings(input in ".{0,200}") {
                // Parse may fail; it must not panic.
                let _ = EligibilityProof::from_hex(&input);
            }
        }
    }
}
