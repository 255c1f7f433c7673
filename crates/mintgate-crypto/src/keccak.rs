//! # Keccak-256 Hashing and the Claim Digest
//!
//! Provides keccak-256 hashing and the canonical claim digest that binds
//! an eligibility proof to one (recipient, controller) pair.
//!
//! ## Wire Contract
//!
//! The digest construction is a bit-exact external contract shared with
//! the off-band signing service and any partner tooling:
//!
//! ```text
//! inner  = keccak256(recipient_bytes ‖ controller_bytes)   // 20 + 20 bytes
//! digest = keccak256("\x19Ethereum Signed Message:\n32" ‖ inner)
//! ```
//!
//! Field order and widths are fixed. Identical pairs produce identical
//! digests on every platform; changing either address changes the digest,
//! which is what scopes a proof to one recipient under one controller.

use mintgate_core::Address;
use sha3::{Digest, Keccak256};

/// Recovery-prefix bytes prepended before the outer hash.
///
/// The `32` names the length of the inner hash that follows.
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute the keccak-256 hash of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Wrap a 32-byte hash in the signed-message recovery prefix.
pub fn eth_signed_digest(hash: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(ETH_SIGNED_MESSAGE_PREFIX);
    hasher.update(hash);
    hasher.finalize().into()
}

/// The canonical digest an eligibility proof signs.
///
/// Binds the proof to exactly one recipient and one sale controller:
/// a proof issued for a different recipient, or for the same recipient
/// under a different controller deployment, produces a different digest
/// and cannot verify.
pub fn claim_digest(recipient: Address, controller: Address) -> [u8; 32] {
    let mut pair = [0u8; 40];
    pair[..20].copy_from_slice(recipient.as_bytes());
    pair[20..].copy_from_slice(controller.as_bytes());
    eth_signed_digest(&keccak256(&pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_keccak256_empty_input() {
        // Keccak-256 (pre-NIST padding), not SHA3-256.
        assert_eq!(
            hex(&keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_abc() {
        assert_eq!(
            hex(&keccak256(b"abc")),
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn test_prefix_bytes() {
        assert_eq!(ETH_SIGNED_MESSAGE_PREFIX.len(), 28);
        assert!(ETH_SIGNED_MESSAGE_PREFIX.starts_with(&[0x19]));
        assert!(ETH_SIGNED_MESSAGE_PREFIX.ends_with(b"32"));
    }

    #[test]
    fn test_eth_signed_digest_matches_manual_construction() {
        let inner = keccak256(b"payload");
        let mut prefixed = ETH_SIGNED_MESSAGE_PREFIX.to_vec();
        prefixed.extend_from_slice(&inner);
        assert_eq!(eth_signed_digest(&inner), keccak256(&prefixed));
    }

    #[test]
    fn test_claim_digest_deterministic() {
        let recipient = Address::from_bytes([0xaa; 20]);
        let controller = Address::from_bytes([0xbb; 20]);
        assert_eq!(
            claim_digest(recipient, controller),
            claim_digest(recipient, controller)
        );
    }

    #[test]
    fn test_claim_digest_binds_recipient() {
        let controller = Address::from_bytes([0xbb; 20]);
        let a = claim_digest(Address::from_bytes([0x01; 20]), controller);
        let b = claim_digest(Address::from_bytes([0x02; 20]), controller);
        assert_ne!(a, b);
    }

    #[test]
    fn test_claim_digest_binds_controller() {
        let recipient = Address::from_bytes([0xaa; 20]);
        let a = claim_digest(recipient, Address::from_bytes([0x01; 20]));
        let b = claim_digest(recipient, Address::from_bytes([0x02; 20]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_claim_digest_order_matters() {
        let x = Address::from_bytes([0x01; 20]);
        let y = Address::from_bytes([0x02; 20]);
        assert_ne!(claim_digest(x, y), claim_digest(y, x));
    }

    #[test]
    fn test_claim_digest_matches_manual_construction() {
        let recipient = Address::from_bytes([0x11; 20]);
        let controller = Address::from_bytes([0x22; 20]);
        let mut pair = Vec::with_capacity(40);
        pair.extend_from_slice(recipient.as_bytes());
        pair.extend_from_slice(controller.as_bytes());
        let expected = eth_signed_digest(&keccak256(&pair));
        assert_eq!(claim_digest(recipient, controller), expected);
    }
}
