//! # Eligibility Proofs
//!
//! Defines `EligibilityProof`, the recoverable secp256k1 signature a
//! presale caller presents to demonstrate approval by the trusted
//! authority.
//!
//! ## Wire Format
//!
//! 65 bytes, hex-encoded: `r` (32 bytes) ‖ `s` (32 bytes) ‖ `v` (1 byte).
//! The recovery byte `v` may arrive as 0/1 or as the legacy 27/28 used by
//! wallet tooling; both are accepted on parse and normalized to 0/1.
//! Parsing checks format only — whether the scalars form a valid
//! signature is decided at verification time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CryptoError;

/// Byte length of an encoded proof.
pub const PROOF_LEN: usize = 65;

/// A recoverable secp256k1 signature over the canonical claim digest.
///
/// Proofs are ephemeral inputs: verified fresh on every claim, never
/// persisted by the issuance paths.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EligibilityProof {
    r: [u8; 32],
    s: [u8; 32],
    recovery_id: u8,
}

impl EligibilityProof {
    /// Assemble a proof from its signature components.
    ///
    /// Accepts a recovery byte of 0, 1, 27, or 28; the legacy values are
    /// normalized to 0/1.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedProof`] for any other recovery byte.
    pub fn from_parts(r: [u8; 32], s: [u8; 32], recovery_byte: u8) -> Result<Self, CryptoError> {
        let recovery_id = normalize_recovery_byte(recovery_byte)?;
        Ok(Self { r, s, recovery_id })
    }

    /// Decode a proof from the 65-byte wire encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PROOF_LEN {
            return Err(CryptoError::MalformedProof(format!(
                "proof must be {PROOF_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self::from_parts(r, s, bytes[64])
    }

    /// Parse a proof from a 130-character hex string.
    ///
    /// A leading `0x` is accepted and ignored; wallet tooling usually
    /// includes it, signing scripts usually do not.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")).unwrap_or(hex);
        if hex.len() != PROOF_LEN * 2 {
            return Err(CryptoError::MalformedProof(format!(
                "proof hex must be {} chars, got {}",
                PROOF_LEN * 2,
                hex.len()
            )));
        }
        let bytes = hex_to_bytes(&hex.to_lowercase()).map_err(CryptoError::MalformedProof)?;
        Self::from_bytes(&bytes)
    }

    /// Encode as the 65-byte wire format with `v` normalized to 0/1.
    pub fn to_bytes(&self) -> [u8; PROOF_LEN] {
        let mut out = [0u8; PROOF_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.recovery_id;
        out
    }

    /// Render as a 130-character lowercase hex string (no `0x` prefix).
    pub fn to_hex(&self) -> String {
        self.to_bytes().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// The `r` scalar bytes.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The `s` scalar bytes.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// The normalized recovery id (0 or 1).
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }
}

fn normalize_recovery_byte(v: u8) -> Result<u8, CryptoError> {
    match v {
        0 | 1 => Ok(v),
        27 => Ok(0),
        28 => Ok(1),
        other => Err(CryptoError::MalformedProof(format!(
            "recovery byte must be 0, 1, 27, or 28, got {other}"
        ))),
    }
}

impl Serialize for EligibilityProof {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EligibilityProof {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for EligibilityProof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.r.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "EligibilityProof({prefix}..., v={})", self.recovery_id)
    }
}

impl std::fmt::Display for EligibilityProof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EligibilityProof {
        EligibilityProof::from_parts([0x11; 32], [0x22; 32], 1).unwrap()
    }

    #[test]
    fn test_hex_roundtrip() {
        let proof = sample();
        let hex = proof.to_hex();
        assert_eq!(hex.len(), 130);
        let back = EligibilityProof::from_hex(&hex).unwrap();
        assert_eq!(proof, back);
    }

    #[test]
    fn test_from_hex_accepts_0x_prefix() {
        let proof = sample();
        let back = EligibilityProof::from_hex(&format!("0x{}", proof.to_hex())).unwrap();
        assert_eq!(proof, back);
    }

    #[test]
    fn test_legacy_recovery_bytes_normalized() {
        let with_27 = EligibilityProof::from_parts([1; 32], [2; 32], 27).unwrap();
        assert_eq!(with_27.recovery_id(), 0);
        let with_28 = EligibilityProof::from_parts([1; 32], [2; 32], 28).unwrap();
        assert_eq!(with_28.recovery_id(), 1);
    }

    #[test]
    fn test_plain_recovery_bytes_kept() {
        assert_eq!(EligibilityProof::from_parts([1; 32], [2; 32], 0).unwrap().recovery_id(), 0);
        assert_eq!(EligibilityProof::from_parts([1; 32], [2; 32], 1).unwrap().recovery_id(), 1);
    }

    #[test]
    fn test_bad_recovery_byte_rejected() {
        for v in [2u8, 3, 26, 29, 255] {
            assert!(EligibilityProof::from_parts([1; 32], [2; 32], v).is_err());
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(EligibilityProof::from_bytes(&[0u8; 64]).is_err());
        assert!(EligibilityProof::from_bytes(&[0u8; 66]).is_err());
        assert!(EligibilityProof::from_hex("aabb").is_err());
        assert!(EligibilityProof::from_hex(&"ab".repeat(64)).is_err());
    }

    #[test]
    fn test_non_hex_rejected() {
        assert!(EligibilityProof::from_hex(&"zz".repeat(65)).is_err());
    }

    #[test]
    fn test_to_bytes_layout() {
        let proof = EligibilityProof::from_parts([0xaa; 32], [0xbb; 32], 28).unwrap();
        let bytes = proof.to_bytes();
        assert!(bytes[..32].iter().all(|&b| b == 0xaa));
        assert!(bytes[32..64].iter().all(|&b| b == 0xbb));
        assert_eq!(bytes[64], 1);
    }

    #[test]
    fn test_serde_roundtrip() {
        let proof = sample();
        let json = serde_json::to_string(&proof).unwrap();
        assert!(json.starts_with('"'));
        assert_eq!(json.len(), 130 + 2);
        let back: EligibilityProof = serde_json::from_str(&json).unwrap();
        assert_eq!(proof, back);
    }

    #[test]
    fn test_debug_shows_prefix_only() {
        let proof = sample();
        let debug = format!("{proof:?}");
        assert!(debug.starts_with("EligibilityProof(11111111"));
        assert!(debug.contains("v=1"));
    }
}
