//! # Account Addresses
//!
//! Defines `Address`, the 20-byte account identity used for owners,
//! operators, recipients, sale controllers, and the trusted proof
//! authority alike.
//!
//! ## Design
//!
//! - Canonical rendering is `0x` followed by 40 lowercase hex characters.
//!   Mixed-case input is accepted on parse and normalized; checksum casing
//!   is not enforced.
//! - Serde representation is the canonical hex string, so addresses embed
//!   naturally in JSON configuration and event logs.
//! - `Address` is `Copy`: it is passed by value everywhere, matching how
//!   the rest of the workspace treats identities as plain values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Byte length of an account address.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account address.
///
/// Used for every identity in the system: the collection owner, operator
/// set members, mint recipients, sale controller identities, and the
/// trusted authority that signs eligibility proofs.
///
/// # Construction
///
/// - [`Address::from_bytes()`] — from raw 20 bytes.
/// - [`Address::from_hex()`] — from a `0x`-prefixed 40-hex-char string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

/// Error parsing an address from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Input did not start with the `0x` prefix.
    #[error("address must start with 0x, got {0:?}")]
    MissingPrefix(String),

    /// Input had the wrong number of hex characters.
    #[error("address hex must be 40 chars after 0x, got {0}")]
    BadLength(usize),

    /// Input contained a non-hex character.
    #[error("invalid hex in address: {0}")]
    InvalidHex(String),
}

impl Address {
    /// Create an address from raw 20 bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Return the raw 20-byte address.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Render as `0x` + 40 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        let hex: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{hex}")
    }

    /// Parse an address from a `0x`-prefixed hex string.
    ///
    /// Accepts upper- or mixed-case hex and normalizes to lowercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is missing, the length is not
    /// exactly 40 hex characters, or a non-hex character appears.
    pub fn from_hex(hex: &str) -> Result<Self, AddressError> {
        let hex = hex.trim();
        let stripped = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .ok_or_else(|| AddressError::MissingPrefix(hex.to_string()))?;
        if stripped.len() != ADDRESS_LEN * 2 {
            return Err(AddressError::BadLength(stripped.len()));
        }
        let stripped = stripped.to_lowercase();
        let bytes = hex_to_bytes(&stripped).map_err(AddressError::InvalidHex)?;
        let mut arr = [0u8; ADDRESS_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The all-zero address, conventionally "nobody".
    ///
    /// Useful as a sentinel in tests; the issuance paths never treat it
    /// specially.
    pub fn zero() -> Self {
        Self([0u8; ADDRESS_LEN])
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl std::fmt::Display for Address {
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
