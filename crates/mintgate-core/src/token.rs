//! # Token Identifiers
//!
//! Defines `TokenId`, the unique positive-integer identifier of a minted
//! token. Zero is not a valid identifier, so the type wraps `NonZeroU64`
//! and the invalid value is unrepresentable.

use std::num::NonZeroU64;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A unique positive-integer token identifier.
///
/// Identifiers are assigned once at mint time and never reused. The ledger
/// enforces uniqueness; this type enforces positivity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(NonZeroU64);

/// Error constructing a token identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenIdError {
    /// Token identifiers start at 1.
    #[error("token identifier must be a positive integer, got 0")]
    Zero,
}

impl TokenId {
    /// The lowest valid identifier, 1.
    pub const MIN: TokenId = TokenId(NonZeroU64::MIN);

    /// Create a token identifier from a positive integer.
    ///
    /// # Errors
    ///
    /// Returns [`TokenIdError::Zero`] for 0.
    pub fn new(value: u64) -> Result<Self, TokenIdError> {
        NonZeroU64::new(value).map(Self).ok_or(TokenIdError::Zero)
    }

    /// The numeric value of the identifier.
    pub fn value(&self) -> u64 {
        self.0.get()
    }

    /// The next identifier in sequence.
    ///
    /// Returns `None` on `u64::MAX` overflow, which no realistic
    /// collection reaches.
    pub fn next(&self) -> Option<Self> {
        self.0.get().checked_add(1).and_then(NonZeroU64::new).map(Self)
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value())
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenId({})", self.value())
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<u64> for TokenId {
    type Error = TokenIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TokenId> for u64 {
    fn from(id: TokenId) -> u64 {
        id.value()
    }
}
