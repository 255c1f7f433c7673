//! # Sale Configuration Errors
//!
//! Rejections raised when wiring a sale controller, before any claim or
//! purchase can happen. Runtime failures use the shared
//! [`mintgate_core::MintError`] taxonomy.

use thiserror::Error;

/// Invalid sale controller configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaleConfigError {
    /// A presale claim must entitle the caller to at least one token.
    #[error("presale entitlement must be at least 1 token per claim")]
    ZeroEntitlement,

    /// A configured per-wallet limit of zero would make every purchase fail.
    #[error("per-wallet limit must be at least 1 when configured")]
    ZeroWalletLimit,

    /// The public sale derives its opening from the presale close, so the
    /// presale window must be bounded.
    #[error("cannot schedule the public sale after an open-ended presale")]
    PresaleNeverCloses,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert!(SaleConfigError::ZeroEntitlement.to_string().contains("at least 1"));
        assert!(SaleConfigError::ZeroWalletLimit.to_string().contains("at least 1"));
        assert!(SaleConfigError::PresaleNeverCloses
            .to_string()
            .contains("open-ended"));
    }
}
