//! # Token Ledger — Identifier to Holder Records
//!
//! The authoritative record of which token identifiers exist and who
//! holds them.
//!
//! ## Security Invariant
//!
//! - An identifier, once minted, exists permanently and is never reused.
//!   There is no burn or deletion path, so total supply only grows.
//! - Batch mints are atomic: every identifier is validated against the
//!   ledger and against the rest of the batch before anything is
//!   written. A failed batch leaves no partial state.
//!
//! The ledger is a pure data structure. Authorization is the caller's
//! concern; the [`crate::Collection`] facade gates every mutation before
//! it reaches here.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use mintgate_core::{Address, MintError, TokenId};

/// Identifier-to-holder records with an optional supply cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TokenLedger {
    holders: BTreeMap<TokenId, Address>,
    balances: BTreeMap<Address, u64>,
    supply_cap: Option<u64>,
}

impl TokenLedger {
    /// An empty ledger with unbounded supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty ledger that will never hold more than `cap` tokens.
    ///
    /// The cap bounds the count of minted tokens, not the numeric range
    /// of identifiers.
    pub fn with_supply_cap(cap: u64) -> Self {
        Self {
            supply_cap: Some(cap),
            ..Self::default()
        }
    }

    /// The configured supply cap, if any.
    pub fn supply_cap(&self) -> Option<u64> {
        self.supply_cap
    }

    /// Number of tokens minted so far.
    pub fn total_supply(&self) -> u64 {
        self.holders.len() as u64
    }

    /// Whether `identifier` has been minted.
    pub fn is_minted(&self, identifier: TokenId) -> bool {
        self.holders.contains_key(&identifier)
    }

    /// The current holder of `identifier`.
    ///
    /// # Errors
    ///
    /// [`MintError::NotFound`] if the identifier was never minted.
    pub fn holder_of(&self, identifier: TokenId) -> Result<Address, MintError> {
        self.holders
            .get(&identifier)
            .copied()
            .ok_or(MintError::NotFound { identifier })
    }

    /// Number of tokens currently held by `holder`.
    pub fn balance_of(&self, holder: Address) -> u64 {
        self.balances.get(&holder).copied().unwrap_or(0)
    }

    /// Mint one token.
    ///
    /// # Errors
    ///
    /// - [`MintError::DuplicateIdentifier`] if the identifier exists.
    /// - [`MintError::SupplyExhausted`] if the supply cap is reached.
    pub fn mint(&mut self, recipient: Address, identifier: TokenId) -> Result<(), MintError> {
        self.check_mintable(identifier)?;
        self.check_capacity(1)?;
        self.record_mint(recipient, identifier);
        Ok(())
    }

    /// Mint a batch of tokens to one recipient, atomically.
    ///
    /// Validates every identifier against the ledger and against the
    /// rest of the batch, and the batch size against the remaining
    /// capacity, before writing anything.
    ///
    /// # Errors
    ///
    /// - [`MintError::DuplicateIdentifier`] naming the first identifier
    ///   that already exists or repeats within the batch.
    /// - [`MintError::SupplyExhausted`] if the batch would overrun the cap.
    pub fn mint_batch(
        &mut self,
        recipient: Address,
        identifiers: &[TokenId],
    ) -> Result<(), MintError> {
        let mut seen = BTreeSet::new();
        for &identifier in identifiers {
            self.check_mintable(identifier)?;
            if !seen.insert(identifier) {
                return Err(MintError::DuplicateIdentifier { identifier });
            }
        }
        self.check_capacity(identifiers.len() as u64)?;
        for &identifier in identifiers {
            self.record_mint(recipient, identifier);
        }
        Ok(())
    }

    /// Move a minted token to a new holder.
    ///
    /// Pure record-keeping: the authorization decision (holder or
    /// approved delegate) belongs to the caller. Returns the previous
    /// holder.
    ///
    /// # Errors
    ///
    /// [`MintError::NotFound`] if the identifier was never minted.
    pub fn transfer(&mut self, identifier: TokenId, new_holder: Address) -> Result<Address, MintError> {
        let previous = self.holder_of(identifier)?;
        self.holders.insert(identifier, new_holder);
        self.decrement_balance(previous);
        *self.balances.entry(new_holder).or_insert(0) += 1;
        Ok(previous)
    }

    fn check_mintable(&self, identifier: TokenId) -> Result<(), MintError> {
        if self.is_minted(identifier) {
            return Err(MintError::DuplicateIdentifier { identifier });
        }
        Ok(())
    }

    fn check_capacity(&self, additional: u64) -> Result<(), MintError> {
        if let Some(cap) = self.supply_cap {
            if self.total_supply() + additional > cap {
                return Err(MintError::SupplyExhausted { cap });
            }
        }
        Ok(())
    }

    fn record_mint(&mut self, recipient: Address, identifier: TokenId) {
        self.holders.insert(identifier, recipient);
        *self.balances.entry(recipient).or_insert(0) += 1;
    }

    fn decrement_balance(&mut self, holder: Address) {
        if let Some(balance) = self.balances.get_mut(&holder) {
            *balance = balance.saturating_sub(1);
            if *balance == 0 {
                self.balances.remove(&holder);
            }
        }
    }
}
