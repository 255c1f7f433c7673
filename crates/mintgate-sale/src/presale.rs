//! # Presale Controller — Signature-Gated Claims
//!
//! The restricted issuance path: a caller may claim only inside the
//! configured window, only with an eligibility proof signed by the
//! trusted authority for exactly this caller under exactly this
//! controller, and only once.
//!
//! ## Gate Order
//!
//! Every claim is checked in a fixed order, each gate aborting the whole
//! operation with no state change:
//!
//! 1. window phase (`NotStarted` / `SaleClosed`),
//! 2. proof verification (`InvalidProof`),
//! 3. replay protection (`AlreadyClaimed`),
//! 4. allocation and the atomic mint through the collection.
//!
//! ## Security Invariant
//!
//! - The claimed marker is written only **after** the mint succeeds. A
//!   transient failure (the controller not yet registered as an
//!   operator, a supply cap collision) leaves the caller unclaimed and
//!   free to retry.
//! - The proof digest binds the caller **and** the controller address:
//!   observing someone else's proof is useless, and a proof issued for a
//!   different deployment never verifies here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mintgate_core::{Address, MintError, SalePhase, SaleWindow, Timestamp, TokenId};
use mintgate_crypto::{EligibilityProof, ProofVerifier};
use mintgate_ledger::Collection;

use crate::allocate::allocate_identifiers;
use crate::error::SaleConfigError;

/// Constructor configuration for a presale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresaleConfig {
    controller: Address,
    window: SaleWindow,
    tokens_per_claim: u64,
    first_identifier: TokenId,
}

impl PresaleConfig {
    /// A presale run by `controller` inside `window`, granting one token
    /// per claim and allocating identifiers from 1 upwards.
    pub fn new(controller: Address, window: SaleWindow) -> Self {
        Self {
            controller,
            window,
            tokens_per_claim: 1,
            first_identifier: TokenId::MIN,
        }
    }

    /// Number of tokens one successful claim mints.
    pub fn with_tokens_per_claim(mut self, tokens_per_claim: u64) -> Self {
        self.tokens_per_claim = tokens_per_claim;
        self
    }

    /// Lowest identifier the controller will allocate from.
    pub fn with_first_identifier(mut self, first_identifier: TokenId) -> Self {
        self.first_identifier = first_identifier;
        self
    }

    /// The controller's own operator identity.
    pub fn controller(&self) -> Address {
        self.controller
    }

    /// The claim window.
    pub fn window(&self) -> SaleWindow {
        self.window
    }

    /// Tokens granted per successful claim.
    pub fn tokens_per_claim(&self) -> u64 {
        self.tokens_per_claim
    }

    /// Lowest identifier allocated by this controller.
    pub fn first_identifier(&self) -> TokenId {
        self.first_identifier
    }
}

/// The signature-gated claim path.
///
/// Mints through a [`Collection`] under its configured controller
/// identity, which must be registered as an operator there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresaleController {
    config: PresaleConfig,
    verifier: ProofVerifier,
    claimed: BTreeSet<Address>,
    next_identifier: TokenId,
}

impl PresaleController {
    /// Wire a presale from its configuration and proof verifier.
    ///
    /// # Errors
    ///
    /// [`SaleConfigError::ZeroEntitlement`] when the configuration grants
    /// zero tokens per claim.
    pub fn new(config: PresaleConfig, verifier: ProofVerifier) -> Result<Self, SaleConfigError> {
        if config.tokens_per_claim == 0 {
            return Err(SaleConfigError::ZeroEntitlement);
        }
        let next_identifier = config.first_identifier;
        Ok(Self {
            config,
            verifier,
            claimed: BTreeSet::new(),
            next_identifier,
        })
    }

    /// The controller configuration.
    pub fn config(&self) -> &PresaleConfig {
        &self.config
    }

    /// The identity this controller mints under.
    pub fn controller_address(&self) -> Address {
        self.config.controller
    }

    /// Whether `recipient` has already claimed successfully.
    pub fn has_claimed(&self, recipient: Address) -> bool {
        self.claimed.contains(&recipient)
    }

    /// Number of successful claims so far.
    pub fn claim_count(&self) -> u64 {
        self.claimed.len() as u64
    }

    /// The window phase at `now`.
    pub fn phase(&self, now: Timestamp) -> SalePhase {
        self.config.window.phase(now)
    }

    /// Claim the caller's entitlement.
    ///
    /// On success mints `tokens_per_claim` sequentially allocated
    /// identifiers to the caller through `collection` and marks the
    /// caller claimed. Returns the minted identifiers.
    ///
    /// # Errors
    ///
    /// - [`MintError::NotStarted`] / [`MintError::SaleClosed`] outside
    ///   the window.
    /// - [`MintError::InvalidProof`] when the proof does not verify for
    ///   (caller, controller).
    /// - [`MintError::AlreadyClaimed`] on a repeat claim.
    /// - Any ledger error from the mint itself, in which case the caller
    ///   remains unclaimed.
    pub fn claim(
        &mut self,
        collection: &mut Collection,
        caller: Address,
        proof: &EligibilityProof,
        now: Timestamp,
    ) -> Result<Vec<TokenId>, MintError> {
        self.require_open(now)?;

        if !self.verifier.verify(caller, self.config.controller, proof) {
            return Err(MintError::InvalidProof { recipient: caller });
        }

        if self.claimed.contains(&caller) {
            return Err(MintError::AlreadyClaimed { recipient: caller });
        }

        let (allocated, next) =
            allocate_identifiers(collection, self.next_identifier, self.config.tokens_per_claim)?;
        collection.mint_batch(self.config.controller, caller, &allocated)?;

        self.claimed.insert(caller);
        self.next_identifier = next;
        Ok(allocated)
    }

    fn require_open(&self, now: Timestamp) -> Result<(), MintError> {
        match self.config.window.phase(now) {
            SalePhase::Upcoming => Err(MintError::NotStarted {
                opens_at: self.config.window.opens_at(),
                now,
            }),
            SalePhase::Closed => Err(MintError::SaleClosed {
                closed_at: self
                    .config
                    .window
                    .closes_at()
                    .unwrap_or_else(|| self.config.window.opens_at()),
                now,
            }),
            SalePhase::Open => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintgate_crypto::IssuingAuthority;
    use mintgate_ledger::CollectionConfig;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    fn id(value: u64) -> TokenId {
        TokenId::new(value).unwrap()
    }

    fn ts(iso: &str) -> Timestamp {
        Timestamp::parse(iso).unwrap()
    }

    const OWNER: u8 = 0x01;
    const CONTROLLER: u8 = 0x02;
    const ALICE: u8 = 0x0a;
    const BOB: u8 = 0x0b;

    const OPEN: &str = "2026-03-01T12:00:00Z";
    const CLOSE: &str = "2026-03-02T12:00:00Z";

    struct Fixture {
        collection: Collection,
        controller: PresaleController,
        authority: IssuingAuthority,
    }

    fn make_fixture(tokens_per_claim: u64) -> Fixture {
        let mut collection =
            Collection::new(CollectionConfig::new("Undead Punks", "UDP"), addr(OWNER));
        collection
            .set_operator(addr(OWNER), addr(CONTROLLER), true)
            .unwrap();

        let authority = IssuingAuthority::generate();
        let window = SaleWindow::between(ts(OPEN), ts(CLOSE)).unwrap();
        let config = PresaleConfig::new(addr(CONTROLLER), window)
            .with_tokens_per_claim(tokens_per_claim);
        let controller =
            PresaleController::new(config, ProofVerifier::new(authority.address())).unwrap();

        Fixture {
            collection,
            controller,
            authority,
        }
    }

    fn proof_for(fixture: &Fixture, recipient: Address) -> EligibilityProof {
        fixture
            .authority
            .issue(recipient, fixture.controller.controller_address())
            .unwrap()
    }

    // ── Configuration ────────────────────────────────────────────────

    #[test]
    fn test_zero_entitlement_rejected() {
        let window = SaleWindow::starting_at(ts(OPEN));
        let config = PresaleConfig::new(addr(CONTROLLER), window).with_tokens_per_claim(0);
        let err = PresaleController::new(config, ProofVerifier::new(addr(0x77))).unwrap_err();
        assert_eq!(err, SaleConfigError::ZeroEntitlement);
    }

    #[test]
    fn test_default_config_grants_one_from_one() {
        let config = PresaleConfig::new(addr(CONTROLLER), SaleWindow::starting_at(ts(OPEN)));
        assert_eq!(config.tokens_per_claim(), 1);
        assert_eq!(config.first_identifier(), id(1));
    }

    // ── Temporal gating ──────────────────────────────────────────────

    #[test]
    fn test_claim_before_open_is_not_started() {
        let mut f = make_fixture(1);
        let proof = proof_for(&f, addr(ALICE));
        let before = ts(OPEN).checked_add_secs(-1).unwrap();
        let err = f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, before)
            .unwrap_err();
        assert_eq!(
            err,
            MintError::NotStarted {
                opens_at: ts(OPEN),
                now: before,
            }
        );
        assert!(!f.controller.has_claimed(addr(ALICE)));
        assert_eq!(f.collection.total_supply(), 0);
    }

    #[test]
    fn test_claim_at_exact_open_succeeds() {
        let mut f = make_fixture(1);
        let proof = proof_for(&f, addr(ALICE));
        let minted = f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap();
        assert_eq!(minted, vec![id(1)]);
        assert_eq!(f.collection.holder_of(id(1)).unwrap(), addr(ALICE));
    }

    #[test]
    fn test_claim_after_close_is_sale_closed() {
        let mut f = make_fixture(1);
        let proof = proof_for(&f, addr(ALICE));
        let err = f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(CLOSE))
            .unwrap_err();
        assert_eq!(
            err,
            MintError::SaleClosed {
                closed_at: ts(CLOSE),
                now: ts(CLOSE),
            }
        );
    }

    // ── Proof gating ─────────────────────────────────────────────────

    #[test]
    fn test_claim_with_wrong_recipient_proof_rejected() {
        let mut f = make_fixture(1);
        // Bob presents Alice's proof.
        let proof = proof_for(&f, addr(ALICE));
        let err = f
            .controller
            .claim(&mut f.collection, addr(BOB), &proof, ts(OPEN))
            .unwrap_err();
        assert_eq!(err, MintError::InvalidProof { recipient: addr(BOB) });
        assert_eq!(f.collection.total_supply(), 0);
    }

    #[test]
    fn test_claim_with_foreign_authority_proof_rejected() {
        let mut f = make_fixture(1);
        let imposter = IssuingAuthority::generate();
        let proof = imposter
            .issue(addr(ALICE), f.controller.controller_address())
            .unwrap();
        assert!(f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .is_err());
    }

    #[test]
    fn test_claim_with_other_controller_proof_rejected() {
        let mut f = make_fixture(1);
        let proof = f.authority.issue(addr(ALICE), addr(0x55)).unwrap();
        let err = f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap_err();
        assert_eq!(err, MintError::InvalidProof { recipient: addr(ALICE) });
    }

    // ── Replay protection ────────────────────────────────────────────

    #[test]
    fn test_second_claim_is_already_claimed() {
        let mut f = make_fixture(1);
        let proof = proof_for(&f, addr(ALICE));
        f.controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap();
        let later = ts(OPEN).checked_add_secs(1).unwrap();
        let err = f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, later)
            .unwrap_err();
        assert_eq!(err, MintError::AlreadyClaimed { recipient: addr(ALICE) });
        // The first mint stands; nothing extra was issued.
        assert_eq!(f.collection.total_supply(), 1);
        assert_eq!(f.controller.claim_count(), 1);
    }

    #[test]
    fn test_failed_mint_leaves_caller_unclaimed() {
        let mut f = make_fixture(1);
        // Revoke the controller's operator registration so the mint fails.
        f.collection
            .set_operator(addr(OWNER), addr(CONTROLLER), false)
            .unwrap();
        let proof = proof_for(&f, addr(ALICE));
        assert!(f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .is_err());
        assert!(!f.controller.has_claimed(addr(ALICE)));

        // Re-register and retry: the claim now goes through.
        f.collection
            .set_operator(addr(OWNER), addr(CONTROLLER), true)
            .unwrap();
        f.controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap();
        assert!(f.controller.has_claimed(addr(ALICE)));
    }

    // ── Allocation ───────────────────────────────────────────────────

    #[test]
    fn test_entitlement_mints_sequential_identifiers() {
        let mut f = make_fixture(3);
        let proof = proof_for(&f, addr(ALICE));
        let minted = f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap();
        assert_eq!(minted, vec![id(1), id(2), id(3)]);
        assert_eq!(f.collection.balance_of(addr(ALICE)), 3);
    }

    #[test]
    fn test_allocation_skips_direct_minted_identifiers() {
        let mut f = make_fixture(2);
        // An operator direct-minted id 2 before the presale claim.
        f.collection.mint(addr(CONTROLLER), addr(0x33), id(2)).unwrap();
        let proof = proof_for(&f, addr(ALICE));
        let minted = f
            .controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap();
        assert_eq!(minted, vec![id(1), id(3)]);
    }

    #[test]
    fn test_successive_claims_continue_the_sequence() {
        let mut f = make_fixture(2);
        let alice_proof = proof_for(&f, addr(ALICE));
        let bob_proof = proof_for(&f, addr(BOB));
        let first = f
            .controller
            .claim(&mut f.collection, addr(ALICE), &alice_proof, ts(OPEN))
            .unwrap();
        let second = f
            .controller
            .claim(&mut f.collection, addr(BOB), &bob_proof, ts(OPEN))
            .unwrap();
        assert_eq!(first, vec![id(1), id(2)]);
        assert_eq!(second, vec![id(3), id(4)]);
    }

    #[test]
    fn test_first_identifier_offsets_allocation() {
        let mut collection =
            Collection::new(CollectionConfig::new("Undead Punks", "UDP"), addr(OWNER));
        collection
            .set_operator(addr(OWNER), addr(CONTROLLER), true)
            .unwrap();
        let authority = IssuingAuthority::generate();
        let config = PresaleConfig::new(addr(CONTROLLER), SaleWindow::starting_at(ts(OPEN)))
            .with_first_identifier(id(100));
        let mut controller =
            PresaleController::new(config, ProofVerifier::new(authority.address())).unwrap();
        let proof = authority.issue(addr(ALICE), addr(CONTROLLER)).unwrap();
        let minted = controller
            .claim(&mut collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap();
        assert_eq!(minted, vec![id(100)]);
    }

    #[test]
    fn test_supply_cap_fails_claim_whole() {
        let mut collection = Collection::new(
            CollectionConfig::new("Undead Punks", "UDP").with_supply_cap(1),
            addr(OWNER),
        );
        collection
            .set_operator(addr(OWNER), addr(CONTROLLER), true)
            .unwrap();
        let authority = IssuingAuthority::generate();
        let config = PresaleConfig::new(addr(CONTROLLER), SaleWindow::starting_at(ts(OPEN)))
            .with_tokens_per_claim(2);
        let mut controller =
            PresaleController::new(config, ProofVerifier::new(authority.address())).unwrap();
        let proof = authority.issue(addr(ALICE), addr(CONTROLLER)).unwrap();
        let err = controller
            .claim(&mut collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap_err();
        assert_eq!(err, MintError::SupplyExhausted { cap: 1 });
        assert_eq!(collection.total_supply(), 0);
        assert!(!controller.has_claimed(addr(ALICE)));
    }

    // ── Serde ────────────────────────────────────────────────────────

    #[test]
    fn test_controller_state_serde_roundtrip() {
        let mut f = make_fixture(1);
        let proof = proof_for(&f, addr(ALICE));
        f.controller
            .claim(&mut f.collection, addr(ALICE), &proof, ts(OPEN))
            .unwrap();
        let json = serde_json::to_string(&f.controller).unwrap();
        let restored: PresaleController = serde_json::from_str(&json).unwrap();
        assert!(restored.has_claimed(addr(ALICE)));
        assert_eq!(restored.claim_count(), 1);
    }
}
