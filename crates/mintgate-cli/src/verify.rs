//! # Verify Subcommand
//!
//! Checks an eligibility proof against an authority address, exactly as
//! a presale controller would at claim time.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use mintgate_core::Address;
use mintgate_crypto::{EligibilityProof, ProofVerifier};

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Trusted authority address (0x-prefixed hex).
    #[arg(long)]
    pub authority: String,

    /// Recipient wallet address the proof should cover.
    #[arg(long)]
    pub recipient: String,

    /// Sale-controller address the proof should be bound to.
    #[arg(long)]
    pub controller: String,

    /// The proof as 130 hex chars.
    #[arg(long, conflicts_with = "proof_file")]
    pub proof: Option<String>,

    /// Read the proof hex from this file.
    #[arg(long)]
    pub proof_file: Option<PathBuf>,
}

/// Check a proof; exits nonzero when it does not verify.
pub fn run(args: &VerifyArgs) -> anyhow::Result<()> {
    let authority = Address::from_hex(&args.authority).context("invalid --authority address")?;
    let recipient = Address::from_hex(&args.recipient).context("invalid --recipient address")?;
    let controller = Address::from_hex(&args.controller).context("invalid --controller address")?;
    let proof = load_proof(args)?;

    let verifier = ProofVerifier::new(authority);
    if !verifier.verify(recipient, controller, &proof) {
        bail!(
            "proof does not verify for recipient {recipient} under controller {controller}"
        );
    }
    println!("valid");
    Ok(())
}

fn load_proof(args: &VerifyArgs) -> anyhow::Result<EligibilityProof> {
    let hex = match (&args.proof, &args.proof_file) {
        (Some(hex), _) => hex.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("reading proof file {}", path.display()))?,
        (None, None) => bail!("either --proof or --proof-file is required"),
    };
    EligibilityProof::from_hex(hex.trim()).context("parsing proof")
}
