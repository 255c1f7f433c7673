//! # Sign Subcommand
//!
//! Eligibility-proof signing for presale allowlists. One invocation
//! produces one proof binding one recipient wallet to one sale
//! controller; allowlist backends run this once per approved wallet.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use mintgate_core::Address;
use mintgate_crypto::IssuingAuthority;

/// Arguments for the sign subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Read the authority secret key hex from this file.
    #[arg(long, conflicts_with = "secret")]
    pub key_file: Option<PathBuf>,

    /// Authority secret key as hex. Prefer --key-file; this form leaves
    /// the secret in shell history.
    #[arg(long)]
    pub secret: Option<String>,

    /// Recipient wallet address (0x-prefixed hex).
    #[arg(long)]
    pub recipient: String,

    /// Sale-controller address the proof is bound to (0x-prefixed hex).
    #[arg(long)]
    pub controller: String,

    /// Write the proof hex to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Produce an eligibility proof for one recipient under one controller.
pub fn run(args: &SignArgs) -> anyhow::Result<()> {
    let authority = load_authority(args)?;
    let recipient = Address::from_hex(&args.recipient).context("invalid --recipient address")?;
    let controller = Address::from_hex(&args.controller).context("invalid --controller address")?;

    let proof = authority
        .issue(recipient, controller)
        .context("signing eligibility proof")?;
    tracing::info!(
        authority = %authority.address(),
        recipient = %recipient,
        controller = %controller,
        "issued eligibility proof"
    );

    match &args.out {
        Some(path) => fs::write(path, proof.to_hex())
            .with_context(|| format!("writing proof file {}", path.display()))?,
        None => println!("{}", proof.to_hex()),
    }
    Ok(())
}

fn load_authority(args: &SignArgs) -> anyhow::Result<IssuingAuthority> {
    let secret = match (&args.key_file, &args.secret) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("reading key file {}", path.display()))?,
        (None, Some(secret)) => secret.clone(),
        (None, None) => bail!("either --key-file or --secret is required"),
    };
    IssuingAuthority::from_secret_hex(&secret).context("loading authority key")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintgate_crypto::{EligibilityProof, ProofVerifier};

    const RECIPIENT: &str = "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a";
    const CONTROLLER: &str = "0x0202020202020202020202020202020202020202";

    fn args_with(authority: &IssuingAuthority, out: PathBuf) -> SignArgs {
        SignArgs {
            key_file: None,
            secret: Some(authority.secret_hex()),
            recipient: RECIPIENT.to_string(),
            controller: CONTROLLER.to_string(),
            out: Some(out),
        }
    }

    #[test]
    fn test_signed_proof_verifies_for_the_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.proof");
        let authority = IssuingAuthority::generate();
        run(&args_with(&authority, path.clone())).unwrap();

        let proof = EligibilityProof::from_hex(&fs::read_to_string(&path).unwrap()).unwrap();
        let verifier = ProofVerifier::new(authority.address());
        let recipient = Address::from_hex(RECIPIENT).unwrap();
        let controller = Address::from_hex(CONTROLLER).unwrap();
        assert!(verifier.verify(recipient, controller, &proof));
        assert!(!verifier.verify(controller, recipient, &proof));
    }

    #[test]
    fn test_key_file_input() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("authority.key");
        let out_path = dir.path().join("alice.proof");
        let authority = IssuingAuthority::generate();
        fs::write(&key_path, authority.secret_hex()).unwrap();

        let args = SignArgs {
            key_file: Some(key_path),
            secret: None,
            recipient: RECIPIENT.to_string(),
            controller: CONTROLLER.to_string(),
            out: Some(out_path.clone()),
        };
        run(&args).unwrap();
        assert!(out_path.exists());
    }

    #[test]
    fn test_missing_key_source_fails() {
        let args = SignArgs {
            key_file: None,
            secret: None,
            recipient: RECIPIENT.to_string(),
            controller: CONTROLLER.to_string(),
            out: None,
        };
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_bad_recipient_address_fails() {
        let authority = IssuingAuthority::generate();
        let args = SignArgs {
            key_file: None,
            secret: Some(authority.secret_hex()),
            recipient: "not-an-address".to_string(),
            controller: CONTROLLER.to_string(),
            out: None,
        };
        assert!(run(&args).is_err());
    }
}
