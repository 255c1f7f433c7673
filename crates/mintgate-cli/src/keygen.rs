//! # Keygen Subcommand
//!
//! Issuing-authority keypair generation.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use mintgate_crypto::IssuingAuthority;

/// Arguments for the keygen subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Write the secret key hex to this file; stdout then carries only
    /// the authority address.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Generate a fresh authority keypair.
///
/// With `--out` the secret lands in the key file and stdout prints the
/// authority address for pasting into verifier configuration. Without
/// it the secret hex itself is printed, for piping into a secret store.
pub fn run(args: &KeygenArgs) -> anyhow::Result<()> {
    let authority = IssuingAuthority::generate();
    tracing::info!(authority = %authority.address(), "generated issuing authority");

    match &args.out {
        Some(path) => {
            fs::write(path, authority.secret_hex())
                .with_context(|| format!("writing key file {}", path.display()))?;
            println!("{}", authority.address());
        }
        None => println!("{}", authority.secret_hex()),
    }
    Ok(())
}
