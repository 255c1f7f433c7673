//! # mintgate CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Mintgate CLI — issuance tooling for tiered token sales.
///
/// Generates issuing-authority keypairs, signs eligibility proofs for
/// presale allowlists, and verifies proofs against an authority address.
#[derive(Parser, Debug)]
#[command(name = "mintgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate an issuing-authority keypair.
    Keygen(mintgate_cli::keygen::KeygenArgs),
    /// Sign an eligibility proof for a recipient/controller pair.
    Sign(mintgate_cli::sign::SignArgs),
    /// Verify a proof against an authority address.
    Verify(mintgate_cli::verify::VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen(args) => mintgate_cli::keygen::run(&args),
        Commands::Sign(args) => mintgate_cli::sign::run(&args),
        Commands::Verify(args) => mintgate_cli::verify::run(&args),
    }
}
