use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "starledger",
    about = "Star registry ledger — signed star claims on a hash-linked chain",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Registry settings (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a new wallet key
    Keygen,
    /// Print the challenge a wallet must sign right now
    Challenge(ChallengeArgs),
    /// Sign a message with a wallet secret
    Sign(SignArgs),
    /// Verify a wallet signature over a message
    Verify(VerifyArgs),
    /// Run an in-process registry and register signed claims
    Demo(DemoArgs),
    /// Audit an exported chain file
    Audit(AuditArgs),
}

#[derive(Args)]
pub struct ChallengeArgs {
    pub address: String,
}

#[derive(Args)]
pub struct SignArgs {
    /// Hex-encoded 32-byte wallet secret
    #[arg(long)]
    pub secret: String,
    pub message: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub address: String,
    pub message: String,
    pub signature: String,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Number of concurrent claims to submit
    #[arg(short = 'n', long, default_value = "3")]
    pub claims: usize,
    /// Write the resulting chain as JSON
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct AuditArgs {
    pub path: PathBuf,
}
