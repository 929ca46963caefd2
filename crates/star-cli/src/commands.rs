use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use star_crypto::{verify_wallet_message, WalletKey};
use star_ledger::{ChainAuditor, LedgerRecord, RegistryConfig, StarRegistry, Violation};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let json = matches!(cli.format, OutputFormat::Json);
    match cli.command {
        Command::Keygen => cmd_keygen(json),
        Command::Challenge(args) => cmd_challenge(config, args, json),
        Command::Sign(args) => cmd_sign(args, json),
        Command::Verify(args) => cmd_verify(args, json),
        Command::Demo(args) => cmd_demo(config, args, json).await,
        Command::Audit(args) => cmd_audit(args, json),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<RegistryConfig> {
    let Some(path) = path else {
        return Ok(RegistryConfig::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = RegistryConfig::from_toml_str(&source)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(?config, "loaded registry config");
    Ok(config)
}

fn cmd_keygen(json: bool) -> anyhow::Result<()> {
    let key = WalletKey::generate();
    if json {
        println!("{}", json!({"address": key.address(), "secret": key.to_hex()}));
    } else {
        println!("{} New wallet key", "✓".green().bold());
        println!("  Address: {}", key.address().to_string().cyan());
        println!("  Secret:  {}", key.to_hex().dimmed());
    }
    Ok(())
}

fn cmd_challenge(config: RegistryConfig, args: ChallengeArgs, json: bool) -> anyhow::Result<()> {
    let registry = StarRegistry::new(config);
    let challenge = registry.request_challenge(&args.address);
    if json {
        println!("{}", json!({"challenge": challenge}));
    } else {
        println!("{challenge}");
    }
    Ok(())
}

fn cmd_sign(args: SignArgs, json: bool) -> anyhow::Result<()> {
    let key = WalletKey::from_hex(&args.secret).context("parsing wallet secret")?;
    let signature = key.sign_message(&args.message);
    if json {
        println!(
            "{}",
            json!({"address": key.address(), "signature": signature.to_hex()})
        );
    } else {
        println!("{signature}");
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs, json: bool) -> anyhow::Result<()> {
    let result = verify_wallet_message(&args.address, &args.message, &args.signature);
    if json {
        println!(
            "{}",
            json!({"valid": result.is_ok(), "error": result.as_ref().err().map(ToString::to_string)})
        );
    } else {
        match &result {
            Ok(()) => println!("{} Signature valid", "✓".green().bold()),
            Err(e) => println!("{} Signature rejected: {e}", "✗".red().bold()),
        }
    }
    result.map_err(anyhow::Error::from)
}

async fn cmd_demo(config: RegistryConfig, args: DemoArgs, json: bool) -> anyhow::Result<()> {
    let registry = Arc::new(StarRegistry::open(config).await?);

    let mut handles = Vec::with_capacity(args.claims);
    for i in 0..args.claims {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            let key = WalletKey::generate();
            let address = key.address().to_string();
            let message = registry.request_challenge(&address);
            let signature = key.sign_message(&message).to_hex();
            registry
                .submit_claim(
                    &address,
                    &message,
                    &signature,
                    json!({"starName": format!("Demo Star {}", i + 1)}),
                )
                .await
        }));
    }
    for handle in handles {
        handle.await.context("claim task panicked")??;
    }

    let chain = registry.snapshot().await;
    let violations = registry.audit_chain().await?;

    if let Some(out) = &args.out {
        let encoded = serde_json::to_string_pretty(&chain)?;
        std::fs::write(out, encoded).with_context(|| format!("writing {}", out.display()))?;
    }

    if json {
        println!("{}", json!({"chain": chain, "violations": violations}));
    } else {
        print_chain(&chain);
        print_violations(&violations);
    }
    Ok(())
}

fn cmd_audit(args: AuditArgs, json: bool) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let chain: Vec<LedgerRecord> = serde_json::from_str(&source)
        .with_context(|| format!("parsing chain {}", args.path.display()))?;
    let violations = ChainAuditor::audit(&chain);

    if json {
        println!("{}", json!({"records": chain.len(), "violations": violations}));
    } else {
        println!("Audited {} records", chain.len().to_string().bold());
        print_violations(&violations);
    }
    if !violations.is_empty() {
        anyhow::bail!("{} integrity violation(s) found", violations.len());
    }
    Ok(())
}

fn print_chain(chain: &[LedgerRecord]) {
    for record in chain {
        let label = if record.is_genesis() {
            "genesis".dimmed().to_string()
        } else {
            match record.decode_claim() {
                Ok(claim) => format!(
                    "{} owned by {}",
                    claim.star["starName"].as_str().unwrap_or("?").yellow(),
                    claim.address.get(..8).unwrap_or(claim.address.as_str()).cyan()
                ),
                Err(e) => e.to_string().red().to_string(),
            }
        };
        println!(
            "{}  {}  {}",
            format!("#{}", record.position()).yellow().bold(),
            record.self_hash().short_hex().dimmed(),
            label
        );
    }
}

fn print_violations(violations: &[Violation]) {
    if violations.is_empty() {
        println!("{} Chain integrity verified", "✓".green().bold());
        return;
    }
    for violation in violations {
        println!("{} {violation}", "✗".red().bold());
    }
}
