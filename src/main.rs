use anyhow::Result;
use clap::Parser;
use colored::*;
use dotenv::dotenv;
use tracing::info;

use chassis_ops::{display, logging, AuditError, Auditor, Config};

/// Audit a Solana token with RugCheck and DexScreener and print a verdict.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Token mint (contract) address, e.g. 2k8yZaJjf61unHriuqdmvbxe7CUhEYML5kVJDbcotKjU
    contract_address: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv().ok();
    logging::init()?;

    let config = Config::load()?;
    let auditor = Auditor::from_config(&config)?;

    println!("\nQuerying APIs...");
    match auditor.run(&cli.contract_address).await {
        Ok(outcome) => {
            print!("{}", display::render_audit(&outcome));
            info!("Verdict for {}: {}", outcome.mint, outcome.assessment.verdict.label());
            Ok(())
        }
        Err(e @ AuditError::AllSourcesFailed { .. }) => {
            eprintln!("{}", format!("❌ Audit error: {}", e).red());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
