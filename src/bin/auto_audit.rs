//! Audit a token and write a markdown report to the audit directory.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dotenv::dotenv;

use chassis_ops::{display, logging, AuditError, Auditor, Config, ReportGenerator};

#[derive(Parser)]
#[command(author, version, about = "Audit a token and save a markdown report", long_about = None)]
struct Cli {
    /// Token mint (contract) address
    contract_address: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv().ok();
    logging::init()?;

    let config = Config::load()?;
    let auditor = Auditor::from_config(&config)?;
    let generator = ReportGenerator::new(config.audit_dir.clone());

    println!("Starting audit for: {}...", cli.contract_address);
    let outcome = match auditor.run(&cli.contract_address).await {
        Ok(outcome) => outcome,
        Err(e @ AuditError::AllSourcesFailed { .. }) => {
            eprintln!("{}", format!("❌ Audit error: {}", e).red());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let report = generator.write(&outcome).with_context(|| {
        format!(
            "Failed to write audit report to {}",
            generator.audit_dir().display()
        )
    })?;

    print!("{}", display::render_report_summary(&outcome, &report));
    Ok(())
}
