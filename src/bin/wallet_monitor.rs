//! Terminal balance check for the burner wallet.

use anyhow::Result;
use clap::Parser;
use colored::*;
use dotenv::dotenv;

use chassis_ops::api::{CoinGeckoClient, RpcClient};
use chassis_ops::wallet::{fetch_wallet_status, validate_address};
use chassis_ops::{display, logging, Config};

#[derive(Parser)]
#[command(author, version, about = "Show the SOL balance of a wallet", long_about = None)]
struct Cli {
    /// Wallet public key (base58)
    wallet_address: String,

    /// RPC endpoint; defaults to SOLANA_RPC_URL or public mainnet
    rpc_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv().ok();
    logging::init()?;

    if let Err(e) = validate_address(&cli.wallet_address) {
        eprintln!("{}", format!("Error: wallet address is not valid ({})", e).red());
        std::process::exit(1);
    }

    let config = Config::load()?;
    let rpc_url = cli.rpc_url.unwrap_or_else(|| config.solana_rpc_url.clone());
    let rpc = RpcClient::new(&rpc_url, config.http_timeout())?;
    let prices = CoinGeckoClient::new(config.http_timeout())?;

    println!("{}", "Wallet Monitor v1.0".magenta());
    println!("{}", "Fetching balance...".yellow());

    match fetch_wallet_status(&rpc, &prices, &cli.wallet_address).await {
        Ok(status) => {
            print!("{}", display::render_wallet(&status, rpc.url()));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("✗ Could not fetch balance: {}", e).red());
            std::process::exit(1);
        }
    }
}
