use tracing::{debug, warn};

use crate::api::{CoinGeckoClient, RpcClient};
use crate::error::{AddressError, FetchError};

/// Balances above this should be swept to the main trading wallet.
pub const HIGH_BALANCE_SOL: f64 = 5.0;
/// Balances below this need funding before the bot can keep trading.
pub const LOW_BALANCE_SOL: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAlert {
    High,
    Low,
    Normal,
}

impl BalanceAlert {
    pub fn classify(balance_sol: f64) -> Self {
        if balance_sol > HIGH_BALANCE_SOL {
            BalanceAlert::High
        } else if balance_sol < LOW_BALANCE_SOL {
            BalanceAlert::Low
        } else {
            BalanceAlert::Normal
        }
    }
}

#[derive(Debug, Clone)]
pub struct WalletStatus {
    pub address: String,
    pub balance_sol: f64,
    pub sol_price_usd: Option<f64>,
}

impl WalletStatus {
    pub fn usd_value(&self) -> Option<f64> {
        self.sol_price_usd.map(|price| price * self.balance_sol)
    }

    pub fn alert(&self) -> BalanceAlert {
        BalanceAlert::classify(self.balance_sol)
    }
}

/// A Solana account address is a base58-encoded 32-byte public key.
pub fn validate_address(address: &str) -> Result<(), AddressError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| AddressError::Encoding(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(AddressError::Length(bytes.len()));
    }
    Ok(())
}

/// Balance is required; the USD price is best-effort.
pub async fn fetch_wallet_status(
    rpc: &RpcClient,
    prices: &CoinGeckoClient,
    address: &str,
) -> Result<WalletStatus, FetchError> {
    let balance_sol = rpc.get_balance_sol(address).await?;
    debug!("Balance for {}: {} SOL", address, balance_sol);

    let sol_price_usd = match prices.get_sol_price_usd().await {
        Ok(price) => Some(price),
        Err(e) => {
            warn!("Could not fetch SOL price: {}", e);
            None
        }
    };

    Ok(WalletStatus {
        address: address.to_string(),
        balance_sol,
        sol_price_usd,
    })
}
