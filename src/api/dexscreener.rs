use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::models::market::MarketSnapshot;

pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

// --- Response Structs ---

#[derive(Debug, Deserialize)]
struct TokenPairsResponse {
    pairs: Option<Vec<PairInfo>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairInfo {
    dex_id: Option<String>,
    base_token: Option<BaseToken>,
    price_usd: Option<String>,
    liquidity: Option<LiquidityInfo>,
    volume: Option<WindowedValues>,
    price_change: Option<WindowedValues>,
    fdv: Option<f64>,
    pair_created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct BaseToken {
    name: Option<String>,
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LiquidityInfo {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WindowedValues {
    h24: Option<f64>,
}

impl From<PairInfo> for MarketSnapshot {
    fn from(pair: PairInfo) -> Self {
        let defaults = MarketSnapshot::default();
        let (name, symbol) = match pair.base_token {
            Some(token) => (
                token.name.unwrap_or(defaults.name),
                token.symbol.unwrap_or(defaults.symbol),
            ),
            None => (defaults.name, defaults.symbol),
        };

        Self {
            name,
            symbol,
            price_usd: pair.price_usd.unwrap_or(defaults.price_usd),
            liquidity_usd: pair.liquidity.and_then(|l| l.usd).unwrap_or(0.0),
            volume_24h_usd: pair.volume.and_then(|v| v.h24).unwrap_or(0.0),
            fdv_usd: pair.fdv.unwrap_or(0.0),
            price_change_24h_percent: pair.price_change.and_then(|p| p.h24).unwrap_or(0.0),
            pair_created_at_ms: pair.pair_created_at.unwrap_or(0),
            dex_id: pair.dex_id.unwrap_or(defaults.dex_id),
        }
    }
}

// --- DexScreener Client Implementation ---

impl DexScreenerClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEXSCREENER_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: super::http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Fetches market data for a token. DexScreener returns pairs sorted by liquidity,
    /// so the first pair is the one reported.
    pub async fn get_token_market(&self, mint: &str) -> Result<MarketSnapshot, FetchError> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, mint);
        debug!("Fetching DexScreener pairs for {}: {}", mint, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            debug!("DexScreener API error for token {}: {}", mint, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: TokenPairsResponse = response
            .json()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        let pair = body
            .pairs
            .and_then(|pairs| pairs.into_iter().next())
            .ok_or(FetchError::NoPairs)?;

        Ok(pair.into())
    }

    /// Looks up a single pair; used as a reachability probe.
    pub async fn check_pair(&self, chain_id: &str, pair_address: &str) -> Result<(), FetchError> {
        let url = format!("{}/latest/dex/pairs/{}/{}", self.base_url, chain_id, pair_address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}
