use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::FetchError;

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    solana: Option<UsdPrice>,
}

#[derive(Debug, Deserialize)]
struct UsdPrice {
    usd: Option<f64>,
}

impl CoinGeckoClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(COINGECKO_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: super::http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub async fn get_sol_price_usd(&self) -> Result<f64, FetchError> {
        let url = format!("{}/simple/price", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", "solana"), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: SimplePriceResponse = response
            .json()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        body.solana
            .and_then(|p| p.usd)
            .ok_or_else(|| FetchError::Decode("missing solana.usd".to_string()))
    }
}
