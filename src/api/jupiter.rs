use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;

const JUPITER_BASE_URL: &str = "https://api.jup.ag/swap/v1";
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

#[derive(Debug, Clone)]
pub struct JupiterClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub input_mint: String,
    pub in_amount: String,
    pub output_mint: String,
    pub out_amount: String,
    pub slippage_bps: u32,
    #[serde(default)]
    pub price_impact_pct: Option<String>,
}

impl JupiterClient {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(JUPITER_BASE_URL, api_key, timeout)
    }

    pub fn with_base_url(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: super::http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        })
    }

    pub async fn get_quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
        slippage_bps: u16,
    ) -> Result<QuoteResponse, FetchError> {
        let url = format!("{}/quote", self.base_url);
        debug!("Requesting Jupiter quote {} -> {} ({})", input_mint, output_mint, amount);

        let mut request = self.client.get(&url).query(&[
            ("inputMint", input_mint.to_string()),
            ("outputMint", output_mint.to_string()),
            ("amount", amount.to_string()),
            ("slippageBps", slippage_bps.to_string()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_quote_sends_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("inputMint".into(), SOL_MINT.into()),
                Matcher::UrlEncoded("amount".into(), "100000000".into()),
            ]))
            .match_header("x-api-key", "secret")
            .with_status(200)
            .with_body(format!(
                r#"{{"inputMint": "{}", "inAmount": "100000000", "outputMint": "{}", "outAmount": "14250000", "slippageBps": 50, "routePlan": []}}"#,
                SOL_MINT, USDC_MINT
            ))
            .create_async()
            .await;

        let client = JupiterClient::with_base_url(
            &server.url(),
            Some("secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        let quote = client.get_quote(SOL_MINT, USDC_MINT, 100_000_000, 50).await.unwrap();

        mock.assert_async().await;
        assert_eq!(quote.out_amount, "14250000");
        assert_eq!(quote.slippage_bps, 50);
    }
}
