use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;

const HELIUS_RPC_URL: &str = "https://mainnet.helius-rpc.com";
pub const JITO_BUNDLES_URL: &str = "https://amsterdam.mainnet.block-engine.jito.wtf/api/v1/bundles";

const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

pub fn helius_url(api_key: &str) -> String {
    format!("{}/?api-key={}", HELIUS_RPC_URL, api_key)
}

/// Minimal JSON-RPC 2.0 client over HTTP POST. Works for Solana RPC nodes
/// (Helius included) and the Jito block engine.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: Client,
    url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

impl RpcClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: super::http_client(timeout)?,
            url: url.to_string(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one request and returns the `result` member.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, FetchError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        debug!("JSON-RPC {} -> {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if let Some(err) = body.error {
            return Err(FetchError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        body.result
            .ok_or_else(|| FetchError::Decode(format!("{} response has no result", method)))
    }

    /// `getHealth`; a healthy node answers `"ok"`.
    pub async fn get_health(&self) -> Result<String, FetchError> {
        let result = self.call("getHealth", Value::Null).await?;
        Ok(match result {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    pub async fn get_balance_sol(&self, address: &str) -> Result<f64, FetchError> {
        let result = self.call("getBalance", json!([address])).await?;
        let balance: BalanceResult =
            serde_json::from_value(result).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(balance.value as f64 / LAMPORTS_PER_SOL)
    }

    /// Jito block engine `getTipAccounts`.
    pub async fn get_tip_accounts(&self) -> Result<Vec<String>, FetchError> {
        let result = self.call("getTipAccounts", json!([])).await?;
        serde_json::from_value(result).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
