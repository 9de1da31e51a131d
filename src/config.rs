use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::dexscreener::DEXSCREENER_BASE_URL;
use crate::api::rugcheck::RUGCHECK_BASE_URL;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub solana_rpc_url: String,

    pub helius_api_key: Option<String>,
    pub jupiter_api_key: Option<String>,

    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,

    pub rugcheck_api_url: String,
    pub dexscreener_api_url: String,

    pub audit_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub latency_alert_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solana_rpc_url: DEFAULT_RPC_URL.to_string(),
            helius_api_key: None,
            jupiter_api_key: None,
            telegram_bot_token: None,
            telegram_chat_id: None,
            rugcheck_api_url: RUGCHECK_BASE_URL.to_string(),
            dexscreener_api_url: DEXSCREENER_BASE_URL.to_string(),
            audit_dir: PathBuf::from("operational/audits"),
            http_timeout_secs: 10,
            latency_alert_ms: 150,
        }
    }
}

impl Config {
    /// Builds the config from the process environment. Call `dotenv().ok()` first
    /// to pick up a local `.env`.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            solana_rpc_url: env::var("SOLANA_RPC_URL").unwrap_or(defaults.solana_rpc_url),

            helius_api_key: non_empty_var("HELIUS_API_KEY"),
            jupiter_api_key: non_empty_var("JUPITER_API_KEY"),

            telegram_bot_token: non_empty_var("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: non_empty_var("TELEGRAM_CHAT_ID"),

            rugcheck_api_url: env::var("RUGCHECK_API_URL").unwrap_or(defaults.rugcheck_api_url),
            dexscreener_api_url: env::var("DEXSCREENER_API_URL")
                .unwrap_or(defaults.dexscreener_api_url),

            audit_dir: env::var("AUDIT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audit_dir),
            http_timeout_secs: match env::var("HTTP_TIMEOUT_SECS") {
                Ok(v) => v
                    .trim()
                    .parse()
                    .context("Failed to parse HTTP_TIMEOUT_SECS")?,
                Err(_) => defaults.http_timeout_secs,
            },
            latency_alert_ms: match env::var("LATENCY_ALERT_MS") {
                Ok(v) => v
                    .trim()
                    .parse()
                    .context("Failed to parse LATENCY_ALERT_MS")?,
                Err(_) => defaults.latency_alert_ms,
            },
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn latency_alert(&self) -> Duration {
        Duration::from_millis(self.latency_alert_ms)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
