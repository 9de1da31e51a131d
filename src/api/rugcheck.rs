use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::models::security::{Risk, RiskLevel, Score, SecurityReport, TopHolder};

pub const RUGCHECK_BASE_URL: &str = "https://api.rugcheck.xyz";

const MAX_TOP_HOLDERS: usize = 5;

#[derive(Debug, Clone)]
pub struct RugCheckClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

// --- Response Structs ---

// Only the parts of /v1/tokens/{mint}/report the audit reads. Everything is optional:
// RugCheck omits or nulls fields freely for fresh tokens.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TokenReportResponse {
    score: Option<Value>,
    risks: Option<Vec<RiskEntry>>,
    top_holders: Option<Vec<HolderEntry>>,
    markets: Option<Vec<MarketEntry>>,
    mint_authority: Option<Value>,
    freeze_authority: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RiskEntry {
    name: Option<String>,
    level: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HolderEntry {
    address: Option<String>,
    owner: Option<String>,
    pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketEntry {
    lp: Option<LpInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LpInfo {
    lp_locked_pct: Option<f64>,
}

impl From<TokenReportResponse> for SecurityReport {
    fn from(raw: TokenReportResponse) -> Self {
        let score = match raw.score {
            Some(Value::Number(n)) => n.as_f64().map(Score::Value).unwrap_or_default(),
            Some(Value::String(s)) if s == "Good" => Score::Good,
            Some(Value::String(s)) => Score::Unrated(s),
            _ => Score::default(),
        };

        let risks = raw
            .risks
            .unwrap_or_default()
            .into_iter()
            .map(|r| Risk {
                name: r.name.unwrap_or_else(|| "Unnamed risk".to_string()),
                level: RiskLevel::parse(r.level.as_deref().unwrap_or("")),
                description: r.description.unwrap_or_default(),
            })
            .collect();

        let top_holders = raw
            .top_holders
            .unwrap_or_default()
            .into_iter()
            .take(MAX_TOP_HOLDERS)
            .map(|h| TopHolder {
                address: h.address.unwrap_or_default(),
                owner: h.owner,
                pct: h.pct.unwrap_or(0.0),
            })
            .collect();

        let lp_locked_percent = raw
            .markets
            .as_ref()
            .and_then(|m| m.first())
            .and_then(|m| m.lp.as_ref())
            .and_then(|lp| lp.lp_locked_pct)
            .unwrap_or(0.0);

        Self {
            score,
            risks,
            top_holders,
            lp_locked_percent,
            mint_authority_active: authority_active(raw.mint_authority.as_ref()),
            freeze_authority_active: authority_active(raw.freeze_authority.as_ref()),
        }
    }
}

// An authority counts as renounced when RugCheck reports null or an empty string.
fn authority_active(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

// --- RugCheck Client Implementation ---

impl RugCheckClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(RUGCHECK_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: super::http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Fetches the contract security report for a token mint.
    pub async fn get_token_report(&self, mint: &str) -> Result<SecurityReport, FetchError> {
        let url = format!("{}/v1/tokens/{}/report", self.base_url, mint);
        debug!("Fetching RugCheck report for {}: {}", mint, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            debug!("RugCheck API error for token {}: {}", mint, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let raw: TokenReportResponse = response
            .json()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        Ok(raw.into())
    }
}
