use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Market data for the first (highest-liquidity) trading pair of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub name: String,
    pub symbol: String,
    pub price_usd: String,
    pub liquidity_usd: f64,
    pub volume_24h_usd: f64,
    pub fdv_usd: f64,
    pub price_change_24h_percent: f64,
    pub pair_created_at_ms: i64,
    pub dex_id: String,
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            symbol: "???".to_string(),
            price_usd: "0".to_string(),
            liquidity_usd: 0.0,
            volume_24h_usd: 0.0,
            fdv_usd: 0.0,
            price_change_24h_percent: 0.0,
            pair_created_at_ms: 0,
            dex_id: "unknown".to_string(),
        }
    }
}

impl MarketSnapshot {
    pub fn pair_created_at(&self) -> Option<DateTime<Utc>> {
        if self.pair_created_at_ms <= 0 {
            return None;
        }
        Utc.timestamp_millis_opt(self.pair_created_at_ms).single()
    }
}
