use async_trait::async_trait;

use crate::api::dexscreener::DexScreenerClient;
use crate::api::rugcheck::RugCheckClient;
use crate::error::FetchError;
use crate::models::market::MarketSnapshot;
use crate::models::security::SecurityReport;

/// Provider of contract security reports.
#[async_trait]
pub trait SecurityReportSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_security_report(&self, mint: &str) -> Result<SecurityReport, FetchError>;
}

/// Provider of market snapshots.
#[async_trait]
pub trait MarketSnapshotSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_market_snapshot(&self, mint: &str) -> Result<MarketSnapshot, FetchError>;
}

#[async_trait]
impl SecurityReportSource for RugCheckClient {
    fn name(&self) -> &'static str {
        "RugCheck"
    }

    async fn fetch_security_report(&self, mint: &str) -> Result<SecurityReport, FetchError> {
        self.get_token_report(mint).await
    }
}

#[async_trait]
impl MarketSnapshotSource for DexScreenerClient {
    fn name(&self) -> &'static str {
        "DexScreener"
    }

    async fn fetch_market_snapshot(&self, mint: &str) -> Result<MarketSnapshot, FetchError> {
        self.get_token_market(mint).await
    }
}
