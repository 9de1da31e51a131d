use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{info, warn};

use super::scorer::RiskScorer;
use super::sources::{MarketSnapshotSource, SecurityReportSource};
use crate::api::{DexScreenerClient, RugCheckClient};
use crate::config::Config;
use crate::error::{AuditError, FetchError, Result};
use crate::models::market::MarketSnapshot;
use crate::models::security::SecurityReport;
use crate::models::verdict::Assessment;

/// Everything one audit produced. Either source may have failed, never both.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub mint: String,
    pub audited_at: DateTime<Local>,
    pub security: std::result::Result<SecurityReport, FetchError>,
    pub market: std::result::Result<MarketSnapshot, FetchError>,
    pub assessment: Assessment,
}

#[derive(Clone)]
pub struct Auditor {
    security_source: Arc<dyn SecurityReportSource>,
    market_source: Arc<dyn MarketSnapshotSource>,
    scorer: RiskScorer,
}

impl Auditor {
    pub fn new(
        security_source: Arc<dyn SecurityReportSource>,
        market_source: Arc<dyn MarketSnapshotSource>,
        scorer: RiskScorer,
    ) -> Self {
        Self {
            security_source,
            market_source,
            scorer,
        }
    }

    /// RugCheck + DexScreener auditor with the default thresholds.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = config.http_timeout();
        let rugcheck = RugCheckClient::with_base_url(&config.rugcheck_api_url, timeout)?;
        let dexscreener = DexScreenerClient::with_base_url(&config.dexscreener_api_url, timeout)?;

        Ok(Self::new(
            Arc::new(rugcheck),
            Arc::new(dexscreener),
            RiskScorer::default(),
        ))
    }

    pub async fn run(&self, mint: &str) -> Result<AuditOutcome> {
        let mint = mint.trim();
        if mint.is_empty() {
            return Err(AuditError::MissingArgument);
        }
        info!("Starting audit for {}", mint);

        let (security, market) = tokio::join!(
            self.security_source.fetch_security_report(mint),
            self.market_source.fetch_market_snapshot(mint),
        );

        if let Err(e) = &security {
            warn!("{} fetch failed for {}: {}", self.security_source.name(), mint, e);
        }
        if let Err(e) = &market {
            warn!("{} fetch failed for {}: {}", self.market_source.name(), mint, e);
        }

        let (security, market) = match (security, market) {
            (Err(security), Err(market)) => {
                return Err(AuditError::AllSourcesFailed { security, market });
            }
            pair => pair,
        };

        let assessment = self.scorer.assess(&security, &market);
        info!("Audit for {} finished: {}", mint, assessment.verdict.label());

        Ok(AuditOutcome {
            mint: mint.to_string(),
            audited_at: Local::now(),
            security,
            market,
            assessment,
        })
    }
}
