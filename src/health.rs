use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::api::jupiter::{SOL_MINT, USDC_MINT};
use crate::api::rpc::{helius_url, JITO_BUNDLES_URL};
use crate::api::{DexScreenerClient, JupiterClient, RpcClient, TelegramClient};
use crate::config::Config;
use crate::error::FetchError;

// SOL/USDC on Raydium
const DEXSCREENER_PROBE_PAIR: &str = "58oQChx4yWmvKdwLLZzBi4ChoCc2fqCUWBkwMihLYQo2";
const JUPITER_PROBE_AMOUNT: u64 = 100_000_000; // 0.1 SOL
const JUPITER_PROBE_SLIPPAGE_BPS: u16 = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeStatus {
    Up(String),
    /// Reachable, but slower than the latency alert threshold.
    Degraded(String),
    Down(String),
    Skipped(String),
}

impl ProbeStatus {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeStatus::Up(_) | ProbeStatus::Degraded(_))
    }
}

#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub service: &'static str,
    pub status: ProbeStatus,
    pub latency: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub probes: Vec<ProbeResult>,
}

impl HealthReport {
    pub fn reachable(&self) -> usize {
        self.probes.iter().filter(|p| p.status.is_reachable()).count()
    }

    pub fn total(&self) -> usize {
        self.probes.len()
    }

    pub fn all_operational(&self) -> bool {
        self.reachable() == self.total()
    }

    pub fn any_down(&self) -> bool {
        self.probes
            .iter()
            .any(|p| matches!(p.status, ProbeStatus::Down(_)))
    }
}

/// Reachability checks for every third-party API the bot depends on.
pub struct HealthChecker {
    pub helius: Option<RpcClient>,
    pub jupiter: JupiterClient,
    pub telegram: Option<TelegramClient>,
    pub dexscreener: DexScreenerClient,
    pub jito: RpcClient,
    pub latency_alert: Duration,
}

impl HealthChecker {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = config.http_timeout();

        let helius = match &config.helius_api_key {
            Some(key) => Some(RpcClient::new(&helius_url(key), timeout)?),
            None => None,
        };
        // Telegram is only usable for alerts when both token and chat id are set.
        let telegram = match (&config.telegram_bot_token, &config.telegram_chat_id) {
            (Some(token), Some(_)) => Some(TelegramClient::new(token, timeout)?),
            _ => None,
        };

        Ok(Self {
            helius,
            jupiter: JupiterClient::new(config.jupiter_api_key.clone(), timeout)?,
            telegram,
            dexscreener: DexScreenerClient::with_base_url(&config.dexscreener_api_url, timeout)?,
            jito: RpcClient::new(JITO_BUNDLES_URL, timeout)?,
            latency_alert: config.latency_alert(),
        })
    }

    /// Runs all probes concurrently; results keep the fixed probe order.
    pub async fn run(&self) -> HealthReport {
        let (helius, jupiter, telegram, dexscreener, jito) = tokio::join!(
            self.check_helius(),
            self.check_jupiter(),
            self.check_telegram(),
            self.check_dexscreener(),
            self.check_jito(),
        );

        let report = HealthReport {
            probes: vec![helius, jupiter, telegram, dexscreener, jito],
        };
        info!(
            "Health check finished: {}/{} reachable",
            report.reachable(),
            report.total()
        );
        report
    }

    async fn check_helius(&self) -> ProbeResult {
        let Some(rpc) = &self.helius else {
            return skipped("Helius RPC", "HELIUS_API_KEY not set");
        };
        let (result, latency) = timed(rpc.get_health()).await;
        let status = match result {
            Ok(health) if health == "ok" => self.rate(latency, "RPC is UP and API key is valid".to_string()),
            Ok(other) => ProbeStatus::Down(format!("unexpected getHealth result: {}", other)),
            Err(e) => ProbeStatus::Down(e.to_string()),
        };
        self.finish("Helius RPC", status, latency)
    }

    async fn check_jupiter(&self) -> ProbeResult {
        let (result, latency) = timed(self.jupiter.get_quote(
            SOL_MINT,
            USDC_MINT,
            JUPITER_PROBE_AMOUNT,
            JUPITER_PROBE_SLIPPAGE_BPS,
        ))
        .await;
        let status = match result {
            Ok(_) => self.rate(latency, "quote API is UP".to_string()),
            Err(e) => ProbeStatus::Down(e.to_string()),
        };
        self.finish("Jupiter API", status, latency)
    }

    async fn check_telegram(&self) -> ProbeResult {
        let Some(telegram) = &self.telegram else {
            return skipped("Telegram Bot", "TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set");
        };
        let (result, latency) = timed(telegram.get_me()).await;
        let status = match result {
            Ok(bot) => self.rate(
                latency,
                format!("bot is VALID: @{}", bot.username.unwrap_or_default()),
            ),
            Err(e) => ProbeStatus::Down(e.to_string()),
        };
        self.finish("Telegram Bot", status, latency)
    }

    async fn check_dexscreener(&self) -> ProbeResult {
        let (result, latency) =
            timed(self.dexscreener.check_pair("solana", DEXSCREENER_PROBE_PAIR)).await;
        let status = match result {
            Ok(()) => self.rate(latency, "API is UP".to_string()),
            Err(e) => ProbeStatus::Down(e.to_string()),
        };
        self.finish("DexScreener API", status, latency)
    }

    async fn check_jito(&self) -> ProbeResult {
        let (result, latency) = timed(self.jito.get_tip_accounts()).await;
        let status = match result {
            Ok(accounts) => self.rate(
                latency,
                format!("block engine is UP ({} tip accounts)", accounts.len()),
            ),
            Err(e) => ProbeStatus::Down(e.to_string()),
        };
        self.finish("Jito Block Engine", status, latency)
    }

    fn rate(&self, latency: Duration, detail: String) -> ProbeStatus {
        if latency > self.latency_alert {
            ProbeStatus::Degraded(format!(
                "{} (latency {}ms above {}ms)",
                detail,
                latency.as_millis(),
                self.latency_alert.as_millis()
            ))
        } else {
            ProbeStatus::Up(detail)
        }
    }

    fn finish(&self, service: &'static str, status: ProbeStatus, latency: Duration) -> ProbeResult {
        match &status {
            ProbeStatus::Down(reason) => warn!("{} is down: {}", service, reason),
            ProbeStatus::Degraded(reason) => warn!("{} is slow: {}", service, reason),
            _ => {}
        }
        ProbeResult {
            service,
            status,
            latency: Some(latency),
        }
    }
}

fn skipped(service: &'static str, reason: &str) -> ProbeResult {
    ProbeResult {
        service,
        status: ProbeStatus::Skipped(reason.to_string()),
        latency: None,
    }
}

async fn timed<T, F>(fut: F) -> (Result<T, FetchError>, Duration)
where
    F: Future<Output = Result<T, FetchError>>,
{
    let start = Instant::now();
    let result = fut.await;
    (result, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_all_probes_against_mocks() {
        let mut server = mockito::Server::new_async().await;
        let _health = server
            .mock("POST", "/helius")
            .with_status(200)
            .with_body(r#"{"jsonrpc": "2.0", "result": "ok", "id": 1}"#)
            .create_async()
            .await;
        let _quote = server
            .mock("GET", "/jupiter/quote")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"inputMint": "a", "inAmount": "1", "outputMint": "b", "outAmount": "2", "slippageBps": 50}"#)
            .create_async()
            .await;
        let _pair = server
            .mock("GET", format!("/latest/dex/pairs/solana/{}", DEXSCREENER_PROBE_PAIR).as_str())
            .with_status(200)
            .with_body(r#"{"pairs": []}"#)
            .create_async()
            .await;
        let _jito = server
            .mock("POST", "/jito")
            .match_body(Matcher::PartialJson(json!({"method": "getTipAccounts"})))
            .with_status(200)
            .with_body(r#"{"jsonrpc": "2.0", "result": ["Tip1", "Tip2"], "id": 1}"#)
            .create_async()
            .await;

        let url = server.url();
        let checker = HealthChecker {
            helius: Some(RpcClient::new(&format!("{}/helius", url), TIMEOUT).unwrap()),
            jupiter: JupiterClient::with_base_url(&format!("{}/jupiter", url), None, TIMEOUT).unwrap(),
            telegram: None,
            dexscreener: DexScreenerClient::with_base_url(&url, TIMEOUT).unwrap(),
            jito: RpcClient::new(&format!("{}/jito", url), TIMEOUT).unwrap(),
            latency_alert: Duration::from_secs(5),
        };

        let report = checker.run().await;
        let services: Vec<_> = report.probes.iter().map(|p| p.service).collect();
        assert_eq!(
            services,
            vec!["Helius RPC", "Jupiter API", "Telegram Bot", "DexScreener API", "Jito Block Engine"]
        );
        assert!(matches!(report.probes[2].status, ProbeStatus::Skipped(_)));
        assert_eq!(report.reachable(), 4);
        assert_eq!(report.total(), 5);
        assert!(!report.all_operational());
        assert!(!report.any_down());
        assert_eq!(
            report.probes[4].status,
            ProbeStatus::Up("block engine is UP (2 tip accounts)".to_string())
        );
    }

    #[tokio::test]
    async fn test_down_and_degraded() {
        let mut server = mockito::Server::new_async().await;
        let _health = server
            .mock("POST", "/helius")
            .with_status(200)
            .with_body(r#"{"jsonrpc": "2.0", "result": "behind", "id": 1}"#)
            .create_async()
            .await;
        let _quote = server
            .mock("GET", "/jupiter/quote")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let url = server.url();
        let checker = HealthChecker {
            helius: Some(RpcClient::new(&format!("{}/helius", url), TIMEOUT).unwrap()),
            jupiter: JupiterClient::with_base_url(&format!("{}/jupiter", url), None, TIMEOUT).unwrap(),
            telegram: None,
            dexscreener: DexScreenerClient::with_base_url(&url, TIMEOUT).unwrap(),
            jito: RpcClient::new(&format!("{}/jito", url), TIMEOUT).unwrap(),
            latency_alert: Duration::ZERO,
        };

        let helius = checker.check_helius().await;
        assert_eq!(
            helius.status,
            ProbeStatus::Down("unexpected getHealth result: behind".to_string())
        );

        let jupiter = checker.check_jupiter().await;
        assert_eq!(jupiter.status, ProbeStatus::Down("HTTP 401".to_string()));

        assert!(matches!(
            checker.rate(Duration::from_millis(1), "ok".to_string()),
            ProbeStatus::Degraded(_)
        ));
    }
}
