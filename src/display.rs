//! Terminal rendering for the operator tools. Pure string builders over the
//! result types; the binaries only print what these return.

use colored::*;
use std::fmt;

use crate::audit::{AuditOutcome, WrittenReport};
use crate::health::{HealthReport, ProbeStatus};
use crate::models::verdict::Verdict;
use crate::utils::{format_usd, shorten_address};
use crate::wallet::{BalanceAlert, WalletStatus, HIGH_BALANCE_SOL, LOW_BALANCE_SOL};

const WIDE_RULE: &str = "============================================================";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────";

fn verdict_line(verdict: Verdict) -> ColoredString {
    let text = match verdict {
        Verdict::Safe => format!("🟢 {}", verdict),
        Verdict::Review => format!("🟡 {}", verdict),
        Verdict::Danger => format!("🔴 {}", verdict),
    };
    match verdict {
        Verdict::Safe => text.green().bold(),
        Verdict::Review => text.yellow().bold(),
        Verdict::Danger => text.red().bold(),
    }
}

/// Full terminal audit: market data, security data, verdict and signals.
pub fn render_audit(outcome: &AuditOutcome) -> String {
    AuditView(outcome).to_string()
}

/// Short summary printed after a report file has been written.
pub fn render_report_summary(outcome: &AuditOutcome, report: &WrittenReport) -> String {
    SummaryView { outcome, report }.to_string()
}

pub fn render_health(report: &HealthReport) -> String {
    HealthView(report).to_string()
}

pub fn render_wallet(status: &WalletStatus, rpc_url: &str) -> String {
    WalletView { status, rpc_url }.to_string()
}

struct AuditView<'a>(&'a AuditOutcome);

impl fmt::Display for AuditView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;

        writeln!(f, "\n{}", WIDE_RULE.cyan())?;
        writeln!(f, "{}", "     🔍 AUDIT SNIPER - Contract Analysis".cyan().bold())?;
        writeln!(f, "{}", WIDE_RULE.cyan())?;
        writeln!(f, "\n📋 Contract: {}", outcome.mint)?;
        writeln!(
            f,
            "⏱️  Timestamp: {}",
            outcome.audited_at.format("%Y-%m-%d %H:%M:%S")
        )?;

        if let Ok(m) = &outcome.market {
            writeln!(f, "\n{}", format!("📊 MARKET DATA ({})", m.dex_id).bold())?;
            writeln!(f, "   Name: {} ({})", m.name, m.symbol)?;
            writeln!(f, "   Price: ${}", m.price_usd)?;
            writeln!(f, "   Liquidity: ${}", format_usd(m.liquidity_usd))?;
            writeln!(f, "   Volume 24h: ${}", format_usd(m.volume_24h_usd))?;
            writeln!(f, "   Change 24h: {}%", m.price_change_24h_percent)?;
        }

        if let Ok(r) = &outcome.security {
            writeln!(f, "\n{}", "🛡️ SECURITY DATA (RugCheck)".bold())?;
            writeln!(f, "   Score: {}", r.score)?;
            writeln!(f, "   LP Locked: {}%", r.lp_locked_percent)?;
            if !r.risks.is_empty() {
                writeln!(f, "   Risks detected: {}", r.risks.len())?;
            }
        }

        writeln!(f, "\n{}", THIN_RULE)?;
        writeln!(f, "\n🎯 VERDICT: {}", verdict_line(outcome.assessment.verdict))?;

        let assessment = &outcome.assessment;
        if !assessment.positive_signals.is_empty() {
            writeln!(f, "\n{}", "✅ Positive Signals:".green())?;
            for signal in &assessment.positive_signals {
                writeln!(f, "   • {}", signal)?;
            }
        }
        if !assessment.negative_signals.is_empty() {
            writeln!(f, "\n{}", "❌ Warning Signals:".red())?;
            for signal in &assessment.negative_signals {
                writeln!(f, "   • {}", signal)?;
            }
        }

        writeln!(f, "\n{}\n", WIDE_RULE.cyan())
    }
}

struct SummaryView<'a> {
    outcome: &'a AuditOutcome,
    report: &'a WrittenReport,
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (outcome, report) = (self.outcome, self.report);
        let grade = format!("{} {}", report.grade.emoji(), report.grade.label());

        writeln!(f, "\n{}", "✅ Audit complete!".green().bold())?;
        writeln!(f, "🎯 Grade: {}", grade.bold())?;
        writeln!(f, "📑 Report saved to: {}", report.path.display())?;

        writeln!(f, "\n--- Summary ---")?;
        match &outcome.market {
            Ok(m) => writeln!(f, "Token: {} ({})", m.name, m.symbol)?,
            Err(e) => writeln!(f, "Token: {}", format!("unavailable ({})", e).yellow())?,
        }
        match &outcome.security {
            Ok(r) => writeln!(f, "Score: {}", r.score)?,
            Err(e) => writeln!(f, "Score: {}", format!("unavailable ({})", e).yellow())?,
        }
        if let Ok(m) = &outcome.market {
            writeln!(f, "Liq:   ${}", format_usd(m.liquidity_usd))?;
        }
        writeln!(f, "----------------\n")
    }
}

struct HealthView<'a>(&'a HealthReport);

impl fmt::Display for HealthView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let total = report.total();

        writeln!(f, "{}\n", "=== SOL_BOT API HEALTH CHECK ===".yellow())?;
        for (i, probe) in report.probes.iter().enumerate() {
            writeln!(
                f,
                "{}",
                format!("[{}/{}] {}", i + 1, total, probe.service).blue()
            )?;
            let latency = probe
                .latency
                .map(|l| format!(" [{}ms]", l.as_millis()))
                .unwrap_or_default();
            let line = match &probe.status {
                ProbeStatus::Up(detail) => format!("  ✅ {}{}", detail, latency).green(),
                ProbeStatus::Degraded(detail) => format!("  ⚠️ {}{}", detail, latency).yellow(),
                ProbeStatus::Down(reason) => format!("  ❌ {}{}", reason, latency).red(),
                ProbeStatus::Skipped(reason) => format!("  ⚠️ {}. Skipping.", reason).yellow(),
            };
            writeln!(f, "{}", line)?;
        }

        writeln!(f, "\n{}", "=== SUMMARY ===".yellow())?;
        let summary = if report.all_operational() {
            format!("All systems operational ({}/{})", report.reachable(), total).green()
        } else {
            format!(
                "Some systems failed ({}/{}). Check the output above.",
                report.reachable(),
                total
            )
            .red()
        };
        writeln!(f, "{}", summary)
    }
}

struct WalletView<'a> {
    status: &'a WalletStatus,
    rpc_url: &'a str,
}

impl fmt::Display for WalletView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status;
        let rule = "=".repeat(70);
        let endpoint: String = self.rpc_url.chars().take(40).collect();

        writeln!(f, "\n{}", rule.cyan())?;
        writeln!(
            f,
            "{}",
            "         🔍 WALLET MONITOR - SOLANA TRADING ENGINE 🔍".magenta().bold()
        )?;
        writeln!(f, "{}\n", rule.cyan())?;

        writeln!(f, "{} {}", "Wallet Address:".blue(), shorten_address(&status.address))?;
        writeln!(
            f,
            "{}      {}",
            "Timestamp:".blue(),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "{}   {}...", "RPC Endpoint:".blue(), endpoint)?;

        writeln!(
            f,
            "\n{} {}",
            "Balance:".cyan().bold(),
            format!("{:.4} SOL", status.balance_sol).bold()
        )?;
        if let (Some(price), Some(value)) = (status.sol_price_usd, status.usd_value()) {
            writeln!(f, "{} ${:.2}", "SOL Price:".cyan(), price)?;
            writeln!(f, "{} {}", "Total Value:".cyan(), format!("${:.2} USD", value).bold())?;
        }

        writeln!(f, "\n{}", "─".repeat(70).yellow())?;
        match status.alert() {
            BalanceAlert::High => {
                writeln!(
                    f,
                    "{}",
                    format!("⚠️  ALERT: high balance detected (>{} SOL)", HIGH_BALANCE_SOL).red()
                )?;
                writeln!(f, "{}", "   Consider moving funds to the main trading wallet".red())?;
            }
            BalanceAlert::Low => {
                writeln!(
                    f,
                    "{}",
                    format!("⚠️  Warning: low balance (<{} SOL)", LOW_BALANCE_SOL).yellow()
                )?;
                writeln!(f, "{}", "   You may need to fund the wallet to keep trading".yellow())?;
            }
            BalanceAlert::Normal => {
                writeln!(f, "{}", "✓ Balance within the normal operating range".green())?;
            }
        }
        writeln!(f, "\n{}\n", rule.cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::ReportGrade;
    use crate::error::FetchError;
    use crate::health::ProbeResult;
    use crate::models::market::MarketSnapshot;
    use crate::models::security::{Score, SecurityReport};
    use crate::models::verdict::Assessment;
    use chrono::Local;
    use std::path::PathBuf;
    use std::time::Duration;

    fn outcome() -> AuditOutcome {
        AuditOutcome {
            mint: "MintAbc".to_string(),
            audited_at: Local::now(),
            security: Err(FetchError::Status(500)),
            market: Ok(MarketSnapshot {
                name: "Chassis".to_string(),
                symbol: "CHAS".to_string(),
                liquidity_usd: 6000.0,
                volume_24h_usd: 12000.0,
                dex_id: "raydium".to_string(),
                ..MarketSnapshot::default()
            }),
            assessment: Assessment {
                verdict: Verdict::Review,
                positive_signals: vec!["Liquidez: $6,000".to_string(), "Volumen 24h: $12,000".to_string()],
                negative_signals: vec!["RugCheck Error: HTTP 500".to_string()],
            },
        }
    }

    #[test]
    fn test_render_audit() {
        colored::control::set_override(false);
        let text = render_audit(&outcome());

        assert!(text.contains("📋 Contract: MintAbc"));
        assert!(text.contains("📊 MARKET DATA (raydium)"));
        assert!(text.contains("   Name: Chassis (CHAS)"));
        assert!(!text.contains("SECURITY DATA"));
        assert!(text.contains("🎯 VERDICT: 🟡 REVIEW - Evaluate risks manually"));
        assert!(text.contains("   • Liquidez: $6,000"));
        assert!(text.contains("   • RugCheck Error: HTTP 500"));
    }

    #[test]
    fn test_render_report_summary() {
        colored::control::set_override(false);
        let mut o = outcome();
        o.security = Ok(SecurityReport {
            score: Score::Value(320.0),
            ..SecurityReport::default()
        });
        let report = WrittenReport {
            path: PathBuf::from("operational/audits/audit_CHAS_20260101_000000.md"),
            grade: ReportGrade::Approved,
        };
        let text = render_report_summary(&o, &report);

        assert!(text.contains("🎯 Grade: 🟢 APPROVED"));
        assert!(text.contains("audit_CHAS_20260101_000000.md"));
        assert!(text.contains("Score: 320"));
        assert!(text.contains("Liq:   $6,000"));
    }

    #[test]
    fn test_render_health_summary() {
        colored::control::set_override(false);
        let report = HealthReport {
            probes: vec![
                ProbeResult {
                    service: "Jupiter API",
                    status: ProbeStatus::Up("quote API is UP".to_string()),
                    latency: Some(Duration::from_millis(42)),
                },
                ProbeResult {
                    service: "Jito Block Engine",
                    status: ProbeStatus::Down("HTTP 405".to_string()),
                    latency: Some(Duration::from_millis(80)),
                },
            ],
        };
        let text = render_health(&report);

        assert!(text.contains("[1/2] Jupiter API"));
        assert!(text.contains("  ✅ quote API is UP [42ms]"));
        assert!(text.contains("  ❌ HTTP 405 [80ms]"));
        assert!(text.contains("Some systems failed (1/2)"));
    }

    #[test]
    fn test_render_wallet_alert() {
        colored::control::set_override(false);
        let status = WalletStatus {
            address: "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU".to_string(),
            balance_sol: 7.5,
            sol_price_usd: Some(100.0),
        };
        let text = render_wallet(&status, "https://api.mainnet-beta.solana.com");

        assert!(text.contains("7xKXtg2C...uJosgAsU"));
        assert!(text.contains("7.5000 SOL"));
        assert!(text.contains("$750.00 USD"));
        assert!(text.contains("ALERT: high balance detected (>5 SOL)"));
    }
}
