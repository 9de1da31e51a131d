use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::auditor::AuditOutcome;
use crate::error::{FetchError, Result};
use crate::models::security::{Score, SecurityReport};
use crate::utils::format_usd;

/// Grade printed on written reports. Uses its own score cut-offs and is
/// independent of the terminal verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportGrade {
    Approved,
    MediumRisk,
    Rejected,
}

const APPROVED_BELOW: f64 = 500.0;
const MEDIUM_RISK_BELOW: f64 = 1500.0;

impl ReportGrade {
    pub fn from_security(security: &std::result::Result<SecurityReport, FetchError>) -> Self {
        match security {
            Ok(report) => Self::from_score(&report.score),
            Err(_) => ReportGrade::Rejected,
        }
    }

    pub fn from_score(score: &Score) -> Self {
        match score {
            Score::Good => ReportGrade::Approved,
            Score::Value(v) if *v < APPROVED_BELOW => ReportGrade::Approved,
            Score::Value(v) if *v < MEDIUM_RISK_BELOW => ReportGrade::MediumRisk,
            _ => ReportGrade::Rejected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportGrade::Approved => "APPROVED",
            ReportGrade::MediumRisk => "MEDIUM RISK",
            ReportGrade::Rejected => "REJECTED",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ReportGrade::Approved => "🟢",
            ReportGrade::MediumRisk => "🟡",
            ReportGrade::Rejected => "🔴",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub grade: ReportGrade,
}

pub struct ReportGenerator {
    audit_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(audit_dir: impl Into<PathBuf>) -> Self {
        Self {
            audit_dir: audit_dir.into(),
        }
    }

    pub fn audit_dir(&self) -> &Path {
        &self.audit_dir
    }

    /// Writes `audit_<SYMBOL>_<YYYYmmdd_HHMMSS>.md`, creating the audit directory if needed.
    pub fn write(&self, outcome: &AuditOutcome) -> Result<WrittenReport> {
        fs::create_dir_all(&self.audit_dir)?;

        let grade = ReportGrade::from_security(&outcome.security);
        let path = self.audit_dir.join(Self::file_name(outcome));
        fs::write(&path, self.render(outcome, grade))?;

        info!("Audit report written to {}", path.display());
        Ok(WrittenReport { path, grade })
    }

    pub fn file_name(outcome: &AuditOutcome) -> String {
        format!(
            "audit_{}_{}.md",
            report_symbol(outcome),
            outcome.audited_at.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn render(&self, outcome: &AuditOutcome, grade: ReportGrade) -> String {
        MarkdownReport { outcome, grade }.to_string()
    }
}

struct MarkdownReport<'a> {
    outcome: &'a AuditOutcome,
    grade: ReportGrade,
}

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.outcome;
        let grade = self.grade;

        writeln!(f, "# 🔍 Audit Report: {}", report_symbol(outcome))?;
        writeln!(f)?;
        writeln!(f, "**Date:** {}", outcome.audited_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "**Contract:** `{}`", outcome.mint)?;
        writeln!(f, "**Grade:** {} {}", grade.emoji(), grade.label())?;
        writeln!(f, "**Terminal verdict:** {}", outcome.assessment.verdict)?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;

        writeln!(f, "## 📊 Market Metrics")?;
        match &outcome.market {
            Ok(m) => {
                writeln!(f, "- **Name:** {}", m.name)?;
                writeln!(f, "- **Price:** ${}", m.price_usd)?;
                writeln!(f, "- **Liquidity:** ${}", format_usd(m.liquidity_usd))?;
                writeln!(f, "- **24h Volume:** ${}", format_usd(m.volume_24h_usd))?;
                writeln!(f, "- **24h Change:** {}%", m.price_change_24h_percent)?;
                writeln!(f, "- **FDV:** ${}", format_usd(m.fdv_usd))?;
                writeln!(f, "- **DEX:** {}", m.dex_id)?;
                if let Some(created) = m.pair_created_at() {
                    writeln!(f, "- **Pair created:** {}", created.format("%Y-%m-%d %H:%M UTC"))?;
                }
            }
            Err(e) => writeln!(f, "- ❌ DexScreener Error: {}", e)?,
        }
        writeln!(f)?;

        writeln!(f, "## 🛡️ Security Analysis (RugCheck)")?;
        match &outcome.security {
            Ok(r) => {
                writeln!(f, "- **Score:** {}", r.score)?;
                writeln!(f, "- **LP Locked:** {}%", r.lp_locked_percent)?;
                writeln!(f, "- **Mint Authority:** {}", authority_label(r.mint_authority_active))?;
                writeln!(f, "- **Freeze Authority:** {}", authority_label(r.freeze_authority_active))?;
                writeln!(f)?;

                writeln!(f, "### Top Holders:")?;
                if r.top_holders.is_empty() {
                    writeln!(f, "- None reported")?;
                }
                for holder in &r.top_holders {
                    writeln!(f, "- `{}`: {:.2}%", holder.address, holder.pct)?;
                }
                writeln!(f)?;

                writeln!(f, "### Detected Risks:")?;
                if r.risks.is_empty() {
                    writeln!(f, "- None")?;
                }
                for risk in &r.risks {
                    let marker = if risk.level.is_danger() { "🚨" } else { "⚠️" };
                    let description = if risk.description.is_empty() {
                        "No description"
                    } else {
                        risk.description.as_str()
                    };
                    writeln!(f, "- {} {}: {}", marker, risk.name, description)?;
                }
            }
            Err(e) => writeln!(f, "- ❌ RugCheck Error: {}", e)?,
        }

        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f, "*Report generated automatically by The Chassis Intelligence*")
    }
}

fn authority_label(active: bool) -> &'static str {
    if active {
        "⚠️ ACTIVE"
    } else {
        "✅ RENOUNCED"
    }
}

// Symbol as used in file names: `$` dropped, anything not filename-safe replaced.
fn report_symbol(outcome: &AuditOutcome) -> String {
    let symbol: String = match &outcome.market {
        Ok(m) => m
            .symbol
            .replace('$', "")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect(),
        Err(_) => String::new(),
    };
    if symbol.is_empty() {
        "UNKNOWN".to_string()
    } else {
        symbol
    }
}
