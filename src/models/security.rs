use serde::{Deserialize, Serialize};
use std::fmt;

/// RugCheck risk score. Lower is safer; "Good" means there is no contract risk to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Score {
    Good,
    Value(f64),
    Unrated(String),
}

impl Score {
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Score::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::Unrated("N/A".to_string())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Good => write!(f, "Good"),
            Score::Value(v) => write!(f, "{}", v),
            Score::Unrated(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Danger,
    Warning,
    Info,
    Other(String),
}

impl RiskLevel {
    pub fn parse(level: &str) -> Self {
        match level.to_ascii_lowercase().as_str() {
            "danger" => RiskLevel::Danger,
            "warn" | "warning" => RiskLevel::Warning,
            "info" => RiskLevel::Info,
            _ => RiskLevel::Other(level.to_string()),
        }
    }

    pub fn is_danger(&self) -> bool {
        matches!(self, RiskLevel::Danger)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub name: String,
    pub level: RiskLevel,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHolder {
    pub address: String,
    pub owner: Option<String>,
    pub pct: f64,
}

/// Contract-level security snapshot for one token mint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecurityReport {
    pub score: Score,
    pub risks: Vec<Risk>,
    pub top_holders: Vec<TopHolder>, // at most 5
    pub lp_locked_percent: f64,
    pub mint_authority_active: bool,
    pub freeze_authority_active: bool,
}

impl SecurityReport {
    pub fn danger_risks(&self) -> impl Iterator<Item = &Risk> {
        self.risks.iter().filter(|r| r.level.is_danger())
    }
}
