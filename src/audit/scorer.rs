use tracing::debug;

use crate::error::FetchError;
use crate::models::market::MarketSnapshot;
use crate::models::security::{Score, SecurityReport};
use crate::models::verdict::{Assessment, Verdict};
use crate::utils::format_usd;

/// Signal thresholds for the terminal verdict. Kept apart from the report grade
/// thresholds in `report.rs`.
#[derive(Debug, Clone)]
pub struct ScoringThresholds {
    pub max_rugcheck_score: f64, // exclusive
    pub lp_locked_good_percent: f64,
    pub lp_locked_bad_percent: f64, // exclusive
    pub min_liquidity_usd: f64,
    pub min_volume_24h_usd: f64,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            max_rugcheck_score: 1000.0,
            lp_locked_good_percent: 90.0,
            lp_locked_bad_percent: 50.0,
            min_liquidity_usd: 5000.0,
            min_volume_24h_usd: 10000.0,
        }
    }
}

/// Threshold classifier over a security report and a market snapshot.
/// Pure: no I/O, same inputs always give the same assessment.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    thresholds: ScoringThresholds,
}

impl RiskScorer {
    pub fn new(thresholds: ScoringThresholds) -> Self {
        Self { thresholds }
    }

    pub fn assess(
        &self,
        security: &Result<SecurityReport, FetchError>,
        market: &Result<MarketSnapshot, FetchError>,
    ) -> Assessment {
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        match security {
            Ok(report) => self.evaluate_security(report, &mut positive, &mut negative),
            Err(e) => negative.push(format!("RugCheck Error: {}", e)),
        }

        match market {
            Ok(snapshot) => self.evaluate_market(snapshot, &mut positive, &mut negative),
            Err(e) => negative.push(format!("DexScreener Error: {}", e)),
        }

        let verdict = Self::classify(positive.len(), negative.len());
        debug!(
            "Assessment: {} (+{} / -{})",
            verdict.label(),
            positive.len(),
            negative.len()
        );

        Assessment {
            verdict,
            positive_signals: positive,
            negative_signals: negative,
        }
    }

    /// Ordered rules, first match wins.
    pub fn classify(positive: usize, negative: usize) -> Verdict {
        if negative == 0 && positive >= 3 {
            Verdict::Safe
        } else if negative <= 1 && positive >= 2 {
            Verdict::Review
        } else {
            Verdict::Danger
        }
    }

    fn evaluate_security(
        &self,
        report: &SecurityReport,
        positive: &mut Vec<String>,
        negative: &mut Vec<String>,
    ) {
        let t = &self.thresholds;

        let score_ok = match &report.score {
            Score::Good => true,
            Score::Value(v) => *v < t.max_rugcheck_score,
            Score::Unrated(_) => false,
        };
        let score_signal = format!("RugCheck Score: {}", report.score);
        if score_ok {
            positive.push(score_signal);
        } else {
            negative.push(score_signal);
        }

        // [bad, good) yields no signal either way.
        let lp = report.lp_locked_percent;
        if lp >= t.lp_locked_good_percent {
            positive.push(format!("LP Locked: {}%", lp));
        } else if lp < t.lp_locked_bad_percent {
            negative.push(format!("LP Locked: {}% ⚠", lp));
        }

        for risk in report.danger_risks() {
            negative.push(format!("Risk: {}", risk.name));
        }
    }

    fn evaluate_market(
        &self,
        snapshot: &MarketSnapshot,
        positive: &mut Vec<String>,
        negative: &mut Vec<String>,
    ) {
        let t = &self.thresholds;

        if snapshot.liquidity_usd >= t.min_liquidity_usd {
            positive.push(format!("Liquidez: ${}", format_usd(snapshot.liquidity_usd)));
        } else {
            negative.push(format!("Liquidez baja: ${}", format_usd(snapshot.liquidity_usd)));
        }

        // Low volume is not penalised.
        if snapshot.volume_24h_usd >= t.min_volume_24h_usd {
            positive.push(format!("Volumen 24h: ${}", format_usd(snapshot.volume_24h_usd)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::security::{Risk, RiskLevel};

    fn report(score: Score, lp: f64, risks: Vec<Risk>) -> SecurityReport {
        SecurityReport {
            score,
            risks,
            lp_locked_percent: lp,
            ..SecurityReport::default()
        }
    }

    fn market(liquidity: f64, volume: f64) -> MarketSnapshot {
        MarketSnapshot {
            liquidity_usd: liquidity,
            volume_24h_usd: volume,
            ..MarketSnapshot::default()
        }
    }

    fn danger(name: &str) -> Risk {
        Risk {
            name: name.to_string(),
            level: RiskLevel::Danger,
            description: String::new(),
        }
    }

    #[test]
    fn test_score_signal_boundary() {
        let scorer = RiskScorer::default();
        let no_market = Err(FetchError::NoPairs);

        for (score, positive) in [
            (Score::Good, true),
            (Score::Value(0.0), true),
            (Score::Value(999.0), true),
            (Score::Value(999.99), true),
            (Score::Value(1000.0), false),
            (Score::Value(25000.0), false),
            (Score::Unrated("N/A".to_string()), false),
        ] {
            let label = format!("RugCheck Score: {}", score);
            let a = scorer.assess(&Ok(report(score, 70.0, vec![])), &no_market);
            assert_eq!(a.positive_signals.contains(&label), positive, "{}", label);
            assert_eq!(a.negative_signals.contains(&label), !positive, "{}", label);
        }
    }

    #[test]
    fn test_lp_locked_boundaries() {
        let scorer = RiskScorer::default();
        let no_market = Err(FetchError::NoPairs);

        let at_90 = scorer.assess(&Ok(report(Score::Good, 90.0, vec![])), &no_market);
        assert!(at_90.positive_signals.contains(&"LP Locked: 90%".to_string()));

        let at_50 = scorer.assess(&Ok(report(Score::Good, 50.0, vec![])), &no_market);
        assert!(!at_50.positive_signals.iter().any(|s| s.starts_with("LP Locked")));
        assert!(!at_50.negative_signals.iter().any(|s| s.starts_with("LP Locked")));

        let at_70 = scorer.assess(&Ok(report(Score::Good, 70.0, vec![])), &no_market);
        assert!(!at_70.positive_signals.iter().any(|s| s.starts_with("LP Locked")));
        assert!(!at_70.negative_signals.iter().any(|s| s.starts_with("LP Locked")));

        let at_49 = scorer.assess(&Ok(report(Score::Good, 49.5, vec![])), &no_market);
        assert!(at_49.negative_signals.contains(&"LP Locked: 49.5% ⚠".to_string()));
    }

    #[test]
    fn test_only_danger_risks_are_counted() {
        let scorer = RiskScorer::default();
        let risks = vec![
            danger("Freeze Authority still enabled"),
            Risk {
                name: "Mutable metadata".to_string(),
                level: RiskLevel::Warning,
                description: String::new(),
            },
        ];
        let a = scorer.assess(&Ok(report(Score::Good, 70.0, risks)), &Ok(market(6000.0, 0.0)));

        assert_eq!(
            a.negative_signals,
            vec!["Risk: Freeze Authority still enabled".to_string()]
        );
    }

    #[test]
    fn test_safe_verdict() {
        let scorer = RiskScorer::default();
        let a = scorer.assess(
            &Ok(report(Score::Good, 95.0, vec![])),
            &Ok(market(6000.0, 12000.0)),
        );

        assert_eq!(
            a.positive_signals,
            vec![
                "RugCheck Score: Good".to_string(),
                "LP Locked: 95%".to_string(),
                "Liquidez: $6,000".to_string(),
                "Volumen 24h: $12,000".to_string(),
            ]
        );
        assert!(a.negative_signals.is_empty());
        assert_eq!(a.verdict, Verdict::Safe);
    }

    #[test]
    fn test_danger_verdict() {
        let scorer = RiskScorer::default();
        let a = scorer.assess(
            &Ok(report(Score::Value(2000.0), 10.0, vec![danger("X")])),
            &Ok(market(100.0, 0.0)),
        );

        assert_eq!(
            a.negative_signals,
            vec![
                "RugCheck Score: 2000".to_string(),
                "LP Locked: 10% ⚠".to_string(),
                "Risk: X".to_string(),
                "Liquidez baja: $100".to_string(),
            ]
        );
        assert!(a.positive_signals.is_empty());
        assert_eq!(a.verdict, Verdict::Danger);
    }

    #[test]
    fn test_failed_security_source_falls_to_review() {
        let scorer = RiskScorer::default();
        let a = scorer.assess(&Err(FetchError::Status(500)), &Ok(market(50000.0, 250000.0)));

        assert_eq!(a.negative_signals, vec!["RugCheck Error: HTTP 500".to_string()]);
        assert_eq!(a.positive_signals.len(), 2);
        assert_eq!(a.verdict, Verdict::Review);
    }

    #[test]
    fn test_failed_market_source() {
        let scorer = RiskScorer::default();
        let a = scorer.assess(&Ok(report(Score::Good, 95.0, vec![])), &Err(FetchError::NoPairs));

        assert_eq!(
            a.negative_signals,
            vec!["DexScreener Error: No pairs found".to_string()]
        );
        assert_eq!(a.verdict, Verdict::Review);
    }

    #[test]
    fn test_low_volume_has_no_negative_signal() {
        let scorer = RiskScorer::default();
        let a = scorer.assess(&Ok(report(Score::Good, 95.0, vec![])), &Ok(market(6000.0, 9999.0)));

        assert!(a.negative_signals.is_empty());
        assert_eq!(a.positive_signals.len(), 3);
        assert_eq!(a.verdict, Verdict::Safe);
    }

    #[test]
    fn test_classify_rules() {
        assert_eq!(RiskScorer::classify(0, 0), Verdict::Danger);
        assert_eq!(RiskScorer::classify(2, 0), Verdict::Review);
        assert_eq!(RiskScorer::classify(3, 0), Verdict::Safe);
        assert_eq!(RiskScorer::classify(3, 1), Verdict::Review);
        assert_eq!(RiskScorer::classify(1, 1), Verdict::Danger);
        assert_eq!(RiskScorer::classify(4, 2), Verdict::Danger);
    }
}
