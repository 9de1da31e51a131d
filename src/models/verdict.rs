use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Safe,
    Review,
    Danger,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Safe => "SAFE",
            Verdict::Review => "REVIEW",
            Verdict::Danger => "DANGER",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Verdict::Safe => "Proceed with caution",
            Verdict::Review => "Evaluate risks manually",
            Verdict::Danger => "Do not trade",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.advice())
    }
}

/// Scorer output: the verdict and the signals that produced it, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub positive_signals: Vec<String>,
    pub negative_signals: Vec<String>,
}
