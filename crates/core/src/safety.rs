use serde::{Deserialize, Serialize};

/// Advisory bands, ordered from safest to most dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VerySafe,
    Safe,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score <= 2.0 {
            Self::VerySafe
        } else if score <= 3.0 {
            Self::Safe
        } else if score <= 3.5 {
            Self::Moderate
        } else if score <= 4.0 {
            Self::High
        } else {
            Self::Extreme
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VerySafe => "Very Safe",
            Self::Safe => "Safe",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
            Self::Extreme => "Extreme Risk",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::VerySafe => "green",
            Self::Safe => "blue",
            Self::Moderate => "yellow",
            Self::High => "orange",
            Self::Extreme => "red",
        }
    }
}
