use crate::readiness::domain::SubIndex;
use serde::Serialize;

pub const STRONG_THRESHOLD: f64 = 80.0;
pub const MODERATE_THRESHOLD: f64 = 50.0;
pub const HIGH_VULNERABILITY_THRESHOLD: f64 = 10.0;

/// Narrative tier of an infrastructure percentage. Boundaries belong to the
/// higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureTier {
    Strong,
    Moderate,
    Weak,
}

impl InfrastructureTier {
    pub fn classify(percent: f64) -> Self {
        if percent >= STRONG_THRESHOLD {
            Self::Strong
        } else if percent >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    /// Digital infrastructure below the moderate tier reads "underperforming".
    pub const fn label(self, index: SubIndex) -> &'static str {
        match (self, index) {
            (Self::Strong, _) => "strong",
            (Self::Moderate, _) => "moderate",
            (Self::Weak, SubIndex::DigitalInfrastructure) => "underperforming",
            (Self::Weak, _) => "weak",
        }
    }

    pub const fn remark(self, index: SubIndex) -> &'static str {
        match (self, index) {
            (Self::Strong, SubIndex::DigitalInfrastructure) => {
                "It's contributing positively to overall readiness."
            }
            (Self::Moderate, SubIndex::DigitalInfrastructure) => {
                "It requires targeted improvements."
            }
            (Self::Weak, SubIndex::DigitalInfrastructure) => "It requires significant upgrades.",
            (Self::Strong, _) => "It performs well in this area.",
            (Self::Moderate, _) => "It could benefit from targeted improvement.",
            (Self::Weak, _) => "Significant improvement is required.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityTier {
    Higher,
    Lower,
}

impl VulnerabilityTier {
    pub fn classify(percent: f64) -> Self {
        if percent >= HIGH_VULNERABILITY_THRESHOLD {
            Self::Higher
        } else {
            Self::Lower
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Higher => "higher vulnerability",
            Self::Lower => "lower vulnerability",
        }
    }
}
