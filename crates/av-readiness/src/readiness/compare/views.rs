use super::classify::{InfrastructureTier, VulnerabilityTier};
use super::selector::AreaSelector;
use crate::readiness::domain::{RawMetric, RawMetrics, SubIndex, PERCENT};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub sub_index: SubIndex,
    pub label: &'static str,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailEntry {
    pub metric: RawMetric,
    pub label: &'static str,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaClassification {
    pub physical: InfrastructureTier,
    pub physical_label: &'static str,
    pub digital: InfrastructureTier,
    pub digital_label: &'static str,
    pub vulnerability: VulnerabilityTier,
    pub vulnerability_label: &'static str,
}

/// Radar vectors and labels for one side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaProfile {
    pub selector: AreaSelector,
    pub label: String,
    pub readiness_score: f64,
    pub summary: Vec<SummaryEntry>,
    pub detail: Vec<DetailEntry>,
    pub classification: AreaClassification,
    #[serde(skip)]
    pub(crate) metrics: RawMetrics,
}

impl AreaProfile {
    pub fn summary_percent(&self, index: SubIndex) -> f64 {
        self.summary
            .iter()
            .find(|entry| entry.sub_index == index)
            .map(|entry| entry.percent)
            .unwrap_or_default()
    }

    /// Percentage for any raw metric, including those left off the detail radar.
    pub fn metric_percent(&self, metric: RawMetric) -> f64 {
        self.metrics.get(metric) * PERCENT
    }

    pub fn summary_values(&self) -> Vec<f64> {
        self.summary.iter().map(|entry| entry.percent).collect()
    }

    pub fn detail_values(&self) -> Vec<f64> {
        self.detail.iter().map(|entry| entry.percent).collect()
    }
}

/// Label of the area ahead in each category. Ties go to the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryLeaders {
    pub physical: String,
    pub digital: String,
    /// Area with the higher share of vulnerable population.
    pub vulnerability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub baseline: AreaProfile,
    pub compare: AreaProfile,
    pub leaders: CategoryLeaders,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonInsights {
    pub baseline: Vec<String>,
    pub compare: Vec<String>,
    pub comparison: Vec<String>,
}
