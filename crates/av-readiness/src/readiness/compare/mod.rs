mod classify;
mod insights;
mod selector;
pub mod views;

pub use classify::{
    InfrastructureTier, VulnerabilityTier, HIGH_VULNERABILITY_THRESHOLD, MODERATE_THRESHOLD,
    STRONG_THRESHOLD,
};
pub use selector::{AreaSelector, STATE_LEVEL_ID};
pub use views::{
    AreaClassification, AreaProfile, CategoryLeaders, ComparisonInsights, ComparisonResult,
    DetailEntry, SummaryEntry,
};

use super::aggregate::{CountyAggregates, StateAggregate};
use super::domain::{RawMetric, RawMetrics, SubIndex, SubIndexScores, PERCENT};
use super::error::ReadinessError;

/// Builds side-by-side profiles from precomputed aggregates.
pub struct Comparator<'a> {
    counties: &'a CountyAggregates,
    state: &'a StateAggregate,
    detail: Vec<RawMetric>,
}

impl<'a> Comparator<'a> {
    pub fn new(counties: &'a CountyAggregates, state: &'a StateAggregate) -> Self {
        Self {
            counties,
            state,
            detail: RawMetric::radar_detail().to_vec(),
        }
    }

    /// Replaces the metrics drawn on the detail radar.
    pub fn with_detail_metrics(mut self, metrics: impl IntoIterator<Item = RawMetric>) -> Self {
        self.detail = metrics.into_iter().collect();
        self
    }

    pub fn profile(&self, selector: &AreaSelector) -> Result<AreaProfile, ReadinessError> {
        let (sub_indices, metrics, readiness_score) = match selector {
            AreaSelector::StateLevel => (
                &self.state.sub_indices,
                &self.state.metrics,
                self.state.readiness_score,
            ),
            AreaSelector::County(name) => {
                let aggregate = self
                    .counties
                    .get(name)
                    .ok_or_else(|| ReadinessError::AreaNotFound(name.clone()))?;
                (
                    &aggregate.sub_indices,
                    &aggregate.metrics,
                    aggregate.readiness_score,
                )
            }
        };

        Ok(self.build_profile(selector, sub_indices, metrics, readiness_score))
    }

    pub fn compare(
        &self,
        baseline: &AreaSelector,
        compare: &AreaSelector,
    ) -> Result<ComparisonResult, ReadinessError> {
        let baseline = self.profile(baseline)?;
        let compare = self.profile(compare)?;
        let leaders = CategoryLeaders {
            physical: leader(&baseline, &compare, SubIndex::PhysicalInfrastructure),
            digital: leader(&baseline, &compare, SubIndex::DigitalInfrastructure),
            vulnerability: leader(&baseline, &compare, SubIndex::SocialVulnerability),
        };

        Ok(ComparisonResult {
            baseline,
            compare,
            leaders,
        })
    }

    fn build_profile(
        &self,
        selector: &AreaSelector,
        sub_indices: &SubIndexScores,
        metrics: &RawMetrics,
        readiness_score: f64,
    ) -> AreaProfile {
        let summary: Vec<SummaryEntry> = sub_indices
            .iter()
            .map(|(sub_index, value)| SummaryEntry {
                sub_index,
                label: sub_index.label(),
                percent: value * PERCENT,
            })
            .collect();

        let detail = self
            .detail
            .iter()
            .map(|&metric| DetailEntry {
                metric,
                label: metric.label(),
                percent: metrics.get(metric) * PERCENT,
            })
            .collect();

        let physical = InfrastructureTier::classify(
            sub_indices.get(SubIndex::PhysicalInfrastructure) * PERCENT,
        );
        let digital = InfrastructureTier::classify(
            sub_indices.get(SubIndex::DigitalInfrastructure) * PERCENT,
        );
        let vulnerability =
            VulnerabilityTier::classify(sub_indices.get(SubIndex::SocialVulnerability) * PERCENT);

        AreaProfile {
            selector: selector.clone(),
            label: selector.label().to_string(),
            readiness_score,
            summary,
            detail,
            classification: AreaClassification {
                physical,
                physical_label: physical.label(SubIndex::PhysicalInfrastructure),
                digital,
                digital_label: digital.label(SubIndex::DigitalInfrastructure),
                vulnerability,
                vulnerability_label: vulnerability.label(),
            },
            metrics: *metrics,
        }
    }
}

impl ComparisonResult {
    pub fn insights(&self) -> ComparisonInsights {
        insights::generate_insights(self)
    }
}

fn leader(baseline: &AreaProfile, compare: &AreaProfile, index: SubIndex) -> String {
    if baseline.summary_percent(index) >= compare.summary_percent(index) {
        baseline.label.clone()
    } else {
        compare.label.clone()
    }
}
