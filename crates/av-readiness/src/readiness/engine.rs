use super::aggregate::{self, CountyAggregate, CountyAggregates, StateAggregate};
use super::compare::{AreaSelector, Comparator, ComparisonResult, DetailEntry, SummaryEntry};
use super::domain::{RawMetric, SubIndex, PERCENT};
use super::error::ReadinessError;
use super::scoring;
use super::selection::{Granularity, MapSelection, ScoreKind};
use super::store::MetricStore;
use super::weights::WeightSet;
use crate::ingest::LoadError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// One colored feature of a choropleth layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureValue {
    /// GEOID at tract granularity, county name at county granularity.
    pub key: String,
    pub county: String,
    pub percent: f64,
}

/// Values the renderer needs to color the map for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethLayer {
    pub selection: MapSelection,
    pub key_column: &'static str,
    pub value_column: &'static str,
    pub features: Vec<FeatureValue>,
}

/// Readout for a county highlighted on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusReadout {
    pub county: String,
    pub score: ScoreKind,
    pub percent: f64,
    pub message: String,
}

/// Detail panel for one county: its three sub-indices and every input metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyMetrics {
    pub county: String,
    pub tract_count: usize,
    pub readiness_score: f64,
    pub sub_indices: Vec<SummaryEntry>,
    /// All nine raw metrics, Age 65+ included, as plain percentages.
    pub metrics: Vec<DetailEntry>,
    /// `100 - unpaved`, the road-surface figure shown beside the bars.
    pub paved_percent: f64,
}

impl CountyMetrics {
    pub fn sub_index_percent(&self, index: SubIndex) -> f64 {
        self.sub_indices
            .iter()
            .find(|entry| entry.sub_index == index)
            .map(|entry| entry.percent)
            .unwrap_or_default()
    }

    pub fn metric_percent(&self, metric: RawMetric) -> f64 {
        self.metrics
            .iter()
            .find(|entry| entry.metric == metric)
            .map(|entry| entry.percent)
            .unwrap_or_default()
    }
}

/// Read-only engine over one metric snapshot.
///
/// Every weight-dependent figure is recomputed from the weights passed in.
#[derive(Debug, Clone)]
pub struct ReadinessEngine {
    store: Arc<MetricStore>,
}

impl ReadinessEngine {
    pub fn new(store: MetricStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<MetricStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MetricStore {
        &self.store
    }

    /// Swaps in a freshly read snapshot of the same source.
    pub fn refresh(&mut self) -> Result<(), LoadError> {
        let reloaded = self.store.reload()?;
        info!(tracts = reloaded.len(), "refreshed readiness metrics");
        self.store = Arc::new(reloaded);
        Ok(())
    }

    pub fn county_list(&self) -> Vec<String> {
        self.store.county_names()
    }

    pub fn tract_scores(&self, weights: &WeightSet) -> BTreeMap<String, f64> {
        scoring::tract_scores(self.store.units(), weights)
    }

    pub fn county_aggregates(&self, weights: &WeightSet) -> CountyAggregates {
        aggregate::aggregate_by_county(self.store.units(), weights)
    }

    pub fn state_aggregate(
        &self,
        counties: &CountyAggregates,
    ) -> Result<StateAggregate, ReadinessError> {
        aggregate::aggregate_state(counties)
    }

    /// Compares two areas by identifier; `"state level"` names the state.
    pub fn compare_areas(
        &self,
        baseline: &str,
        compare: &str,
        weights: &WeightSet,
    ) -> Result<ComparisonResult, ReadinessError> {
        let counties = self.county_aggregates(weights);
        let state = aggregate::aggregate_state(&counties)?;
        debug!(baseline, compare, "comparing areas");

        Comparator::new(&counties, &state)
            .compare(&AreaSelector::parse(baseline), &AreaSelector::parse(compare))
    }

    pub fn map_layer(&self, selection: MapSelection, weights: &WeightSet) -> ChoroplethLayer {
        let features = match selection.granularity {
            Granularity::Tract => self
                .store
                .units()
                .iter()
                .map(|unit| FeatureValue {
                    key: unit.geoid.clone(),
                    county: unit.county.clone(),
                    percent: match selection.score.sub_index() {
                        Some(index) => unit.sub_index(index) * PERCENT,
                        None => scoring::score(unit, weights),
                    },
                })
                .collect(),
            Granularity::County => self
                .county_aggregates(weights)
                .into_values()
                .map(|aggregate| FeatureValue {
                    key: aggregate.county.clone(),
                    percent: county_percent(&aggregate, selection.score),
                    county: aggregate.county,
                })
                .collect(),
        };

        ChoroplethLayer {
            selection,
            key_column: selection.granularity.key_column(),
            value_column: selection.column(),
            features,
        }
    }

    /// Reports one county's value for the selected score.
    ///
    /// The mean of a county's tract values equals its aggregate, so the
    /// readout is the same at either granularity.
    pub fn focus_readout(
        &self,
        county: &str,
        score: ScoreKind,
        weights: &WeightSet,
    ) -> Result<FocusReadout, ReadinessError> {
        let aggregate = self
            .county_aggregates(weights)
            .remove(county)
            .ok_or_else(|| ReadinessError::AreaNotFound(county.to_string()))?;
        let percent = county_percent(&aggregate, score);
        let message = match score {
            ScoreKind::OverallReadiness => {
                format!("Overall Readiness score for {county} is {percent:.2}%")
            }
            ScoreKind::SocialVulnerability => {
                format!("Social Vulnerability Index score for {county} is {percent:.2}%")
            }
            ScoreKind::PhysicalInfrastructure | ScoreKind::DigitalInfrastructure => {
                format!("{} readiness for {county} is {percent:.2}%", score.label())
            }
        };

        Ok(FocusReadout {
            county: county.to_string(),
            score,
            percent,
            message,
        })
    }

    /// Sub-index and input-metric percentages for a single county.
    pub fn county_metrics(
        &self,
        county: &str,
        weights: &WeightSet,
    ) -> Result<CountyMetrics, ReadinessError> {
        let aggregate = self
            .county_aggregates(weights)
            .remove(county)
            .ok_or_else(|| ReadinessError::AreaNotFound(county.to_string()))?;
        debug!(county, tracts = aggregate.tract_count, "county metrics");

        let sub_indices = aggregate
            .sub_indices
            .iter()
            .map(|(sub_index, value)| SummaryEntry {
                sub_index,
                label: sub_index.label(),
                percent: value * PERCENT,
            })
            .collect();
        let metrics = RawMetric::ordered()
            .into_iter()
            .map(|metric| DetailEntry {
                metric,
                label: metric.label(),
                percent: aggregate.metrics.get(metric) * PERCENT,
            })
            .collect();

        Ok(CountyMetrics {
            paved_percent: PERCENT - aggregate.metrics.get(RawMetric::UnpavedRoads) * PERCENT,
            county: aggregate.county,
            tract_count: aggregate.tract_count,
            readiness_score: aggregate.readiness_score,
            sub_indices,
            metrics,
        })
    }
}

fn county_percent(aggregate: &CountyAggregate, score: ScoreKind) -> f64 {
    match score.sub_index() {
        Some(index) => aggregate.sub_indices.get(index) * PERCENT,
        None => aggregate.readiness_score,
    }
}
