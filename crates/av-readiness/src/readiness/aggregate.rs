use super::domain::{AreaUnit, RawMetric, RawMetrics, SubIndex, SubIndexScores};
use super::error::ReadinessError;
use super::scoring;
use super::weights::WeightSet;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// County aggregates keyed (and therefore ordered) by county name.
pub type CountyAggregates = BTreeMap<String, CountyAggregate>;

/// Mean of every tract value within one county.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyAggregate {
    pub county: String,
    pub tract_count: usize,
    pub sub_indices: SubIndexScores,
    pub metrics: RawMetrics,
    /// Mean tract readiness score, as a percentage.
    pub readiness_score: f64,
}

/// Statewide figures, one vote per county regardless of its tract count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateAggregate {
    pub county_count: usize,
    pub sub_indices: SubIndexScores,
    pub metrics: RawMetrics,
    /// Mean of the county readiness scores, as a percentage.
    pub readiness_score: f64,
}

#[derive(Debug, Default)]
struct MeanAccumulator {
    count: usize,
    sub_indices: [f64; 3],
    metrics: [f64; RawMetric::COUNT],
    readiness_score: f64,
}

impl MeanAccumulator {
    fn add(&mut self, sub_indices: &SubIndexScores, metrics: &RawMetrics, readiness_score: f64) {
        self.count += 1;
        for (slot, (_, value)) in self.sub_indices.iter_mut().zip(sub_indices.iter()) {
            *slot += value;
        }
        for (slot, (_, value)) in self.metrics.iter_mut().zip(metrics.iter()) {
            *slot += value;
        }
        self.readiness_score += readiness_score;
    }

    /// Returns `None` when nothing was accumulated.
    fn means(&self) -> Option<(SubIndexScores, RawMetrics, f64)> {
        if self.count == 0 {
            return None;
        }

        let count = self.count as f64;
        let mut sub_indices = SubIndexScores::default();
        for (index, total) in SubIndex::ordered().into_iter().zip(self.sub_indices) {
            sub_indices.set(index, total / count);
        }
        let metrics = RawMetric::ordered()
            .into_iter()
            .zip(self.metrics)
            .map(|(metric, total)| (metric, total / count))
            .collect();

        Some((sub_indices, metrics, self.readiness_score / count))
    }
}

/// Rolls tracts up into per-county means.
///
/// Only counties that own at least one tract appear in the output.
pub fn aggregate_by_county(units: &[AreaUnit], weights: &WeightSet) -> CountyAggregates {
    let mut accumulators: BTreeMap<&str, MeanAccumulator> = BTreeMap::new();

    for unit in units {
        accumulators.entry(unit.county.as_str()).or_default().add(
            &unit.sub_indices,
            &unit.metrics,
            scoring::score(unit, weights),
        );
    }

    let aggregates: CountyAggregates = accumulators
        .into_iter()
        .filter_map(|(county, accumulator)| {
            let (sub_indices, metrics, readiness_score) = accumulator.means()?;
            Some((
                county.to_string(),
                CountyAggregate {
                    county: county.to_string(),
                    tract_count: accumulator.count,
                    sub_indices,
                    metrics,
                    readiness_score,
                },
            ))
        })
        .collect();

    debug!(
        tracts = units.len(),
        counties = aggregates.len(),
        "aggregated tracts by county"
    );

    aggregates
}

/// Averages county aggregates into the statewide pseudo-unit.
///
/// This is a mean of county means: a county of two tracts counts as much as a
/// county of two hundred.
pub fn aggregate_state(counties: &CountyAggregates) -> Result<StateAggregate, ReadinessError> {
    let mut accumulator = MeanAccumulator::default();
    for aggregate in counties.values() {
        accumulator.add(
            &aggregate.sub_indices,
            &aggregate.metrics,
            aggregate.readiness_score,
        );
    }

    let (sub_indices, metrics, readiness_score) =
        accumulator.means().ok_or(ReadinessError::EmptyAreaSet)?;

    Ok(StateAggregate {
        county_count: accumulator.count,
        sub_indices,
        metrics,
        readiness_score,
    })
}
