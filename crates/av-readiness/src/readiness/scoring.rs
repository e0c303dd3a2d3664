use super::domain::{AreaUnit, SubIndex, SubIndexScores, PERCENT};
use super::weights::WeightSet;
use std::collections::BTreeMap;

/// Composite readiness of one tract, as a percentage in [0,100].
pub fn score(area: &AreaUnit, weights: &WeightSet) -> f64 {
    composite(&area.sub_indices, weights)
}

/// Weighted combination of sub-index fractions, as a percentage in [0,100].
///
/// The weighted sum is divided by the weight total, which a valid
/// [`WeightSet`] keeps within 1e-6 of 1. Uniform sub-indices therefore map
/// exactly onto themselves (all ones score `100.0`, all zeros `0.0`).
pub fn composite(sub_indices: &SubIndexScores, weights: &WeightSet) -> f64 {
    let weighted: f64 = SubIndex::ordered()
        .into_iter()
        .map(|index| weights.weight(index) * sub_indices.get(index))
        .sum();

    (PERCENT * (weighted / weights.total())).clamp(0.0, PERCENT)
}

/// Scores every tract, keyed by GEOID.
pub fn tract_scores(units: &[AreaUnit], weights: &WeightSet) -> BTreeMap<String, f64> {
    units
        .iter()
        .map(|unit| (unit.geoid.clone(), score(unit, weights)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::domain::RawMetrics;

    fn tract(physical: f64, digital: f64, social: f64) -> AreaUnit {
        AreaUnit {
            geoid: "37183000100".to_string(),
            county: "Wake".to_string(),
            sub_indices: SubIndexScores::new(physical, digital, social),
            metrics: RawMetrics::default(),
        }
    }

    #[test]
    fn uniform_extremes_score_exactly() {
        let triples = [
            WeightSet::default(),
            WeightSet::new(1.0, 0.0, 0.0).expect("valid"),
            WeightSet::new(0.2, 0.45, 0.35).expect("valid"),
            WeightSet::new(0.6, 0.3, 0.1 + 9e-7).expect("valid"),
        ];

        for weights in triples {
            assert_eq!(score(&tract(1.0, 1.0, 1.0), &weights), 100.0);
            assert_eq!(score(&tract(0.0, 0.0, 0.0), &weights), 0.0);
        }
    }

    #[test]
    fn default_weights_combine_sub_indices() {
        let value = score(&tract(0.5, 0.8, 0.2), &WeightSet::default());
        let expected = 100.0 * (0.6 * 0.5 + 0.3 * 0.8 + 0.1 * 0.2);
        assert!((value - expected).abs() < 1e-9, "{value} != {expected}");
    }

    #[test]
    fn single_component_weight_isolates_that_sub_index() {
        let weights = WeightSet::validate(None, Some(1.0), None).expect("valid");
        let value = score(&tract(0.1, 0.73, 0.9), &weights);
        assert!((value - 73.0).abs() < 1e-9);
    }

    #[test]
    fn tract_scores_are_keyed_by_geoid() {
        let mut second = tract(0.0, 0.0, 0.0);
        second.geoid = "37183000200".to_string();
        let scores = tract_scores(&[tract(1.0, 1.0, 1.0), second], &WeightSet::default());

        assert_eq!(scores.len(), 2);
        assert_eq!(scores["37183000100"], 100.0);
        assert_eq!(scores["37183000200"], 0.0);
    }
}
