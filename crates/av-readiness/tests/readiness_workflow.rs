use av_readiness::readiness::compare::{InfrastructureTier, VulnerabilityTier};
use av_readiness::readiness::scoring::composite;
use av_readiness::readiness::{
    Granularity, InvalidWeights, MapSelection, MetricStore, RawMetric, ReadinessEngine,
    ReadinessError, ReadinessSession, ScoreKind, SubIndex, WeightSet,
};
use std::path::PathBuf;

fn engine() -> ReadinessEngine {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_tracts.csv");
    ReadinessEngine::new(MetricStore::load(path).expect("fixture loads"))
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn default_weights_score_each_tract() {
    let scores = engine().tract_scores(&WeightSet::default());

    assert_eq!(scores.len(), 6);
    assert!(close(scores["37183052101"], 76.2));
    assert!(close(scores["37095950100"], 24.2));
    assert!(scores.values().all(|score| (0.0..=100.0).contains(score)));
}

#[test]
fn single_component_weights_reproduce_that_sub_index() {
    let engine = engine();
    let weights = WeightSet::new(1.0, 0.0, 0.0).expect("valid");
    let scores = engine.tract_scores(&weights);

    for unit in engine.store().units() {
        assert!(close(
            scores[&unit.geoid],
            unit.sub_index(SubIndex::PhysicalInfrastructure) * 100.0
        ));
    }
}

#[test]
fn county_aggregates_are_means_of_their_tracts() {
    let counties = engine().county_aggregates(&WeightSet::default());

    assert_eq!(
        counties.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Durham", "Hyde", "Wake"]
    );
    let hyde = &counties["Hyde"];
    assert_eq!(hyde.tract_count, 3);
    assert!(close(hyde.sub_indices.get(SubIndex::PhysicalInfrastructure), 0.4));
    assert!(close(hyde.readiness_score, 33.4));
    assert!(close(hyde.metrics.get(RawMetric::AgeSixtyFivePlus), 0.29));
}

#[test]
fn state_average_weights_every_county_equally() {
    let engine = engine();
    let counties = engine.county_aggregates(&WeightSet::default());
    let state = engine.state_aggregate(&counties).expect("non-empty");

    assert_eq!(state.county_count, 3);
    // Mean of county means (0.9, 0.6, 0.4), not the tract mean of 0.6.
    assert!(close(
        state.sub_indices.get(SubIndex::PhysicalInfrastructure),
        1.9 / 3.0
    ));
    assert!(close(state.readiness_score, (74.9 + 63.8 + 33.4) / 3.0));
}

#[test]
fn weight_changes_are_reflected_without_reloading() {
    let engine = engine();
    let mut session = ReadinessSession::default();
    let before = engine.county_aggregates(session.weights())["Durham"].readiness_score;

    session
        .submit_weights(Some(0.0), Some(1.0), Some(0.0))
        .expect("valid triple");
    let after = engine.county_aggregates(session.weights())["Durham"].readiness_score;

    assert!(close(before, 63.8));
    assert!(close(after, 90.0));
}

#[test]
fn rejected_weights_leave_scores_unchanged() {
    let mut session = ReadinessSession::default();
    let error = session
        .submit_weights(Some(0.5), Some(0.3), Some(0.1))
        .expect_err("sum is 0.9");

    assert!(matches!(error, InvalidWeights::Sum { .. }));
    assert_eq!(
        error.to_string(),
        "the sum of weights must equal 1 (got 0.900000)"
    );
    assert_eq!(session.weights(), &WeightSet::default());
}

#[test]
fn comparison_classifies_and_names_leaders() {
    let result = engine()
        .compare_areas("Wake", "Durham", &WeightSet::default())
        .expect("both counties exist");

    assert_eq!(
        result.baseline.classification.physical,
        InfrastructureTier::Strong
    );
    assert_eq!(
        result.baseline.classification.digital,
        InfrastructureTier::Moderate
    );
    assert_eq!(
        result.baseline.classification.vulnerability,
        VulnerabilityTier::Higher
    );
    assert_eq!(result.compare.classification.digital_label, "strong");
    assert_eq!(
        result.compare.classification.vulnerability,
        VulnerabilityTier::Lower
    );

    assert_eq!(result.leaders.physical, "Wake");
    assert_eq!(result.leaders.digital, "Durham");
    assert_eq!(result.leaders.vulnerability, "Wake");
    assert_eq!(result.baseline.summary_values().len(), 3);
    assert_eq!(result.baseline.detail_values().len(), 8);
}

#[test]
fn state_level_compares_against_the_state_average() {
    let result = engine()
        .compare_areas("Hyde", "state level", &WeightSet::default())
        .expect("state resolves");

    assert_eq!(result.compare.label, "State Average");
    assert_eq!(result.baseline.classification.digital_label, "underperforming");

    let insights = result.insights();
    assert!(insights
        .baseline
        .iter()
        .any(|line| line.contains("improvements in road infrastructure are needed in Hyde")));
    assert!(insights.comparison[0].contains("State Average is stronger"));
}

#[test]
fn no_vehicle_share_is_shown_raw_on_both_sides() {
    let result = engine()
        .compare_areas("Wake", "Durham", &WeightSet::default())
        .expect("both counties exist");
    let no_vehicle = |profile: &av_readiness::readiness::compare::AreaProfile| {
        profile
            .detail
            .iter()
            .find(|entry| entry.metric == RawMetric::NoVehicle)
            .map(|entry| entry.percent)
            .expect("no-vehicle entry on the radar")
    };

    assert!(close(no_vehicle(&result.baseline), 6.0));
    assert!(close(no_vehicle(&result.compare), 12.0));
}

#[test]
fn unknown_counties_are_reported() {
    let error = engine()
        .compare_areas("Wake", "Gotham", &WeightSet::default())
        .expect_err("no such county");
    assert_eq!(error, ReadinessError::AreaNotFound("Gotham".to_string()));
}

#[test]
fn map_layers_cover_every_granularity_and_score() {
    let engine = engine();
    for granularity in Granularity::ordered() {
        for score in ScoreKind::ordered() {
            let selection = MapSelection::new(granularity, score);
            let layer = engine.map_layer(selection, &WeightSet::default());
            let expected = match granularity {
                Granularity::Tract => 6,
                Granularity::County => 3,
            };
            assert_eq!(layer.features.len(), expected);
            assert_eq!(layer.key_column, granularity.key_column());
            assert!(layer
                .features
                .iter()
                .all(|feature| (0.0..=100.0).contains(&feature.percent)));
        }
    }
}

#[test]
fn focus_readout_uses_the_county_aggregate() {
    let readout = engine()
        .focus_readout("Wake", ScoreKind::OverallReadiness, &WeightSet::default())
        .expect("county exists");

    assert!(close(readout.percent, 74.9));
    assert_eq!(readout.message, "Overall Readiness score for Wake is 74.90%");
}

#[test]
fn county_metrics_report_every_input_for_the_county() {
    let engine = engine();
    let panel = engine
        .county_metrics("Hyde", &WeightSet::default())
        .expect("county exists");

    assert_eq!(panel.tract_count, 3);
    assert!(close(panel.readiness_score, 33.4));
    assert!(close(
        panel.sub_index_percent(SubIndex::PhysicalInfrastructure),
        40.0
    ));
    assert!(close(panel.sub_index_percent(SubIndex::SocialVulnerability), 4.0));
    assert_eq!(panel.metrics.len(), 9);
    assert!(close(panel.metric_percent(RawMetric::AgeSixtyFivePlus), 29.0));
    assert!(close(panel.metric_percent(RawMetric::NoVehicle), 10.0));
    assert!(close(panel.paved_percent, 100.0 - 148.0 / 3.0));

    let error = engine
        .county_metrics("Gotham", &WeightSet::default())
        .expect_err("no such county");
    assert_eq!(error, ReadinessError::AreaNotFound("Gotham".to_string()));
}

#[test]
fn refresh_keeps_the_same_rows() {
    let mut engine = engine();
    let before = engine.county_list();
    engine.refresh().expect("refresh succeeds");
    assert_eq!(engine.county_list(), before);
}

#[test]
fn scoring_county_means_matches_the_mean_tract_score() {
    let weights = WeightSet::new(0.25, 0.45, 0.3).expect("valid");
    for aggregate in engine().county_aggregates(&weights).values() {
        let rescored = composite(&aggregate.sub_indices, &weights);
        assert!(close(rescored, aggregate.readiness_score));
    }
}

#[test]
fn state_average_ignores_tract_counts() {
    let engine = engine();
    let mut units = engine.store().units().to_vec();
    let copies: Vec<_> = units
        .iter()
        .filter(|unit| unit.county == "Hyde")
        .map(|unit| {
            let mut copy = unit.clone();
            copy.geoid.push_str("99");
            copy
        })
        .collect();
    units.extend(copies);
    let padded = ReadinessEngine::new(MetricStore::from_units(units).expect("unique geoids"));

    let weights = WeightSet::default();
    let original = engine
        .state_aggregate(&engine.county_aggregates(&weights))
        .expect("state");
    let with_more_tracts = padded
        .state_aggregate(&padded.county_aggregates(&weights))
        .expect("state");

    assert!(close(original.readiness_score, with_more_tracts.readiness_score));
    assert_eq!(with_more_tracts.county_count, 3);
}
