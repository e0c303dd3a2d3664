use super::classify::InfrastructureTier;
use super::views::{AreaProfile, ComparisonInsights, ComparisonResult};
use crate::readiness::domain::{RawMetric, SubIndex};

pub(crate) fn generate_insights(result: &ComparisonResult) -> ComparisonInsights {
    ComparisonInsights {
        baseline: area_observations(&result.baseline),
        compare: area_observations(&result.compare),
        comparison: comparison_observations(result),
    }
}

fn area_observations(profile: &AreaProfile) -> Vec<String> {
    let mut observations = Vec::new();
    let name = profile.label.as_str();

    for (index, tier) in [
        (
            SubIndex::PhysicalInfrastructure,
            profile.classification.physical,
        ),
        (
            SubIndex::DigitalInfrastructure,
            profile.classification.digital,
        ),
    ] {
        let percent = profile.summary_percent(index);
        observations.push(format!(
            "The {} at {name} is {}, with a score of {percent:.2}%. {}",
            index.label().to_ascii_lowercase(),
            tier.label(index),
            tier.remark(index)
        ));

        if tier != InfrastructureTier::Strong {
            observations.push(discuss_inputs(profile, index));
        }
    }

    observations.push(format!(
        "The social vulnerability index (SVI) in {name} is {:.2}%, indicating {} in terms of transportation access.",
        profile.summary_percent(SubIndex::SocialVulnerability),
        profile.classification.vulnerability_label
    ));

    observations
}

fn discuss_inputs(profile: &AreaProfile, index: SubIndex) -> String {
    let name = profile.label.as_str();
    match index {
        SubIndex::PhysicalInfrastructure => format!(
            "The road improvement score is {:.2}%, the unpaved road percentage is {:.2}%, the retroreflectivity score is {:.2}%, and the good bridge percentage is {:.2}%. To ensure safe and efficient operation of AV shuttles, improvements in road infrastructure are needed in {name}.",
            profile.metric_percent(RawMetric::RoadImprovement),
            profile.metric_percent(RawMetric::UnpavedRoads),
            profile.metric_percent(RawMetric::Retroreflectivity),
            profile.metric_percent(RawMetric::GoodBridges),
        ),
        SubIndex::DigitalInfrastructure => format!(
            "The network latency score is {:.2}%, the download speed is {:.2}%, and the upload speed is {:.2}% compared to the standard needed for the safe operation of AV shuttles. A general network improvement will be needed to get {name} ready for AV or shuttle deployment.",
            profile.metric_percent(RawMetric::NetworkLatency),
            profile.metric_percent(RawMetric::DownloadSpeed),
            profile.metric_percent(RawMetric::UploadSpeed),
        ),
        SubIndex::SocialVulnerability => format!(
            "{:.2}% of households in {name} have no vehicle and {:.2}% of residents are aged 65 or older.",
            profile.metric_percent(RawMetric::NoVehicle),
            profile.metric_percent(RawMetric::AgeSixtyFivePlus),
        ),
    }
}

fn comparison_observations(result: &ComparisonResult) -> Vec<String> {
    let baseline = &result.baseline;
    let compare = &result.compare;
    let physical = SubIndex::PhysicalInfrastructure;
    let digital = SubIndex::DigitalInfrastructure;
    let social = SubIndex::SocialVulnerability;

    vec![
        format!(
            "Physical infrastructure scores are {:.2}% for {} and {:.2}% for {}. {} is stronger in terms of physical infrastructure.",
            baseline.summary_percent(physical),
            baseline.label,
            compare.summary_percent(physical),
            compare.label,
            result.leaders.physical
        ),
        format!(
            "In terms of digital infrastructure, {} has a score of {:.2}%, while {} has {:.2}%. {} leads in digital readiness.",
            baseline.label,
            baseline.summary_percent(digital),
            compare.label,
            compare.summary_percent(digital),
            result.leaders.digital
        ),
        format!(
            "For social vulnerability, {} has an SVI of {:.2}%, while {} has an SVI of {:.2}%, indicating {} has a higher share of vulnerable populations.",
            baseline.label,
            baseline.summary_percent(social),
            compare.label,
            compare.summary_percent(social),
            result.leaders.vulnerability
        ),
    ]
}
