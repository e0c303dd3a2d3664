use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier used to present [0,1] fractions as percentages.
pub const PERCENT: f64 = 100.0;

/// The three normalized components of the composite readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubIndex {
    PhysicalInfrastructure,
    DigitalInfrastructure,
    SocialVulnerability,
}

impl SubIndex {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::PhysicalInfrastructure,
            Self::DigitalInfrastructure,
            Self::SocialVulnerability,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PhysicalInfrastructure => "Physical Infrastructure",
            Self::DigitalInfrastructure => "Digital Infrastructure",
            Self::SocialVulnerability => "Social Vulnerability Index",
        }
    }

    /// Column holding the tract-level value in the input data.
    pub const fn column(self) -> &'static str {
        match self {
            Self::PhysicalInfrastructure => "S_PI",
            Self::DigitalInfrastructure => "S_DI",
            Self::SocialVulnerability => "S_SVI",
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Self::PhysicalInfrastructure => "PI",
            Self::DigitalInfrastructure => "DI",
            Self::SocialVulnerability => "SVI",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::PhysicalInfrastructure => 0,
            Self::DigitalInfrastructure => 1,
            Self::SocialVulnerability => 2,
        }
    }
}

impl fmt::Display for SubIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw input metrics carried per tract, each a fraction in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawMetric {
    RoadImprovement,
    UnpavedRoads,
    Retroreflectivity,
    GoodBridges,
    NetworkLatency,
    DownloadSpeed,
    UploadSpeed,
    NoVehicle,
    AgeSixtyFivePlus,
}

impl RawMetric {
    pub const COUNT: usize = 9;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::RoadImprovement,
            Self::UnpavedRoads,
            Self::Retroreflectivity,
            Self::GoodBridges,
            Self::NetworkLatency,
            Self::DownloadSpeed,
            Self::UploadSpeed,
            Self::NoVehicle,
            Self::AgeSixtyFivePlus,
        ]
    }

    /// The eight metrics drawn on the detailed comparison radar.
    pub const fn radar_detail() -> [Self; 8] {
        [
            Self::RoadImprovement,
            Self::UnpavedRoads,
            Self::Retroreflectivity,
            Self::GoodBridges,
            Self::NetworkLatency,
            Self::DownloadSpeed,
            Self::UploadSpeed,
            Self::NoVehicle,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RoadImprovement => "Road Improvement Percentage",
            Self::UnpavedRoads => "Unpaved Road Percentage",
            Self::Retroreflectivity => "Retroreflectivity Score",
            Self::GoodBridges => "Good Bridge Percentage",
            Self::NetworkLatency => "Network Latency",
            Self::DownloadSpeed => "Download Speed",
            Self::UploadSpeed => "Upload Speed",
            Self::NoVehicle => "No Vehicle",
            Self::AgeSixtyFivePlus => "Age 65+",
        }
    }

    pub const fn column(self) -> &'static str {
        match self {
            Self::RoadImprovement => "Final_Road_Improvement_Score_Percentage",
            Self::UnpavedRoads => "unpaved_percentage",
            Self::Retroreflectivity => "RL_score_percentage",
            Self::GoodBridges => "good_bridge_percentage",
            Self::NetworkLatency => "B_latency_percent",
            Self::DownloadSpeed => "B_download_percent",
            Self::UploadSpeed => "B_upload_percent",
            Self::NoVehicle => "EP_NOVEH",
            Self::AgeSixtyFivePlus => "EP_AGE65",
        }
    }

    /// Sub-index this metric feeds into.
    pub const fn sub_index(self) -> SubIndex {
        match self {
            Self::RoadImprovement
            | Self::UnpavedRoads
            | Self::Retroreflectivity
            | Self::GoodBridges => SubIndex::PhysicalInfrastructure,
            Self::NetworkLatency | Self::DownloadSpeed | Self::UploadSpeed => {
                SubIndex::DigitalInfrastructure
            }
            Self::NoVehicle | Self::AgeSixtyFivePlus => SubIndex::SocialVulnerability,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::RoadImprovement => 0,
            Self::UnpavedRoads => 1,
            Self::Retroreflectivity => 2,
            Self::GoodBridges => 3,
            Self::NetworkLatency => 4,
            Self::DownloadSpeed => 5,
            Self::UploadSpeed => 6,
            Self::NoVehicle => 7,
            Self::AgeSixtyFivePlus => 8,
        }
    }
}

impl fmt::Display for RawMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sub-index values for one area, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubIndexScores([f64; 3]);

impl SubIndexScores {
    pub fn new(physical: f64, digital: f64, social: f64) -> Self {
        Self([physical, digital, social])
    }

    pub fn get(&self, index: SubIndex) -> f64 {
        self.0[index.slot()]
    }

    pub fn set(&mut self, index: SubIndex, value: f64) {
        self.0[index.slot()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubIndex, f64)> + '_ {
        SubIndex::ordered()
            .into_iter()
            .map(move |index| (index, self.get(index)))
    }
}

/// Raw metric values for one area, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMetrics([f64; RawMetric::COUNT]);

impl RawMetrics {
    pub fn get(&self, metric: RawMetric) -> f64 {
        self.0[metric.slot()]
    }

    pub fn set(&mut self, metric: RawMetric, value: f64) {
        self.0[metric.slot()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (RawMetric, f64)> + '_ {
        RawMetric::ordered()
            .into_iter()
            .map(move |metric| (metric, self.get(metric)))
    }
}

impl FromIterator<(RawMetric, f64)> for RawMetrics {
    fn from_iter<I: IntoIterator<Item = (RawMetric, f64)>>(iter: I) -> Self {
        let mut metrics = Self::default();
        for (metric, value) in iter {
            metrics.set(metric, value);
        }
        metrics
    }
}

/// One census tract row of the metric table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaUnit {
    pub geoid: String,
    pub county: String,
    pub sub_indices: SubIndexScores,
    pub metrics: RawMetrics,
}

impl AreaUnit {
    pub fn sub_index(&self, index: SubIndex) -> f64 {
        self.sub_indices.get(index)
    }

    pub fn metric(&self, metric: RawMetric) -> f64 {
        self.metrics.get(metric)
    }
}
