use super::domain::SubIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Areal resolution of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Tract,
    County,
}

impl Granularity {
    pub const fn ordered() -> [Self; 2] {
        [Self::Tract, Self::County]
    }

    pub fn parse(selector: &str) -> Option<Self> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "tract" => Some(Self::Tract),
            "county" => Some(Self::County),
            _ => None,
        }
    }

    pub const fn selector(self) -> &'static str {
        match self {
            Self::Tract => "tract",
            Self::County => "county",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tract => "Census Tract Level",
            Self::County => "County Level",
        }
    }

    /// Column that identifies a map feature at this granularity.
    pub const fn key_column(self) -> &'static str {
        match self {
            Self::Tract => "GEOID",
            Self::County => "COUNTY",
        }
    }
}

/// Score drawn on the map or reported for a focused county.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    #[default]
    OverallReadiness,
    PhysicalInfrastructure,
    DigitalInfrastructure,
    SocialVulnerability,
}

impl ScoreKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::OverallReadiness,
            Self::PhysicalInfrastructure,
            Self::DigitalInfrastructure,
            Self::SocialVulnerability,
        ]
    }

    /// Strict parse of a dashboard selector (`readiness_score`, `S_PI`, ...).
    pub fn parse(selector: &str) -> Option<Self> {
        match selector.trim() {
            "readiness_score" => Some(Self::OverallReadiness),
            "S_PI" => Some(Self::PhysicalInfrastructure),
            "S_DI" => Some(Self::DigitalInfrastructure),
            "S_SVI" => Some(Self::SocialVulnerability),
            _ => None,
        }
    }

    /// Fallback policy: any selector that is not recognized shows overall
    /// readiness rather than failing the request.
    pub fn from_selector_or_overall(selector: &str) -> Self {
        Self::parse(selector).unwrap_or(Self::OverallReadiness)
    }

    pub const fn selector(self) -> &'static str {
        match self {
            Self::OverallReadiness => "readiness_score",
            Self::PhysicalInfrastructure => "S_PI",
            Self::DigitalInfrastructure => "S_DI",
            Self::SocialVulnerability => "S_SVI",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OverallReadiness => "Overall Readiness",
            Self::PhysicalInfrastructure => "Physical Infrastructure",
            Self::DigitalInfrastructure => "Digital Infrastructure",
            Self::SocialVulnerability => "Social Vulnerability Index",
        }
    }

    /// `None` for the composite score.
    pub const fn sub_index(self) -> Option<SubIndex> {
        match self {
            Self::OverallReadiness => None,
            Self::PhysicalInfrastructure => Some(SubIndex::PhysicalInfrastructure),
            Self::DigitalInfrastructure => Some(SubIndex::DigitalInfrastructure),
            Self::SocialVulnerability => Some(SubIndex::SocialVulnerability),
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Granularity and score chosen for one map render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapSelection {
    pub granularity: Granularity,
    pub score: ScoreKind,
}

impl MapSelection {
    pub const fn new(granularity: Granularity, score: ScoreKind) -> Self {
        Self { granularity, score }
    }

    /// Name of the column the renderer colors by.
    pub const fn column(self) -> &'static str {
        match (self.granularity, self.score) {
            (Granularity::Tract, ScoreKind::OverallReadiness) => "readiness_score",
            (Granularity::Tract, ScoreKind::PhysicalInfrastructure) => "S_PI",
            (Granularity::Tract, ScoreKind::DigitalInfrastructure) => "S_DI",
            (Granularity::Tract, ScoreKind::SocialVulnerability) => "S_SVI",
            (Granularity::County, ScoreKind::OverallReadiness) => "county_readiness_score",
            (Granularity::County, ScoreKind::PhysicalInfrastructure) => "county_SPI",
            (Granularity::County, ScoreKind::DigitalInfrastructure) => "county_SDI",
            (Granularity::County, ScoreKind::SocialVulnerability) => "county_SVI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_selection_resolves_to_a_distinct_column() {
        let mut columns = Vec::new();
        for granularity in Granularity::ordered() {
            for score in ScoreKind::ordered() {
                columns.push(MapSelection::new(granularity, score).column());
            }
        }
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), 8);
    }

    #[test]
    fn tract_columns_match_selectors() {
        for score in ScoreKind::ordered() {
            assert_eq!(
                MapSelection::new(Granularity::Tract, score).column(),
                score.selector()
            );
        }
        assert_eq!(
            MapSelection::new(Granularity::County, ScoreKind::SocialVulnerability).column(),
            "county_SVI"
        );
    }

    #[test]
    fn unknown_selector_falls_back_to_overall_readiness() {
        assert_eq!(ScoreKind::parse("S_XYZ"), None);
        assert_eq!(
            ScoreKind::from_selector_or_overall("S_XYZ"),
            ScoreKind::OverallReadiness
        );
        assert_eq!(
            ScoreKind::from_selector_or_overall("S_DI"),
            ScoreKind::DigitalInfrastructure
        );
    }

    #[test]
    fn granularity_parse_is_case_insensitive() {
        assert_eq!(Granularity::parse(" County "), Some(Granularity::County));
        assert_eq!(Granularity::parse("block"), None);
    }
}
