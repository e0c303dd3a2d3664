use super::domain::SubIndex;
use super::error::InvalidWeights;
use serde::{Deserialize, Serialize};

/// Allowed deviation of the weight total from 1.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Validated weights for the three sub-indices.
///
/// Only obtainable through [`WeightSet::validate`] (or the defaults), so every
/// value in circulation satisfies the unit-sum invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightSet {
    pi: f64,
    di: f64,
    svi: f64,
}

impl Default for WeightSet {
    fn default() -> Self {
        Self {
            pi: 0.6,
            di: 0.3,
            svi: 0.1,
        }
    }
}

impl WeightSet {
    /// Validates a weight triple. Absent components count as zero.
    pub fn validate(
        pi: Option<f64>,
        di: Option<f64>,
        svi: Option<f64>,
    ) -> Result<Self, InvalidWeights> {
        let candidate = Self {
            pi: pi.unwrap_or(0.0),
            di: di.unwrap_or(0.0),
            svi: svi.unwrap_or(0.0),
        };

        for index in SubIndex::ordered() {
            check_component(index, candidate.weight(index))?;
        }
        check_sum(candidate.total())?;

        Ok(candidate)
    }

    pub fn new(pi: f64, di: f64, svi: f64) -> Result<Self, InvalidWeights> {
        Self::validate(Some(pi), Some(di), Some(svi))
    }

    pub fn pi(&self) -> f64 {
        self.pi
    }

    pub fn di(&self) -> f64 {
        self.di
    }

    pub fn svi(&self) -> f64 {
        self.svi
    }

    pub fn weight(&self, index: SubIndex) -> f64 {
        match index {
            SubIndex::PhysicalInfrastructure => self.pi,
            SubIndex::DigitalInfrastructure => self.di,
            SubIndex::SocialVulnerability => self.svi,
        }
    }

    /// Sum of the three weights, accumulated in [`SubIndex::ordered`] order.
    pub fn total(&self) -> f64 {
        SubIndex::ordered()
            .into_iter()
            .map(|index| self.weight(index))
            .sum()
    }
}

impl<'de> Deserialize<'de> for WeightSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawWeights {
            #[serde(default)]
            pi: Option<f64>,
            #[serde(default)]
            di: Option<f64>,
            #[serde(default)]
            svi: Option<f64>,
        }

        let raw = RawWeights::deserialize(deserializer)?;
        Self::validate(raw.pi, raw.di, raw.svi).map_err(serde::de::Error::custom)
    }
}

fn check_component(component: SubIndex, value: f64) -> Result<(), InvalidWeights> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidWeights::Component { component, value })
    }
}

fn check_sum(sum: f64) -> Result<(), InvalidWeights> {
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        Err(InvalidWeights::Sum { sum })
    } else {
        Ok(())
    }
}
