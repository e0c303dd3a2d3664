use super::error::InvalidWeights;
use super::weights::WeightSet;
use tracing::{info, warn};

/// Per-caller weight configuration.
///
/// Each dashboard session owns one of these; scoring calls take the current
/// weights explicitly instead of reading shared state.
#[derive(Debug, Clone, Default)]
pub struct ReadinessSession {
    weights: WeightSet,
}

impl ReadinessSession {
    pub fn new(weights: WeightSet) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightSet {
        &self.weights
    }

    /// Replaces the session weights only when the triple validates; a
    /// rejected submission leaves the previous weights in place.
    pub fn submit_weights(
        &mut self,
        pi: Option<f64>,
        di: Option<f64>,
        svi: Option<f64>,
    ) -> Result<WeightSet, InvalidWeights> {
        match WeightSet::validate(pi, di, svi) {
            Ok(weights) => {
                if weights != self.weights {
                    info!(
                        pi = weights.pi(),
                        di = weights.di(),
                        svi = weights.svi(),
                        "updated readiness weights"
                    );
                }
                self.weights = weights;
                Ok(weights)
            }
            Err(err) => {
                warn!(?pi, ?di, ?svi, error = %err, "rejected readiness weights");
                Err(err)
            }
        }
    }
}
