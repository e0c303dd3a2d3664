use super::domain::SubIndex;
use thiserror::Error;

/// Rejection of a submitted weight triple. The caller keeps its prior weights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidWeights {
    #[error("the sum of weights must equal 1 (got {sum:.6})")]
    Sum { sum: f64 },
    #[error("{component} weight must be a finite, non-negative number (got {value})")]
    Component { component: SubIndex, value: f64 },
}

/// Failures of engine queries over the loaded metric table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadinessError {
    #[error(transparent)]
    InvalidWeights(#[from] InvalidWeights),
    #[error("no county named '{0}' in the loaded dataset")]
    AreaNotFound(String),
    #[error("aggregation requested over an empty set of areal units")]
    EmptyAreaSet,
}
