pub mod aggregate;
pub mod compare;
pub mod domain;
mod engine;
mod error;
pub mod scoring;
pub mod selection;
mod session;
mod store;
mod weights;

pub use aggregate::{CountyAggregate, CountyAggregates, StateAggregate};
pub use compare::{AreaSelector, Comparator, ComparisonInsights, ComparisonResult};
pub use domain::{AreaUnit, RawMetric, RawMetrics, SubIndex, SubIndexScores};
pub use engine::{ChoroplethLayer, CountyMetrics, FeatureValue, FocusReadout, ReadinessEngine};
pub use error::{InvalidWeights, ReadinessError};
pub use selection::{Granularity, MapSelection, ScoreKind};
pub use session::ReadinessSession;
pub use store::MetricStore;
pub use weights::{WeightSet, WEIGHT_TOLERANCE};
