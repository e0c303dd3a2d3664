//! Autonomous-vehicle readiness scoring for census tracts and counties.
//!
//! The engine loads a read-only table of per-tract metrics once, scores each
//! tract from three weighted sub-indices, rolls tracts up into county and
//! state aggregates, and compares two areas for radar charts and narrative
//! insights. Presentation is left to the caller.

pub mod config;
pub mod error;
pub mod ingest;
pub mod readiness;
pub mod telemetry;
