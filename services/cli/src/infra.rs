use crate::cli::SharedArgs;
use av_readiness::config::AppConfig;
use av_readiness::ingest::LoadError;
use av_readiness::readiness::{
    Granularity, InvalidWeights, MetricStore, ReadinessEngine, ReadinessSession, WeightSet,
};
use std::path::Path;

/// Weights from the command line win over the configured set. Flags that are
/// left out count as zero, the same as an empty field in a weight form.
pub(crate) fn resolve_weights(
    config: &AppConfig,
    args: &SharedArgs,
) -> Result<WeightSet, InvalidWeights> {
    let mut session = ReadinessSession::new(config.weights);
    if args.pi.is_none() && args.di.is_none() && args.svi.is_none() {
        return Ok(*session.weights());
    }
    session.submit_weights(args.pi, args.di, args.svi)
}

pub(crate) fn load_engine(path: &Path) -> Result<ReadinessEngine, LoadError> {
    MetricStore::load(path).map(ReadinessEngine::new)
}

pub(crate) fn parse_granularity(raw: &str) -> Result<Granularity, String> {
    Granularity::parse(raw).ok_or_else(|| format!("expected 'tract' or 'county', got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_readiness::config::{AppEnvironment, DataConfig, TelemetryConfig};
    use std::path::PathBuf;

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            data: DataConfig {
                path: PathBuf::from("unused.csv"),
            },
            weights: WeightSet::new(0.5, 0.25, 0.25).expect("valid"),
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
                ansi: false,
            },
        }
    }

    #[test]
    fn configured_weights_apply_without_flags() {
        let weights = resolve_weights(&config(), &SharedArgs::default()).expect("valid");
        assert_eq!(weights.pi(), 0.5);
    }

    #[test]
    fn partial_flags_count_missing_components_as_zero() {
        let args = SharedArgs {
            pi: Some(0.7),
            di: Some(0.3),
            ..SharedArgs::default()
        };
        let weights = resolve_weights(&config(), &args).expect("sums to one");
        assert_eq!(weights.svi(), 0.0);

        let args = SharedArgs {
            pi: Some(0.7),
            ..SharedArgs::default()
        };
        assert!(matches!(
            resolve_weights(&config(), &args),
            Err(InvalidWeights::Sum { .. })
        ));
    }

    #[test]
    fn granularity_errors_name_the_input() {
        assert_eq!(parse_granularity("County"), Ok(Granularity::County));
        assert!(parse_granularity("block")
            .expect_err("unknown")
            .contains("'block'"));
    }
}
