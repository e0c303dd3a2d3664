use crate::readiness::{InvalidWeights, WeightSet};
use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/NC_data.geojson";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub data: DataConfig,
    pub weights: WeightSet,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let path = env::var("AV_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));

        let weights = match env::var("AV_WEIGHTS") {
            Ok(value) if !value.trim().is_empty() => parse_weights(&value)?,
            _ => WeightSet::default(),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            data: DataConfig { path },
            weights,
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
        })
    }
}

/// Location of the metric table.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colored output, only honored when stderr is a terminal.
    pub ansi: bool,
}

/// Parses `"pi,di,svi"` into a validated weight set.
pub fn parse_weights(value: &str) -> Result<WeightSet, ConfigError> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConfigError::MalformedWeights(value.to_string()))?;

    match parts.as_slice() {
        [pi, di, svi] => WeightSet::validate(Some(*pi), Some(*di), Some(*svi))
            .map_err(|source| ConfigError::InvalidWeights { source }),
        _ => Err(ConfigError::MalformedWeights(value.to_string())),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MalformedWeights(String),
    InvalidWeights { source: InvalidWeights },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MalformedWeights(value) => write!(
                f,
                "AV_WEIGHTS must be three comma-separated numbers, got '{}'",
                value
            ),
            ConfigError::InvalidWeights { source } => {
                write!(f, "AV_WEIGHTS is not a usable weight set: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::MalformedWeights(_) => None,
            ConfigError::InvalidWeights { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("AV_DATA_PATH");
        env::remove_var("AV_WEIGHTS");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.data.path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.weights, WeightSet::default());
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.ansi);
    }

    #[test]
    fn env_overrides_are_applied() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("AV_DATA_PATH", "fixtures/tracts.csv");
        env::set_var("AV_WEIGHTS", "0.2, 0.5, 0.3");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.data.path, PathBuf::from("fixtures/tracts.csv"));
        assert_eq!(config.weights.di(), 0.5);
        assert!(!config.telemetry.ansi);
    }

    #[test]
    fn rejects_weights_that_do_not_sum_to_one() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AV_WEIGHTS", "0.5,0.5,0.5");
        let error = AppConfig::load().expect_err("sum is 1.5");
        reset_env();

        assert!(matches!(error, ConfigError::InvalidWeights { .. }));
    }

    #[test]
    fn malformed_weight_lists_are_reported() {
        assert!(matches!(
            parse_weights("0.6;0.3;0.1"),
            Err(ConfigError::MalformedWeights(_))
        ));
        assert!(matches!(
            parse_weights("0.5,0.5"),
            Err(ConfigError::MalformedWeights(_))
        ));
    }
}
