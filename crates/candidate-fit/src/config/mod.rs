use std::env;
use std::fmt;

use crate::scoring::{ScoringConfig, ScoringOverrides, DEFAULT_CALIBRATION_VERSION};

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for batch drivers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scoring: ScoringSettings,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("FIT_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let overrides = ScoringOverrides {
            current_year: parse_var("FIT_CURRENT_YEAR")?,
            must_have_cap_score: parse_var("FIT_MUST_HAVE_CAP")?,
            exclude_on_missing_must_have: parse_flag("FIT_EXCLUDE_ON_MISSING_MUST_HAVE")?,
            exclude_on_hard_filter_fail: parse_flag("FIT_EXCLUDE_ON_HARD_FILTER_FAIL")?,
        };

        if let Some(cap) = overrides.must_have_cap_score {
            if !(0.0..=1.0).contains(&cap) {
                return Err(ConfigError::OutOfRange {
                    key: "FIT_MUST_HAVE_CAP",
                    value: cap.to_string(),
                });
            }
        }

        let calibration_version = env::var("FIT_CALIBRATION_VERSION")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CALIBRATION_VERSION.to_string());

        let log_level = env::var("FIT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            scoring: ScoringSettings {
                overrides,
                calibration_version,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Scoring policy taken from the environment, merged onto engine defaults on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSettings {
    pub overrides: ScoringOverrides,
    pub calibration_version: String,
}

impl ScoringSettings {
    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig::default().with_overrides(&self.overrides)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
    OutOfRange { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "{key} has an unparseable value '{value}'")
            }
            ConfigError::OutOfRange { key, value } => {
                write!(f, "{key} must be within [0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn parse_var<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        _ => Ok(None),
    }
}

fn parse_flag(key: &'static str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Some(true)),
                "0" | "false" | "no" | "off" => Ok(Some(false)),
                _ => Err(ConfigError::Invalid { key, value: raw }),
            }
        }
        _ => Ok(None),
    }
}
