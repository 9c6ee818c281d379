use crate::error::ConfigError;
use crate::scoring_config::ScoringPolicy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the TOML file; omitted sections fall back to the
/// documented policy defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validation: ValidationPolicy,
    pub scoring: ScoringPolicy,
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks cross-field invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validation.validate()?;
        self.scoring.validate()?;
        Ok(())
    }
}

/// Hard structural rules a strategy must satisfy to be accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Fewest resolved detectors a strategy may carry (inclusive).
    pub min_detectors: usize,
    /// Most resolved detectors a strategy may carry (inclusive). Bounds the
    /// pairwise work done downstream.
    pub max_detectors: usize,
    /// Ids that must be present verbatim. Catalog entries flagged `required` are
    /// enforced in addition to these.
    pub required_ids: Vec<String>,
    /// Upper bound accepted for a strategy's `min_rr` setting.
    pub max_min_rr: Decimal,
    /// Upper bound accepted for a strategy's `min_score` setting.
    pub max_min_score: Decimal,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_detectors: 3,
            max_detectors: 7,
            required_ids: vec!["GATE_REGIME".to_string()],
            max_min_rr: dec!(50),
            max_min_score: dec!(100),
        }
    }
}

impl ValidationPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_detectors == 0 {
            return Err(ConfigError::ValidationError(
                "validation.min_detectors must be at least 1".to_string(),
            ));
        }
        if self.min_detectors > self.max_detectors {
            return Err(ConfigError::ValidationError(format!(
                "validation.min_detectors ({}) exceeds validation.max_detectors ({})",
                self.min_detectors, self.max_detectors
            )));
        }
        if self.max_min_rr <= Decimal::ZERO || self.max_min_score <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "validation.max_min_rr and validation.max_min_score must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where and how log output is written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs go to a daily-rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            directory: None,
            file_prefix: "stratagem.log".to_string(),
        }
    }
}
