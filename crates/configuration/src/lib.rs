use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod scoring_config;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use scoring_config::{
    BalanceTarget, CoveragePolicy, DiversityPolicy, ImplementationPolicy, RiskPolicy,
    ScoringPolicy, SynergyPolicy, TimeframePolicy, Weights,
};
pub use settings::{Config, LogFormat, LoggingSettings, ValidationPolicy};

/// Prefix for environment overrides, e.g. `STRATAGEM__VALIDATION__MAX_DETECTORS=8`.
pub const ENV_PREFIX: &str = "STRATAGEM";

/// Loads the application configuration.
///
/// Reads `path` when given (it must exist), otherwise an optional `stratagem.toml` in
/// the working directory, then layers `STRATAGEM__*` environment variables on top.
/// The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("stratagem").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let file = write_toml(
            r#"
            [validation]
            max_detectors = 9

            [scoring.weights]
            coverage = 0.40
            balance = 0.10
            synergy = 0.10
            risk = 0.10
            implementation = 0.10
            diversity = 0.10
            timeframe = 0.10
            "#,
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.validation.max_detectors, 9);
        assert_eq!(config.validation.min_detectors, 3);
        assert_eq!(config.scoring.weights.coverage, dec!(0.40));
        assert_eq!(config.scoring.synergy.conflict_penalty, dec!(15));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let file = write_toml(
            r#"
            [validation]
            min_detectors = 8
            max_detectors = 4
            "#,
        );
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/stratagem.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }
}
