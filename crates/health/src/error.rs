use configuration::error::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("Scoring policy is invalid: {0}")]
    InvalidPolicy(#[from] ConfigError),
}
