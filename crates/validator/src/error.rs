use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("Validation policy from configuration is invalid: {0}")]
    InvalidPolicy(String),

    #[error("Required detector '{0}' is not in the catalog")]
    UnknownRequiredId(String),
}
