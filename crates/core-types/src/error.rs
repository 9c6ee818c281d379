use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

impl CoreError {
    pub(crate) fn invalid(kind: &str, value: &str) -> Self {
        CoreError::InvalidInput(kind.to_string(), value.to_string())
    }
}
