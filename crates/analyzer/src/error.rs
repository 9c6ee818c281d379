use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),

    #[error("Synergy table error: {0}")]
    Synergy(#[from] synergy::SynergyError),

    #[error("Validator error: {0}")]
    Validator(#[from] validator::ValidatorError),

    #[error("Health scorer error: {0}")]
    Health(#[from] health::HealthError),

    #[error("Malformed strategy draft: {0}")]
    MalformedDraft(#[from] serde_json::Error),
}
