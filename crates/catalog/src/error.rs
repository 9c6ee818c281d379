use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Detector '{0}' is not in the catalog")]
    DetectorNotFound(String),

    #[error("Detector id '{0}' is registered more than once")]
    DuplicateDetector(String),

    #[error("Detector id '{0}' is not UPPER_SNAKE_CASE")]
    MalformedId(String),

    #[error("Preset '{preset}' references unknown detector '{detector}'")]
    UnknownPresetMember { preset: String, detector: String },

    #[error("Preset '{0}' is registered more than once")]
    DuplicatePreset(String),

    #[error("Style '{style}' references unknown detector '{detector}'")]
    UnknownStyleMember { style: String, detector: String },

    #[error("Regime table references unknown detector '{0}'")]
    UnknownRegimeMember(String),

    #[error("Alias '{alias}' targets unknown detector '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Alias '{alias}' shadows catalog id '{shadowed}' but targets '{target}'")]
    ShadowingAlias {
        alias: String,
        shadowed: String,
        target: String,
    },
}
