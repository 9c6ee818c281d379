//! # Stratagem Core Types
//!
//! Layer 0 crate. Defines the shared vocabulary every other crate speaks: detector
//! metadata, the closed category/severity/dimension enums, strategy drafts, and the
//! plain-data results produced by the validator, synergy engine and health scorer.
//!
//! It has no logic beyond small helpers and depends on nothing inside the workspace.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{
    CostTier, DetectorCategory, Difficulty, Dimension, HealthGrade, ImpactTier, IssueCode,
    IssueSeverity, MarketRegime, Severity, Timeframe, TradingStyle,
};
pub use error::CoreError;
pub use structs::{
    CategoryCounts, ConflictEdge, DetectorMeta, HealthScore, Preset, RecommendedSettings,
    RejectedSetting, StrategyConfig, StrategyDraft, SynergyEdge, ValidationIssue,
    ValidationResult,
};
