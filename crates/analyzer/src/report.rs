use core_types::{
    ConflictEdge, HealthScore, MarketRegime, SynergyEdge, TradingStyle, ValidationResult,
};
use serde::Serialize;
use synergy::Suggestion;

/// Everything the pipeline has to say about one strategy draft.
///
/// This is the output contract handed back to callers, serialized in camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    /// Resolved ids, deduplicated, in first-occurrence order.
    pub canonical_detectors: Vec<String>,
    /// Raw inputs that matched nothing, verbatim.
    pub unknown: Vec<String>,
    /// Whether normalization dropped or merged any requested entry.
    pub changed: bool,
    pub validation: ValidationResult,
    pub synergies: Vec<SynergyEdge>,
    pub conflicts: Vec<ConflictEdge>,
    /// The subset of `conflicts` callers should treat as strategy-blocking.
    pub blocking_conflicts: Vec<ConflictEdge>,
    pub health: HealthScore,
    pub suggestions: Vec<Suggestion>,
    pub suggested_style: Option<TradingStyle>,
    /// Tradable regimes every resolved detector suits.
    pub compatible_regimes: Vec<MarketRegime>,
}

impl StrategyReport {
    /// Structurally valid and free of blocking conflicts.
    pub fn is_acceptable(&self) -> bool {
        self.validation.ok && self.blocking_conflicts.is_empty()
    }
}
