use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Everything the health scorer needs: dimension weights plus the per-dimension
/// thresholds. Deserialized from the `[scoring]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Weights for the weighted total. Must sum to 1.0.
    pub weights: Weights,
    pub coverage: CoveragePolicy,
    pub balance: BalanceTarget,
    pub synergy: SynergyPolicy,
    pub risk: RiskPolicy,
    pub implementation: ImplementationPolicy,
    pub diversity: DiversityPolicy,
    pub timeframe: TimeframePolicy,
    /// Ceiling applied to the total of a structurally invalid strategy. Must stay below
    /// the lowest total a valid strategy can reach.
    pub invalid_total_cap: Decimal,
}

/// Weights for the scoring function.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub coverage: Decimal,
    pub balance: Decimal,
    pub synergy: Decimal,
    pub risk: Decimal,
    pub implementation: Decimal,
    pub diversity: Decimal,
    pub timeframe: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoveragePolicy {
    /// Points shared out across the required categories and required ids.
    pub requirement_points: Decimal,
    /// Points for sitting inside the advisory count band. Half is awarded when the
    /// count is only inside the hard validator bounds.
    pub band_points: Decimal,
    pub recommended_min: usize,
    pub recommended_max: usize,
    /// Deducted once per validation error.
    pub error_penalty: Decimal,
}

/// Target gate:trigger:confluence ratio. Only the proportions matter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BalanceTarget {
    pub gate: Decimal,
    pub trigger: Decimal,
    pub confluence: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynergyPolicy {
    /// Score of a selection with no synergies and no conflicts.
    pub baseline: Decimal,
    /// Multiplier applied to the net synergy points.
    pub scale: Decimal,
    /// Base penalty per conflict, multiplied by the severity's penalty weight.
    pub conflict_penalty: Decimal,
    /// Added once a selection holds a high-impact detector.
    pub high_impact_bonus: Decimal,
    /// Added on top once it holds two or more.
    pub extra_high_impact_bonus: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    /// Risk/reward assumed when a strategy does not set one.
    pub default_min_rr: Decimal,
    pub rr_floor: Decimal,
    pub rr_sweet_min: Decimal,
    pub rr_sweet_max: Decimal,
    pub rr_ceiling: Decimal,
}

/// The implementation dimension blends the runnable share of the selection with its
/// scan load. Load is the mean cost tier: light is free, medium costs half, heavy
/// costs everything.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImplementationPolicy {
    /// Fraction of the dimension given to scan load, in `0..=1`.
    pub scan_load_share: Decimal,
}

/// Points for spreading a selection over detector families. Must sum to 100.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiversityPolicy {
    /// Triggers from at least two trigger families.
    pub trigger_families: Decimal,
    /// Confluence from at least two confluence families.
    pub confluence_families: Decimal,
    /// A high-impact trigger together with a high-impact confluence detector.
    pub high_impact_pairing: Decimal,
}

/// Points for the entry/trend timeframe hierarchy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeframePolicy {
    /// Entry timeframe strictly below every trend timeframe.
    pub aligned_points: Decimal,
    /// Added when every trend timeframe is at least `wide_gap` steps above the entry.
    pub wide_gap_points: Decimal,
    pub wide_gap: u8,
    /// Score when no timeframes are configured and the scanner defaults apply.
    pub unset_points: Decimal,
}

// --- Default Implementations ---
// This allows a user to omit any part of the `[scoring]` section from their toml
// and still have it work with sensible defaults.

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            coverage: CoveragePolicy::default(),
            balance: BalanceTarget::default(),
            synergy: SynergyPolicy::default(),
            risk: RiskPolicy::default(),
            implementation: ImplementationPolicy::default(),
            diversity: DiversityPolicy::default(),
            timeframe: TimeframePolicy::default(),
            invalid_total_cap: dec!(25),
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            coverage: dec!(0.30),
            balance: dec!(0.10),
            synergy: dec!(0.15),
            risk: dec!(0.10),
            implementation: dec!(0.15),
            diversity: dec!(0.10),
            timeframe: dec!(0.10),
        }
    }
}

impl Default for CoveragePolicy {
    fn default() -> Self {
        Self {
            requirement_points: dec!(80),
            band_points: dec!(20),
            recommended_min: 3,
            recommended_max: 5,
            error_penalty: dec!(15),
        }
    }
}

impl Default for BalanceTarget {
    fn default() -> Self {
        Self {
            gate: dec!(1),
            trigger: dec!(2),
            confluence: dec!(2),
        }
    }
}

impl Default for SynergyPolicy {
    fn default() -> Self {
        Self {
            baseline: dec!(50),
            scale: dec!(0.5),
            conflict_penalty: dec!(15),
            high_impact_bonus: dec!(10),
            extra_high_impact_bonus: dec!(15),
        }
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            default_min_rr: dec!(2.0),
            rr_floor: dec!(1.0),
            rr_sweet_min: dec!(2.0),
            rr_sweet_max: dec!(4.0),
            rr_ceiling: dec!(10.0),
        }
    }
}

impl Default for ImplementationPolicy {
    fn default() -> Self {
        Self {
            scan_load_share: dec!(0.2),
        }
    }
}

impl Default for DiversityPolicy {
    fn default() -> Self {
        Self {
            trigger_families: dec!(40),
            confluence_families: dec!(30),
            high_impact_pairing: dec!(30),
        }
    }
}

impl Default for TimeframePolicy {
    fn default() -> Self {
        Self {
            aligned_points: dec!(67),
            wide_gap_points: dec!(33),
            wide_gap: 2,
            unset_points: dec!(67),
        }
    }
}

impl Weights {
    pub fn sum(&self) -> Decimal {
        self.all().iter().sum()
    }

    fn all(&self) -> [Decimal; 7] {
        [
            self.coverage,
            self.balance,
            self.synergy,
            self.risk,
            self.implementation,
            self.diversity,
            self.timeframe,
        ]
    }
}

impl ScoringPolicy {
    /// The lowest total any structurally valid strategy can reach: full requirement
    /// points plus at least half the band points, weighted by coverage.
    pub fn valid_total_floor(&self) -> Decimal {
        let coverage_floor =
            (self.coverage.requirement_points + self.coverage.band_points / dec!(2)).min(dec!(100));
        coverage_floor * self.weights.coverage
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));

        if self.weights.all().iter().any(|w| w.is_sign_negative()) {
            return invalid("scoring.weights must be non-negative".to_string());
        }
        if self.weights.sum() != Decimal::ONE {
            return invalid(format!(
                "scoring.weights must sum to 1.0, got {}",
                self.weights.sum()
            ));
        }
        if self.coverage.recommended_min > self.coverage.recommended_max {
            return invalid(format!(
                "scoring.coverage.recommended_min ({}) exceeds recommended_max ({})",
                self.coverage.recommended_min, self.coverage.recommended_max
            ));
        }
        if self.coverage.requirement_points + self.coverage.band_points != dec!(100) {
            return invalid(
                "scoring.coverage.requirement_points + band_points must equal 100".to_string(),
            );
        }
        if self.coverage.error_penalty.is_sign_negative()
            || self.synergy.conflict_penalty.is_sign_negative()
        {
            return invalid("scoring penalties must be non-negative".to_string());
        }
        if self.synergy.high_impact_bonus.is_sign_negative()
            || self.synergy.extra_high_impact_bonus.is_sign_negative()
        {
            return invalid("scoring.synergy bonuses must be non-negative".to_string());
        }
        let share = self.implementation.scan_load_share;
        if share < Decimal::ZERO || share > Decimal::ONE {
            return invalid(format!(
                "scoring.implementation.scan_load_share must be between 0 and 1, got {share}"
            ));
        }
        let diversity = &self.diversity;
        let parts = [
            diversity.trigger_families,
            diversity.confluence_families,
            diversity.high_impact_pairing,
        ];
        if parts.iter().any(|p| p.is_sign_negative()) || parts.iter().sum::<Decimal>() != dec!(100)
        {
            return invalid(
                "scoring.diversity points must be non-negative and sum to 100".to_string(),
            );
        }
        let tf = &self.timeframe;
        if [tf.aligned_points, tf.wide_gap_points, tf.unset_points]
            .iter()
            .any(|p| p.is_sign_negative())
            || tf.aligned_points + tf.wide_gap_points > dec!(100)
            || tf.unset_points > dec!(100)
        {
            return invalid(
                "scoring.timeframe points must be non-negative and stay within 100".to_string(),
            );
        }
        let ratio = &self.balance;
        if [ratio.gate, ratio.trigger, ratio.confluence].iter().any(|r| r.is_sign_negative())
            || ratio.gate + ratio.trigger + ratio.confluence <= Decimal::ZERO
        {
            return invalid("scoring.balance ratio must be non-negative with a positive sum".to_string());
        }
        let risk = &self.risk;
        if !(Decimal::ZERO < risk.rr_floor
            && risk.rr_floor < risk.rr_sweet_min
            && risk.rr_sweet_min <= risk.rr_sweet_max
            && risk.rr_sweet_max < risk.rr_ceiling)
        {
            return invalid(
                "scoring.risk thresholds must satisfy 0 < rr_floor < rr_sweet_min <= rr_sweet_max < rr_ceiling"
                    .to_string(),
            );
        }
        if self.invalid_total_cap.is_sign_negative()
            || self.invalid_total_cap >= self.valid_total_floor()
        {
            return invalid(format!(
                "scoring.invalid_total_cap ({}) must be non-negative and below the valid floor ({})",
                self.invalid_total_cap,
                self.valid_total_floor()
            ));
        }
        Ok(())
    }
}
