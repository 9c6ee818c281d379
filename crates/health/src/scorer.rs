use crate::error::HealthError;
use crate::families::{CONFLUENCE_FAMILIES, TRIGGER_FAMILIES, families_covered};
use configuration::{ScoringPolicy, Weights};
use core_types::{
    DetectorCategory, DetectorMeta, Dimension, HealthGrade, HealthScore, ImpactTier, IssueCode,
    StrategyConfig, Timeframe, ValidationResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use synergy::PairwiseAnalysis;

const HUNDRED: Decimal = dec!(100);

/// Everything the scorer looks at for one strategy.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    /// Resolved, deduplicated detectors.
    pub detectors: &'a [&'a DetectorMeta],
    pub validation: &'a ValidationResult,
    pub analysis: &'a PairwiseAnalysis,
    pub config: &'a StrategyConfig,
    /// Ids that must be present for full coverage.
    pub required: &'a [String],
}

/// A stateless calculator turning a strategy's structure and settings into a
/// 0..=100 health score with a per-dimension breakdown.
#[derive(Debug, Clone)]
pub struct HealthScorer {
    policy: ScoringPolicy,
}

impl HealthScorer {
    /// Creates a scorer, rejecting weights that do not sum to 1 and inconsistent
    /// thresholds.
    pub fn new(policy: ScoringPolicy) -> Result<Self, HealthError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Scores a strategy. Invalid strategies are scored too, but their total is capped
    /// below anything a valid strategy can reach.
    pub fn score(&self, input: ScoreInput<'_>) -> HealthScore {
        let mut dimensions = BTreeMap::new();
        dimensions.insert(Dimension::Coverage, self.coverage(&input));
        dimensions.insert(Dimension::Balance, self.balance(input.detectors));
        dimensions.insert(Dimension::Synergy, self.synergy(input.analysis, input.detectors));
        dimensions.insert(Dimension::Risk, self.risk(input.config));
        dimensions.insert(Dimension::Implementation, self.implementation(input.detectors));
        dimensions.insert(Dimension::Diversity, self.diversity(input.detectors));
        dimensions.insert(Dimension::Timeframe, self.timeframe(input.config));

        let weights = &self.policy.weights;
        let mut total = dimensions
            .iter()
            .map(|(&d, &score)| weight_of(weights, d) * score)
            .sum::<Decimal>()
            .clamp(Decimal::ZERO, HUNDRED)
            .round_dp(2);

        if !input.validation.ok {
            total = total.min(self.policy.invalid_total_cap);
        }

        let grade = grade_for(total, input.validation);
        tracing::debug!(%total, ?grade, "Strategy scored.");

        HealthScore {
            total,
            dimensions,
            grade,
        }
    }

    /// Requirement points shared across the three categories and each required id,
    /// plus band points for the detector count, minus a penalty per validation error.
    fn coverage(&self, input: &ScoreInput<'_>) -> Decimal {
        let policy = &self.policy.coverage;
        let counts = input.validation.counts;

        let categories_met = DetectorCategory::ALL
            .iter()
            .filter(|&&c| counts.get(c) > 0)
            .count();
        let required_met = input
            .required
            .iter()
            .filter(|id| input.detectors.iter().any(|d| &d.id == *id))
            .count();
        let satisfied = Decimal::from(categories_met + required_met);
        let total = Decimal::from(DetectorCategory::ALL.len() + input.required.len());
        let mut score = policy.requirement_points * satisfied / total;

        let count = input.detectors.len();
        if (policy.recommended_min..=policy.recommended_max).contains(&count) {
            score += policy.band_points;
        } else if count > 0 && !input.validation.has_code(IssueCode::CountOutOfRange) {
            score += policy.band_points / dec!(2);
        }

        score -= policy.error_penalty * Decimal::from(input.validation.errors.len());
        clamp_round(score)
    }

    /// `100 × (1 − TV)` where TV is the total-variation distance between the actual
    /// category shares and the target ratio.
    fn balance(&self, detectors: &[&DetectorMeta]) -> Decimal {
        if detectors.is_empty() {
            return Decimal::ZERO;
        }
        let target = &self.policy.balance;
        let target_sum = target.gate + target.trigger + target.confluence;
        let n = Decimal::from(detectors.len());

        let distance: Decimal = [
            (DetectorCategory::Gate, target.gate),
            (DetectorCategory::Trigger, target.trigger),
            (DetectorCategory::Confluence, target.confluence),
        ]
        .into_iter()
        .map(|(category, weight)| {
            let actual = Decimal::from(detectors.iter().filter(|d| d.category == category).count());
            (actual / n - weight / target_sum).abs()
        })
        .sum();

        clamp_round(HUNDRED * (Decimal::ONE - distance / dec!(2)))
    }

    /// Net pairwise points around the baseline, plus a bonus for high-impact
    /// detectors: one for the first, a larger one for a second.
    fn synergy(&self, analysis: &PairwiseAnalysis, detectors: &[&DetectorMeta]) -> Decimal {
        let policy = &self.policy.synergy;
        let gained = Decimal::from(analysis.synergy_points());
        let lost: Decimal = analysis
            .conflicts
            .iter()
            .map(|c| policy.conflict_penalty * c.severity.penalty_weight())
            .sum();
        let bonus = match high_impact(detectors, None) {
            0 => Decimal::ZERO,
            1 => policy.high_impact_bonus,
            _ => policy.high_impact_bonus + policy.extra_high_impact_bonus,
        };
        clamp_round(policy.baseline + policy.scale * (gained - lost) + bonus)
    }

    /// Family spread among triggers and among confluence, and whether both roles
    /// carry a high-impact detector.
    fn diversity(&self, detectors: &[&DetectorMeta]) -> Decimal {
        let policy = &self.policy.diversity;
        let mut score = Decimal::ZERO;
        if families_covered(TRIGGER_FAMILIES, detectors, DetectorCategory::Trigger) >= 2 {
            score += policy.trigger_families;
        }
        if families_covered(CONFLUENCE_FAMILIES, detectors, DetectorCategory::Confluence) >= 2 {
            score += policy.confluence_families;
        }
        if high_impact(detectors, Some(DetectorCategory::Trigger)) > 0
            && high_impact(detectors, Some(DetectorCategory::Confluence)) > 0
        {
            score += policy.high_impact_pairing;
        }
        clamp_round(score)
    }

    /// Aligned points when the entry timeframe sits below every trend timeframe,
    /// plus the gap bonus when the closest trend timeframe is far enough above it.
    /// A half-configured or unreadable hierarchy scores zero.
    fn timeframe(&self, config: &StrategyConfig) -> Decimal {
        let policy = &self.policy.timeframe;
        if config.entry_tf.is_none() && config.trend_tf.is_empty() {
            return clamp_round(policy.unset_points);
        }

        let Some(entry) = config.entry_tf.as_deref().and_then(|tf| tf.parse::<Timeframe>().ok())
        else {
            return Decimal::ZERO;
        };
        let trends: Option<Vec<Timeframe>> =
            config.trend_tf.iter().map(|tf| tf.parse().ok()).collect();
        let Some(trends) = trends.filter(|t| !t.is_empty()) else {
            return Decimal::ZERO;
        };
        if trends.iter().any(|trend| *trend <= entry) {
            return Decimal::ZERO;
        }

        let closest = trends
            .iter()
            .map(|trend| trend.rank() - entry.rank())
            .min()
            .unwrap_or(0);
        let mut score = policy.aligned_points;
        if closest >= policy.wide_gap {
            score += policy.wide_gap_points;
        }
        clamp_round(score)
    }

    fn risk(&self, config: &StrategyConfig) -> Decimal {
        let rr = config.min_rr.unwrap_or(self.policy.risk.default_min_rr);
        let min_score = match config.min_score {
            Some(score) if score < Decimal::ZERO || score > HUNDRED => Decimal::ZERO,
            _ => HUNDRED,
        };
        clamp_round(dec!(0.8) * self.rr_component(rr) + dec!(0.2) * min_score)
    }

    /// Piecewise ramp peaking across the sweet band: up to 40 below the floor,
    /// 40..100 approaching the band, 100..40 past it, and 20 beyond the ceiling.
    fn rr_component(&self, rr: Decimal) -> Decimal {
        let p = &self.policy.risk;
        if rr <= Decimal::ZERO {
            Decimal::ZERO
        } else if rr < p.rr_floor {
            dec!(40) * rr / p.rr_floor
        } else if rr < p.rr_sweet_min {
            dec!(40) + dec!(60) * (rr - p.rr_floor) / (p.rr_sweet_min - p.rr_floor)
        } else if rr <= p.rr_sweet_max {
            HUNDRED
        } else if rr <= p.rr_ceiling {
            HUNDRED - dec!(60) * (rr - p.rr_sweet_max) / (p.rr_ceiling - p.rr_sweet_max)
        } else {
            dec!(20)
        }
    }

    /// Share of resolved detectors the scanner can run, blended with how light the
    /// selection is to scan.
    fn implementation(&self, detectors: &[&DetectorMeta]) -> Decimal {
        if detectors.is_empty() {
            return Decimal::ZERO;
        }
        let n = Decimal::from(detectors.len());
        let implemented = detectors.iter().filter(|d| d.implemented).count();
        let runnable = HUNDRED * Decimal::from(implemented) / n;
        let load: Decimal = detectors.iter().map(|d| d.cost.load_weight()).sum::<Decimal>() / n;

        let share = self.policy.implementation.scan_load_share;
        clamp_round((Decimal::ONE - share) * runnable + share * HUNDRED * (Decimal::ONE - load))
    }
}

fn weight_of(weights: &Weights, dimension: Dimension) -> Decimal {
    match dimension {
        Dimension::Coverage => weights.coverage,
        Dimension::Balance => weights.balance,
        Dimension::Synergy => weights.synergy,
        Dimension::Risk => weights.risk,
        Dimension::Implementation => weights.implementation,
        Dimension::Diversity => weights.diversity,
        Dimension::Timeframe => weights.timeframe,
    }
}

/// High-impact detectors, optionally within one category.
fn high_impact(detectors: &[&DetectorMeta], category: Option<DetectorCategory>) -> usize {
    detectors
        .iter()
        .filter(|d| d.impact == ImpactTier::High)
        .filter(|d| category.is_none_or(|c| d.category == c))
        .count()
}

fn clamp_round(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, HUNDRED).round_dp(2)
}

/// Any validation error is `Broken`; otherwise the total decides.
pub fn grade_for(total: Decimal, validation: &ValidationResult) -> HealthGrade {
    if !validation.errors.is_empty() {
        return HealthGrade::Broken;
    }
    match total {
        t if t >= dec!(85) => HealthGrade::Excellent,
        t if t >= dec!(70) => HealthGrade::Good,
        t if t >= dec!(50) => HealthGrade::Fair,
        t if t >= dec!(25) => HealthGrade::Poor,
        _ => HealthGrade::Broken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{
        CategoryCounts, ConflictEdge, CostTier, Severity, SynergyEdge, ValidationIssue,
    };

    fn meta(id: &str, category: DetectorCategory, implemented: bool) -> DetectorMeta {
        DetectorMeta {
            id: id.to_string(),
            category,
            label_primary: id.to_string(),
            label_secondary: id.to_string(),
            label_short: id.to_string(),
            description: String::new(),
            implemented,
            impact: ImpactTier::Medium,
            cost: CostTier::Light,
            required: false,
            tags: Vec::new(),
        }
    }

    fn valid(detectors: &[&DetectorMeta]) -> ValidationResult {
        ValidationResult {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            counts: CategoryCounts::from_categories(detectors.iter().map(|d| d.category)),
        }
    }

    fn scorer() -> HealthScorer {
        HealthScorer::new(ScoringPolicy::default()).unwrap()
    }

    fn required() -> Vec<String> {
        vec!["GATE_REGIME".to_string()]
    }

    #[test]
    fn balanced_valid_strategy_scores_well() {
        let gate = meta("GATE_REGIME", DetectorCategory::Gate, true);
        let bos = meta("BOS", DetectorCategory::Trigger, true);
        let fvg = meta("FVG", DetectorCategory::Trigger, true);
        let fibo = meta("TREND_FIBO", DetectorCategory::Confluence, true);
        let flag = meta("FLAG_PENNANT", DetectorCategory::Confluence, true);
        let detectors = [&gate, &bos, &fvg, &fibo, &flag];
        let validation = valid(&detectors);
        let analysis = PairwiseAnalysis {
            synergies: vec![SynergyEdge {
                a: "BOS".to_string(),
                b: "FVG".to_string(),
                score: 90,
                popular: true,
                reason: None,
            }],
            conflicts: Vec::new(),
        };
        let config = StrategyConfig {
            min_rr: Some(dec!(2.5)),
            ..StrategyConfig::default()
        };
        let required = required();

        let score = scorer().score(ScoreInput {
            detectors: &detectors,
            validation: &validation,
            analysis: &analysis,
            config: &config,
            required: &required,
        });

        assert_eq!(score.dimension(Dimension::Coverage), dec!(100));
        assert_eq!(score.dimension(Dimension::Balance), dec!(100));
        assert_eq!(score.dimension(Dimension::Synergy), dec!(95));
        assert_eq!(score.dimension(Dimension::Risk), dec!(100));
        assert_eq!(score.dimension(Dimension::Implementation), dec!(100));
        // Two trigger families and two confluence families, nothing high-impact.
        assert_eq!(score.dimension(Dimension::Diversity), dec!(70));
        assert_eq!(score.dimension(Dimension::Timeframe), dec!(67));
        // 30 + 10 + 14.25 + 10 + 15 + 7 + 6.7
        assert_eq!(score.total, dec!(92.95));
        assert_eq!(score.grade, HealthGrade::Excellent);
    }

    #[test]
    fn invalid_strategy_is_capped_and_broken() {
        let bounce = meta("SR_BOUNCE", DetectorCategory::Trigger, true);
        let doji = meta("DOJI", DetectorCategory::Confluence, true);
        let detectors = [&bounce, &doji];
        let mut validation = valid(&detectors);
        validation.ok = false;
        validation.errors = vec![
            ValidationIssue::error(IssueCode::NoGate, "no gate"),
            ValidationIssue::error(IssueCode::RequiredMissing, "missing required GATE_REGIME"),
            ValidationIssue::error(IssueCode::CountOutOfRange, "2 detectors"),
        ];
        let required = required();

        let score = scorer().score(ScoreInput {
            detectors: &detectors,
            validation: &validation,
            analysis: &PairwiseAnalysis::default(),
            config: &StrategyConfig::default(),
            required: &required,
        });

        assert!(score.total <= dec!(25));
        assert_eq!(score.grade, HealthGrade::Broken);
        // 80 * 2/4 - 3 * 15
        assert_eq!(score.dimension(Dimension::Coverage), dec!(0));
    }

    #[test]
    fn conflicts_cost_by_severity() {
        let scorer = scorer();
        let conflict = |severity| ConflictEdge {
            a: "A".to_string(),
            b: "B".to_string(),
            severity,
            reason: String::new(),
        };
        let warning = PairwiseAnalysis {
            synergies: Vec::new(),
            conflicts: vec![conflict(Severity::Warning)],
        };
        let error = PairwiseAnalysis {
            synergies: Vec::new(),
            conflicts: vec![conflict(Severity::Error)],
        };
        assert_eq!(scorer.synergy(&PairwiseAnalysis::default(), &[]), dec!(50));
        assert_eq!(scorer.synergy(&warning, &[]), dec!(42.5));
        assert_eq!(scorer.synergy(&error, &[]), dec!(35));
    }

    #[test]
    fn rr_ramp_peaks_in_the_sweet_band() {
        let scorer = scorer();
        assert_eq!(scorer.rr_component(dec!(0)), dec!(0));
        assert_eq!(scorer.rr_component(dec!(0.5)), dec!(20));
        assert_eq!(scorer.rr_component(dec!(1.5)), dec!(70));
        assert_eq!(scorer.rr_component(dec!(3)), dec!(100));
        assert_eq!(scorer.rr_component(dec!(7)), dec!(70));
        assert_eq!(scorer.rr_component(dec!(25)), dec!(20));
    }

    #[test]
    fn absent_rr_uses_default_and_bad_min_score_costs_a_fifth() {
        let scorer = scorer();
        assert_eq!(scorer.risk(&StrategyConfig::default()), dec!(100));
        let bad = StrategyConfig {
            min_score: Some(dec!(150)),
            ..StrategyConfig::default()
        };
        assert_eq!(scorer.risk(&bad), dec!(80));
    }

    #[test]
    fn lopsided_selection_loses_balance() {
        let scorer = scorer();
        let a = meta("BOS", DetectorCategory::Trigger, true);
        let b = meta("FVG", DetectorCategory::Trigger, true);
        // Shares 0:1:0 against 0.2:0.4:0.4 is a distance of 0.6.
        assert_eq!(scorer.balance(&[&a, &b]), dec!(40));
        assert_eq!(scorer.balance(&[]), dec!(0));
    }

    fn high(id: &str, category: DetectorCategory) -> DetectorMeta {
        DetectorMeta {
            impact: ImpactTier::High,
            ..meta(id, category, true)
        }
    }

    #[test]
    fn high_impact_detectors_lift_synergy() {
        let scorer = scorer();
        let none = PairwiseAnalysis::default();
        let bos = high("BOS", DetectorCategory::Trigger);
        let ob = high("OB", DetectorCategory::Trigger);
        let fibo = high("TREND_FIBO", DetectorCategory::Confluence);
        let doji = meta("DOJI", DetectorCategory::Confluence, true);

        assert_eq!(scorer.synergy(&none, &[&doji]), dec!(50));
        assert_eq!(scorer.synergy(&none, &[&bos, &doji]), dec!(60));
        assert_eq!(scorer.synergy(&none, &[&bos, &ob, &doji]), dec!(75));
        assert_eq!(scorer.synergy(&none, &[&bos, &ob, &fibo]), dec!(75));
    }

    #[test]
    fn diversity_rewards_family_spread_and_high_impact_pairing() {
        let scorer = scorer();
        let bos = high("BOS", DetectorCategory::Trigger);
        let choch = meta("CHOCH", DetectorCategory::Trigger, true);
        let fvg = meta("FVG", DetectorCategory::Trigger, true);
        let doji = meta("DOJI", DetectorCategory::Confluence, true);
        let pinbar = meta("PINBAR_AT_LEVEL", DetectorCategory::Confluence, true);
        let fibo = high("TREND_FIBO", DetectorCategory::Confluence);

        // BOS and CHOCH share the structure family.
        assert_eq!(scorer.diversity(&[&bos, &choch, &doji, &pinbar]), dec!(0));
        assert_eq!(scorer.diversity(&[&choch, &fvg]), dec!(40));
        assert_eq!(scorer.diversity(&[&doji, &fibo]), dec!(30));
        assert_eq!(scorer.diversity(&[&bos, &fvg, &doji, &fibo]), dec!(100));
        assert_eq!(scorer.diversity(&[]), dec!(0));
    }

    #[test]
    fn timeframe_hierarchy_scores_alignment_and_gap() {
        let scorer = scorer();
        let tf = |entry: Option<&str>, trend: &[&str]| StrategyConfig {
            entry_tf: entry.map(str::to_string),
            trend_tf: trend.iter().map(|t| t.to_string()).collect(),
            ..StrategyConfig::default()
        };

        assert_eq!(scorer.timeframe(&tf(None, &[])), dec!(67));
        assert_eq!(scorer.timeframe(&tf(Some("M15"), &["H1", "H4"])), dec!(100));
        assert_eq!(scorer.timeframe(&tf(Some("M15"), &["M30", "H4"])), dec!(67));
        assert_eq!(scorer.timeframe(&tf(Some("H4"), &["H1"])), dec!(0));
        assert_eq!(scorer.timeframe(&tf(Some("M15"), &[])), dec!(0));
        assert_eq!(scorer.timeframe(&tf(Some("M15"), &["weekly"])), dec!(0));
    }

    #[test]
    fn implementation_blends_runnable_share_and_scan_load() {
        let scorer = scorer();
        let planned = meta("HEAD_SHOULDERS", DetectorCategory::Confluence, false);
        let bos = meta("BOS", DetectorCategory::Trigger, true);
        let heavy = DetectorMeta {
            cost: CostTier::Heavy,
            ..meta("OB", DetectorCategory::Trigger, true)
        };
        let medium = DetectorMeta {
            cost: CostTier::Medium,
            ..meta("FVG", DetectorCategory::Trigger, true)
        };

        // 0.8 * 50 + 0.2 * 100
        assert_eq!(scorer.implementation(&[&planned, &bos]), dec!(60));
        // 0.8 * 100 + 0.2 * 0
        assert_eq!(scorer.implementation(&[&heavy]), dec!(80));
        // 0.8 * 100 + 0.2 * 75
        assert_eq!(scorer.implementation(&[&bos, &medium]), dec!(95));
        assert_eq!(scorer.implementation(&[]), dec!(0));
    }

    #[test]
    fn grade_boundaries() {
        let ok = ValidationResult {
            ok: true,
            ..ValidationResult::default()
        };
        assert_eq!(grade_for(dec!(85), &ok), HealthGrade::Excellent);
        assert_eq!(grade_for(dec!(84.99), &ok), HealthGrade::Good);
        assert_eq!(grade_for(dec!(70), &ok), HealthGrade::Good);
        assert_eq!(grade_for(dec!(50), &ok), HealthGrade::Fair);
        assert_eq!(grade_for(dec!(25), &ok), HealthGrade::Poor);
        assert_eq!(grade_for(dec!(24.99), &ok), HealthGrade::Broken);

        let failing = ValidationResult {
            ok: false,
            errors: vec![ValidationIssue::error(IssueCode::NoTrigger, "no trigger")],
            ..ValidationResult::default()
        };
        assert_eq!(grade_for(dec!(99), &failing), HealthGrade::Broken);
    }

    #[test]
    fn weights_must_sum_to_one() {
        let mut policy = ScoringPolicy::default();
        policy.weights.risk = dec!(0.5);
        assert!(matches!(
            HealthScorer::new(policy),
            Err(HealthError::InvalidPolicy(_))
        ));
    }
}
