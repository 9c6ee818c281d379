use crate::error::ValidatorError;
use catalog::Catalog;
use configuration::ValidationPolicy;
use core_types::{
    CategoryCounts, DetectorMeta, IssueCode, StrategyConfig, Timeframe, ValidationIssue,
    ValidationResult,
};
use normalizer::NormalizeResult;
use rust_decimal::Decimal;

/// Checks a detector selection against the structural rules every strategy must meet.
///
/// All rules run on every call and every violation is collected, so callers always
/// see the complete list rather than the first failure.
#[derive(Debug, Clone)]
pub struct StructuralValidator<'a> {
    catalog: &'a Catalog,
    policy: ValidationPolicy,
    /// Policy ids followed by catalog-flagged ids, deduplicated.
    required: Vec<String>,
}

impl<'a> StructuralValidator<'a> {
    /// Creates a validator, rejecting policies that no selection could satisfy.
    pub fn new(catalog: &'a Catalog, policy: ValidationPolicy) -> Result<Self, ValidatorError> {
        if policy.min_detectors == 0 {
            return Err(ValidatorError::InvalidPolicy(
                "min_detectors must be at least 1".to_string(),
            ));
        }
        if policy.min_detectors > policy.max_detectors {
            return Err(ValidatorError::InvalidPolicy(format!(
                "min_detectors ({}) exceeds max_detectors ({})",
                policy.min_detectors, policy.max_detectors
            )));
        }

        let mut required: Vec<String> = Vec::new();
        let flagged = catalog.required_ids().into_iter().map(str::to_string);
        for id in policy.required_ids.iter().cloned().chain(flagged) {
            if !catalog.contains(&id) {
                return Err(ValidatorError::UnknownRequiredId(id));
            }
            if !required.contains(&id) {
                required.push(id);
            }
        }

        tracing::debug!(
            ?required,
            min = policy.min_detectors,
            max = policy.max_detectors,
            "Validator ready."
        );
        Ok(Self {
            catalog,
            policy,
            required,
        })
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn required_ids(&self) -> &[String] {
        &self.required
    }

    /// Validates canonical ids. Ids outside the catalog are reported, not resolved.
    pub fn validate<S: AsRef<str>>(&self, ids: &[S]) -> ValidationResult {
        let mut distinct: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            if !distinct.contains(&id) {
                distinct.push(id);
            }
        }

        let (resolved, unknown): (Vec<&str>, Vec<&str>) =
            distinct.iter().copied().partition(|id| self.catalog.contains(id));
        let metas: Vec<&DetectorMeta> = resolved
            .iter()
            .filter_map(|id| self.catalog.get_by_id(id))
            .collect();
        let counts = CategoryCounts::from_categories(metas.iter().map(|d| d.category));

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // --- 1. Gates and required detectors ---
        if counts.gate == 0 {
            errors.push(
                ValidationIssue::error(IssueCode::NoGate, "at least one gate detector is required")
                    .with_secondary("Хамгийн багадаа 1 gate detector шаардлагатай."),
            );
        }
        for id in &self.required {
            if !distinct.contains(&id.as_str()) {
                errors.push(
                    ValidationIssue::error(
                        IssueCode::RequiredMissing,
                        format!("missing required {id}"),
                    )
                    .with_secondary(format!("{id} бүх стратегид заавал байх ёстой."))
                    .for_detector(id.as_str()),
                );
            }
        }

        // --- 2. Triggers ---
        if counts.trigger == 0 {
            errors.push(
                ValidationIssue::error(
                    IssueCode::NoTrigger,
                    "at least one trigger detector is required to generate signals",
                )
                .with_secondary(
                    "Сигнал үүсгэхийн тулд хамгийн багадаа 1 trigger detector шаардлагатай.",
                ),
            );
        }

        // --- 3. Confluence ---
        if counts.confluence == 0 {
            errors.push(
                ValidationIssue::error(
                    IssueCode::NoConfluence,
                    "at least one confluence detector is required",
                )
                .with_secondary("Confluence detector байхгүй. Баталгаажуулалт нэмвэл чанар сайжирна."),
            );
        }

        // --- 4. Detector count ---
        let (min, max) = (self.policy.min_detectors, self.policy.max_detectors);
        if !(min..=max).contains(&counts.total) {
            let total = counts.total;
            errors.push(
                ValidationIssue::error(
                    IssueCode::CountOutOfRange,
                    format!("{total} detectors selected, between {min} and {max} are allowed"),
                )
                .with_secondary(format!(
                    "{total} detector сонгосон, {min}-{max} хооронд байх ёстой."
                )),
            );
        }

        // --- 5. Unknown ids ---
        for id in &unknown {
            errors.push(
                ValidationIssue::error(IssueCode::UnknownDetector, format!("unknown detector {id}"))
                    .with_secondary(format!("Тодорхойгүй detector: {id}. Алгасагдана."))
                    .for_detector(*id),
            );
        }

        // --- 6. Implementation status ---
        let planned: Vec<&str> = metas
            .iter()
            .filter(|d| !d.implemented)
            .map(|d| d.id.as_str())
            .collect();
        if !metas.is_empty() && planned.len() == metas.len() {
            errors.push(
                ValidationIssue::error(
                    IssueCode::AllUnimplemented,
                    "none of the selected detectors is implemented yet",
                )
                .with_secondary(
                    "Бүх сонгосон detector одоогоор хэрэгжээгүй. Стратеги 0 сигнал үүсгэнэ.",
                ),
            );
        } else if !planned.is_empty() {
            let planned = planned.join(", ");
            warnings.push(
                ValidationIssue::warning(
                    IssueCode::Unimplemented,
                    format!("{planned} not yet implemented and will be skipped by the scanner"),
                )
                .with_secondary(format!("{planned} одоогоор хэрэгжээгүй, сканнер алгасна.")),
            );
        }

        ValidationResult {
            ok: errors.is_empty(),
            errors,
            warnings,
            counts,
        }
    }

    /// Validates a normalized draft: the structural rules over its canonical and
    /// unknown ids, plus checks on the accompanying strategy settings.
    pub fn validate_draft(
        &self,
        normalized: &NormalizeResult,
        config: &StrategyConfig,
    ) -> ValidationResult {
        let ids: Vec<&str> = normalized
            .canonical
            .iter()
            .chain(&normalized.unknown)
            .map(String::as_str)
            .collect();
        let mut result = self.validate(&ids);

        // --- 7. Settings ---
        for setting in &config.rejected {
            result.errors.push(ValidationIssue::error(
                IssueCode::InvalidConfig,
                format!("{} has invalid value {:?}", setting.field, setting.value),
            ));
        }
        if let Some(issue) = out_of_range("min_rr", config.min_rr, self.policy.max_min_rr) {
            result.errors.push(issue);
        }
        if let Some(issue) = out_of_range("min_score", config.min_score, self.policy.max_min_score)
        {
            result.errors.push(issue);
        }

        // --- 8. Timeframe ordering ---
        result.warnings.extend(timeframe_warnings(config));

        // --- 9. Style compatibility ---
        if let Some(style) = config.style {
            for id in &normalized.canonical {
                if let Some(reason) = self.catalog.incompatibility_reason(id, style) {
                    result.warnings.push(
                        ValidationIssue::warning(IssueCode::StyleIncompatible, reason)
                            .for_detector(id.as_str()),
                    );
                }
            }
        }

        // --- 10. Market regime ---
        if let Some(regime) = config.regime {
            for fit in self.catalog.regime_incompatible(&normalized.canonical, regime) {
                result.warnings.push(
                    ValidationIssue::warning(
                        IssueCode::RegimeIncompatible,
                        format!(
                            "{} may underperform in a {} market ({})",
                            fit.detector,
                            regime.label(),
                            fit.note
                        ),
                    )
                    .with_secondary(format!("{}: {}", fit.detector, fit.note_secondary))
                    .for_detector(fit.detector.as_str()),
                );
            }
        }

        result.ok = result.errors.is_empty();
        if !result.ok {
            let codes: Vec<IssueCode> = result.errors.iter().map(|e| e.code).collect();
            tracing::debug!(?codes, "Draft failed validation.");
        }
        result
    }
}

fn out_of_range(field: &str, value: Option<Decimal>, max: Decimal) -> Option<ValidationIssue> {
    let value = value?;
    if value < Decimal::ZERO || value > max {
        return Some(ValidationIssue::error(
            IssueCode::InvalidConfig,
            format!("{field} must be between 0 and {max}, got {value}"),
        ));
    }
    None
}

/// The entry timeframe must sit strictly below every trend timeframe. Labels that do
/// not parse are skipped.
fn timeframe_warnings(config: &StrategyConfig) -> Vec<ValidationIssue> {
    let Some(entry) = config
        .entry_tf
        .as_deref()
        .and_then(|tf| tf.parse::<Timeframe>().ok())
    else {
        return Vec::new();
    };

    config
        .trend_tf
        .iter()
        .filter_map(|tf| tf.parse::<Timeframe>().ok())
        .filter(|trend| entry >= *trend)
        .map(|trend| {
            ValidationIssue::warning(
                IssueCode::TimeframeOrder,
                format!("entry timeframe {entry} must be lower than trend timeframe {trend}"),
            )
            .with_secondary(format!(
                "Entry TF ({entry}) нь Trend TF ({trend})-ээс доогуур байх ёстой."
            ))
        })
        .collect()
}
