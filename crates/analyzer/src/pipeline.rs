use crate::error::AnalyzerError;
use crate::report::StrategyReport;
use catalog::{AliasTable, Catalog};
use configuration::Config;
use core_types::{DetectorMeta, StrategyDraft};
use health::{HealthScorer, ScoreInput};
use normalizer::Normalizer;
use synergy::SynergyTable;
use validator::StructuralValidator;

/// How many detectors a report suggests adding.
pub const SUGGESTION_LIMIT: usize = 3;

/// The read-only tables the pipeline runs against, built once at start-up.
#[derive(Debug, Clone)]
pub struct Registry {
    pub catalog: Catalog,
    pub aliases: AliasTable,
    pub synergy: SynergyTable,
}

impl Registry {
    /// The catalog, alias and synergy tables shipped with the application.
    pub fn builtin() -> Result<Self, AnalyzerError> {
        let catalog = Catalog::builtin()?;
        let aliases = AliasTable::builtin(&catalog)?;
        let synergy = SynergyTable::builtin(&catalog)?;
        Ok(Self {
            catalog,
            aliases,
            synergy,
        })
    }

    pub fn analyzer(&self, config: &Config) -> Result<Analyzer<'_>, AnalyzerError> {
        Analyzer::new(&self.catalog, &self.aliases, &self.synergy, config)
    }
}

/// Runs a strategy draft through every stage: normalize, validate, pairwise
/// analysis, health scoring and suggestions.
///
/// Holds only shared references and immutable policy, so one instance can serve
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    catalog: &'a Catalog,
    aliases: &'a AliasTable,
    synergy: &'a SynergyTable,
    validator: StructuralValidator<'a>,
    scorer: HealthScorer,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        catalog: &'a Catalog,
        aliases: &'a AliasTable,
        synergy: &'a SynergyTable,
        config: &Config,
    ) -> Result<Self, AnalyzerError> {
        let validator = StructuralValidator::new(catalog, config.validation.clone())?;
        let scorer = HealthScorer::new(config.scoring.clone())?;
        Ok(Self {
            catalog,
            aliases,
            synergy,
            validator,
            scorer,
        })
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn aliases(&self) -> &'a AliasTable {
        self.aliases
    }

    pub fn synergy(&self) -> &'a SynergyTable {
        self.synergy
    }

    pub fn normalizer(&self) -> Normalizer<'a> {
        Normalizer::new(self.catalog, self.aliases)
    }

    /// Analyzes a draft. User-input problems are reported in the result, never
    /// returned as errors.
    #[tracing::instrument(skip_all, fields(detectors = draft.detectors.len()))]
    pub fn analyze(&self, draft: &StrategyDraft) -> StrategyReport {
        // 1. Normalize
        let normalized = self.normalizer().normalize_list(&draft.detectors);
        tracing::debug!(
            canonical = ?normalized.canonical,
            unknown = normalized.unknown.len(),
            "Detectors normalized."
        );

        // 2. Validate
        let validation = self.validator.validate_draft(&normalized, &draft.config);
        tracing::debug!(
            ok = validation.ok,
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            "Selection validated."
        );

        // 3. Pairwise analysis
        let analysis = self.synergy.pairwise_analysis(&normalized.canonical);
        let blocking_conflicts: Vec<_> = analysis.blocking_conflicts().cloned().collect();
        if !blocking_conflicts.is_empty() {
            tracing::warn!(
                conflicts = ?blocking_conflicts
                    .iter()
                    .map(|c| format!("{}+{}", c.a, c.b))
                    .collect::<Vec<_>>(),
                "Strategy combines detectors that work against each other."
            );
        }

        // 4. Score
        let detectors: Vec<&DetectorMeta> = normalized
            .canonical
            .iter()
            .filter_map(|id| self.catalog.get_by_id(id))
            .collect();
        let health = self.scorer.score(ScoreInput {
            detectors: &detectors,
            validation: &validation,
            analysis: &analysis,
            config: &draft.config,
            required: self.validator.required_ids(),
        });

        // 5. Suggest
        let suggestions = self.synergy.suggest(&normalized.canonical, SUGGESTION_LIMIT);
        let suggested_style = self.catalog.suggest_style(&normalized.canonical);
        let compatible_regimes = self.catalog.compatible_regimes(&normalized.canonical);

        tracing::info!(
            ok = validation.ok,
            total = %health.total,
            grade = %health.grade,
            "Strategy analyzed."
        );

        StrategyReport {
            canonical_detectors: normalized.canonical,
            unknown: normalized.unknown,
            changed: normalized.changed,
            validation,
            synergies: analysis.synergies,
            conflicts: analysis.conflicts,
            blocking_conflicts,
            health,
            suggestions,
            suggested_style,
            compatible_regimes,
        }
    }

    /// Parses a `{ "detectors": [...], "config": {...} }` payload and analyzes it.
    /// A payload that does not match that shape is rejected outright. Config values
    /// that do not parse are reported as validation errors instead.
    pub fn analyze_json(&self, payload: &str) -> Result<StrategyReport, AnalyzerError> {
        let draft: StrategyDraft = serde_json::from_str(payload)?;
        Ok(self.analyze(&draft))
    }
}
