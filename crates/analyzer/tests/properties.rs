use analyzer::Registry;
use configuration::{Config, ScoringPolicy};
use core_types::{DetectorCategory, IssueCode, StrategyConfig, StrategyDraft};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::sample::{select, subsequence};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::LazyLock;

static REGISTRY: LazyLock<Registry> =
    LazyLock::new(|| Registry::builtin().expect("builtin tables are consistent"));

fn catalog_ids() -> Vec<String> {
    REGISTRY.catalog.iter().map(|d| d.id.clone()).collect()
}

fn ids_in(category: DetectorCategory) -> Vec<String> {
    REGISTRY
        .catalog
        .list_by_category(category)
        .into_iter()
        .map(|d| d.id.clone())
        .collect()
}

/// Every documented alias key, plus case and separator variations a user might type.
fn alias_spellings() -> Vec<String> {
    let mut spellings = Vec::new();
    for id in catalog_ids() {
        for alias in REGISTRY.aliases.aliases_of(&id) {
            spellings.push(alias.to_string());
            spellings.push(alias.to_uppercase());
            spellings.push(format!("  {}  ", alias.replace('_', "-")));
        }
    }
    spellings
}

/// One raw id as a user might type it: a canonical id, an alias, or junk.
fn raw_id() -> impl Strategy<Value = String> {
    prop_oneof![
        select(catalog_ids()),
        select(alias_spellings()),
        "[a-zA-Z_ .-]{0,16}",
    ]
}

fn raw_selection() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(raw_id(), 0..10)
}

/// Selections built per category so that a good share of them pass validation.
fn structured_selection() -> impl Strategy<Value = Vec<String>> {
    (
        subsequence(ids_in(DetectorCategory::Gate), 0..=2),
        subsequence(ids_in(DetectorCategory::Trigger), 0..=3),
        subsequence(ids_in(DetectorCategory::Confluence), 0..=3),
        prop::option::of("[a-z]{3,8}_xyz"),
    )
        .prop_map(|(gates, triggers, confluence, junk)| {
            gates
                .into_iter()
                .chain(triggers)
                .chain(confluence)
                .chain(junk)
                .collect()
        })
        .prop_shuffle()
}

fn strategy_config() -> impl Strategy<Value = StrategyConfig> {
    (
        prop::option::of((-100i64..800).prop_map(|n| Decimal::new(n, 1))),
        prop::option::of((-50i64..150).prop_map(Decimal::from)),
    )
        .prop_map(|(min_rr, min_score)| StrategyConfig {
            min_rr,
            min_score,
            ..StrategyConfig::default()
        })
}

proptest! {
    #[test]
    fn normalizing_twice_changes_nothing(raw in raw_selection()) {
        let analyzer = REGISTRY.analyzer(&Config::default()).unwrap();
        let normalizer = analyzer.normalizer();

        let once = normalizer.normalize_list(&raw);
        let twice = normalizer.normalize_list(&once.canonical);
        prop_assert_eq!(&twice.canonical, &once.canonical);
        prop_assert!(twice.unknown.is_empty());
        prop_assert!(!twice.changed);

        for id in &raw {
            let first = normalizer.normalize_id(id);
            prop_assert_eq!(normalizer.normalize_id(first.as_str()), first);
        }
    }

    #[test]
    fn canonical_output_has_no_duplicates(raw in raw_selection()) {
        let analyzer = REGISTRY.analyzer(&Config::default()).unwrap();
        let normalized = analyzer.normalizer().normalize_list(&raw);

        let mut sorted = normalized.canonical.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), normalized.canonical.len());
        prop_assert!(normalized.canonical.iter().all(|id| REGISTRY.catalog.contains(id)));
    }

    #[test]
    fn every_alias_spelling_reaches_its_target(id in select(catalog_ids())) {
        let analyzer = REGISTRY.analyzer(&Config::default()).unwrap();
        let normalizer = analyzer.normalizer();

        for alias in REGISTRY.aliases.aliases_of(&id) {
            for spelling in [alias.to_string(), alias.to_uppercase(), alias.replace('_', "-")] {
                let resolved = normalizer.normalize_id(&spelling);
                prop_assert_eq!(resolved.canonical(), Some(id.as_str()));
            }
        }
    }

    #[test]
    fn adding_a_missing_category_never_adds_errors(
        selection in subsequence(catalog_ids(), 0..=6),
    ) {
        let analyzer = REGISTRY.analyzer(&Config::default()).unwrap();
        let before = analyzer.analyze(&StrategyDraft::new(selection.clone())).validation;

        let rules = [
            (DetectorCategory::Gate, IssueCode::NoGate),
            (DetectorCategory::Trigger, IssueCode::NoTrigger),
            (DetectorCategory::Confluence, IssueCode::NoConfluence),
        ];
        for (category, code) in rules {
            if !before.has_code(code) {
                continue;
            }
            let Some(addition) = REGISTRY
                .catalog
                .list_by_category(category)
                .into_iter()
                .find(|d| d.implemented && !selection.contains(&d.id))
            else {
                continue;
            };

            let mut extended = selection.clone();
            extended.push(addition.id.clone());
            let after = analyzer.analyze(&StrategyDraft::new(extended)).validation;

            prop_assert!(!after.has_code(code));
            prop_assert!(after.errors.len() < before.errors.len());
        }
    }

    #[test]
    fn total_is_bounded_and_order_independent(
        selection in structured_selection(),
        config in strategy_config(),
    ) {
        let analyzer = REGISTRY.analyzer(&Config::default()).unwrap();
        let draft = StrategyDraft::new(selection.clone()).with_config(config.clone());
        let report = analyzer.analyze(&draft);
        prop_assert!(report.health.total >= Decimal::ZERO);
        prop_assert!(report.health.total <= dec!(100));

        let mut reversed = selection;
        reversed.reverse();
        let mirrored = analyzer.analyze(&StrategyDraft::new(reversed).with_config(config));
        prop_assert_eq!(mirrored.health.total, report.health.total);
        prop_assert_eq!(mirrored.validation.ok, report.validation.ok);
        prop_assert_eq!(&mirrored.health.dimensions, &report.health.dimensions);
    }

    #[test]
    fn invalid_strategies_never_outscore_valid_ones(
        selection in structured_selection(),
        config in strategy_config(),
    ) {
        let policy = ScoringPolicy::default();
        let analyzer = REGISTRY.analyzer(&Config::default()).unwrap();
        let report = analyzer.analyze(&StrategyDraft::new(selection).with_config(config));

        if report.validation.ok {
            prop_assert!(report.health.total >= policy.valid_total_floor());
        } else {
            prop_assert!(report.health.total <= policy.invalid_total_cap);
        }
    }
}

#[test]
fn structured_selections_include_valid_strategies() {
    let analyzer = REGISTRY.analyzer(&Config::default()).unwrap();
    let report = analyzer.analyze(&StrategyDraft::new([
        "GATE_REGIME",
        "BOS",
        "FVG",
        "TREND_FIBO",
    ]));
    assert_eq!(report.validation.errors, Vec::new());
    assert!(report.health.total >= ScoringPolicy::default().valid_total_floor());
}
