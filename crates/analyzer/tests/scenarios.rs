use analyzer::{AnalyzerError, Registry, StrategyReport};
use configuration::Config;
use core_types::{
    DetectorCategory, IssueCode, MarketRegime, StrategyConfig, StrategyDraft, TradingStyle,
};
use health::families::{CONFLUENCE_FAMILIES, TRIGGER_FAMILIES};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn analyze(registry: &Registry, detectors: &[&str]) -> StrategyReport {
    let analyzer = registry.analyzer(&Config::default()).unwrap();
    analyzer.analyze(&StrategyDraft::new(detectors.iter().copied()))
}

#[test]
fn minimal_strategy_with_regime_gate_is_valid() {
    let registry = Registry::builtin().unwrap();
    let report = analyze(&registry, &["gate_regime", "sr_bounce", "doji"]);

    assert!(report.validation.ok, "{:?}", report.validation.errors);
    assert_eq!(report.canonical_detectors, vec!["GATE_REGIME", "SR_BOUNCE", "DOJI"]);
    assert!(report.unknown.is_empty());
    assert!(!report.changed);
    assert_eq!(report.validation.counts.total, 3);
}

#[test]
fn missing_regime_gate_is_reported_by_id() {
    let registry = Registry::builtin().unwrap();
    let report = analyze(&registry, &["sr_bounce", "doji"]);

    assert!(!report.validation.ok);
    assert!(report.validation.has_code(IssueCode::NoGate));
    assert!(
        report
            .validation
            .error_messages()
            .iter()
            .any(|m| m.contains("missing required GATE_REGIME"))
    );
    assert!(report.health.total <= dec!(25));
}

#[test]
fn long_form_alias_resolves_to_canonical_id() {
    let registry = Registry::builtin().unwrap();
    let report = analyze(&registry, &["breakout_retest_entry"]);
    assert_eq!(report.canonical_detectors, vec!["BREAK_RETEST"]);
    assert!(report.unknown.is_empty());
}

#[test]
fn unknown_detector_is_kept_verbatim() {
    let registry = Registry::builtin().unwrap();
    let report = analyze(&registry, &["totally_made_up_xyz"]);

    assert!(report.canonical_detectors.is_empty());
    assert_eq!(report.unknown, vec!["totally_made_up_xyz"]);
    assert!(report.validation.has_code(IssueCode::UnknownDetector));
    assert!(!report.validation.ok);
}

#[test]
fn spellings_of_one_detector_collapse_to_one_entry() {
    let registry = Registry::builtin().unwrap();
    let report = analyze(&registry, &["bos", "BOS", "Bos"]);
    assert_eq!(report.canonical_detectors, vec!["BOS"]);
    assert!(report.changed);
}

#[test]
fn documented_aliases_converge() {
    let registry = Registry::builtin().unwrap();
    let analyzer = registry.analyzer(&Config::default()).unwrap();
    let normalizer = analyzer.normalizer();

    let a = normalizer.normalize_id("breakout-retest-entry");
    let b = normalizer.normalize_id("break_retest");
    assert_eq!(a, b);
    assert_eq!(a.canonical(), Some("BREAK_RETEST"));
}

#[test]
fn suggestions_follow_strongest_synergies() {
    let registry = Registry::builtin().unwrap();
    let report = analyze(&registry, &["GATE_REGIME", "BOS"]);

    let ids: Vec<&str> = report.suggestions.iter().map(|s| s.detector.as_str()).collect();
    assert_eq!(ids, vec!["FVG", "FLAG_PENNANT", "TREND_FIBO"]);
    assert_eq!(report.suggestions[0].avg_synergy, 90);
    assert_eq!(
        report.suggestions[0].reason,
        "BOS confirms structure, FVG provides entry zone (with BOS)"
    );
}

#[test]
fn trend_selection_suggests_trend_style() {
    let registry = Registry::builtin().unwrap();
    let report = analyze(&registry, &["GATE_REGIME", "BOS", "FVG", "TREND_FIBO"]);
    assert_eq!(report.suggested_style, Some(TradingStyle::Trend));
}

#[test]
fn settings_are_checked_alongside_the_selection() {
    let registry = Registry::builtin().unwrap();
    let analyzer = registry.analyzer(&Config::default()).unwrap();
    let config = StrategyConfig {
        min_rr: Some(dec!(75)),
        entry_tf: Some("H4".to_string()),
        trend_tf: vec!["H1".to_string()],
        ..StrategyConfig::default()
    };
    let report = analyzer.analyze(
        &StrategyDraft::new(["GATE_REGIME", "SR_BOUNCE", "DOJI"]).with_config(config),
    );

    assert!(report.validation.has_code(IssueCode::InvalidConfig));
    assert!(
        report
            .validation
            .warnings
            .iter()
            .any(|w| w.code == IssueCode::TimeframeOrder)
    );
    assert!(!report.validation.ok);
}

#[test]
fn json_payload_round_trips_into_a_camel_case_report() {
    let registry = Registry::builtin().unwrap();
    let analyzer = registry.analyzer(&Config::default()).unwrap();
    let report = analyzer
        .analyze_json(
            r#"{
                "detectors": ["regime", "sr bounce", "pinbar-at-level"],
                "config": {"minRR": 2.5, "entryTf": "M15", "trendTf": "H4", "ignored": true}
            }"#,
        )
        .unwrap();
    assert!(report.validation.ok, "{:?}", report.validation.errors);

    let value = serde_json::to_value(&report).unwrap();
    for key in [
        "canonicalDetectors",
        "unknown",
        "changed",
        "validation",
        "synergies",
        "conflicts",
        "blockingConflicts",
        "health",
        "suggestions",
        "suggestedStyle",
        "compatibleRegimes",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn unreadable_settings_are_reported_while_the_rest_is_scored() {
    let registry = Registry::builtin().unwrap();
    let analyzer = registry.analyzer(&Config::default()).unwrap();
    let report = analyzer
        .analyze_json(
            r#"{
                "detectors": ["GATE_REGIME", "BOS", "FVG", "TREND_FIBO"],
                "config": {"style": "scalping", "minRR": "abc", "minScore": 70, "engine": "v3"}
            }"#,
        )
        .unwrap();

    let messages = report.validation.error_messages();
    assert_eq!(
        messages,
        vec![
            r#"min_rr has invalid value "abc""#.to_string(),
            r#"style has invalid value "scalping""#.to_string(),
        ]
    );
    assert!(report.validation.errors.iter().all(|e| e.code == IssueCode::InvalidConfig));
    assert_eq!(report.canonical_detectors.len(), 4);
    assert!(!report.synergies.is_empty());
    assert_eq!(report.suggested_style, Some(TradingStyle::Trend));
    assert!(report.health.total <= dec!(25));
}

#[test]
fn targeted_regime_warns_without_failing() {
    let registry = Registry::builtin().unwrap();
    let analyzer = registry.analyzer(&Config::default()).unwrap();
    let report = analyzer
        .analyze_json(
            r#"{"detectors": ["regime", "bos", "fvg", "trend_fibo"], "config": {"regime": "ranging"}}"#,
        )
        .unwrap();

    assert!(report.validation.ok, "{:?}", report.validation.errors);
    let flagged: Vec<&str> = report
        .validation
        .warnings
        .iter()
        .filter(|w| w.code == IssueCode::RegimeIncompatible)
        .filter_map(|w| w.detector.as_deref())
        .collect();
    assert_eq!(flagged, vec!["BOS", "FVG", "TREND_FIBO"]);
    assert_eq!(
        report.compatible_regimes,
        vec![MarketRegime::TrendingUp, MarketRegime::TrendingDown]
    );
}

#[test]
fn malformed_payloads_are_rejected() {
    let registry = Registry::builtin().unwrap();
    let analyzer = registry.analyzer(&Config::default()).unwrap();

    for payload in ["not json", r#"{"config": {}}"#, r#"{"detectors": [1, 2]}"#] {
        assert!(
            matches!(analyzer.analyze_json(payload), Err(AnalyzerError::MalformedDraft(_))),
            "accepted {payload}"
        );
    }
}

#[test]
fn diversity_families_name_catalog_detectors() {
    let registry = Registry::builtin().unwrap();
    let tables = [
        (DetectorCategory::Trigger, TRIGGER_FAMILIES),
        (DetectorCategory::Confluence, CONFLUENCE_FAMILIES),
    ];
    for (category, families) in tables {
        for (family, members) in families {
            for id in *members {
                let meta = registry.catalog.get_by_id(id);
                assert_eq!(meta.map(|d| d.category), Some(category), "{family}: {id}");
            }
        }
    }
}

#[test]
fn inconsistent_policy_fails_at_construction() {
    let registry = Registry::builtin().unwrap();
    let mut config = Config::default();
    config.validation.min_detectors = 8;
    assert!(matches!(
        registry.analyzer(&config),
        Err(AnalyzerError::Validator(_))
    ));

    let mut config = Config::default();
    config.scoring.weights.coverage = dec!(0.9);
    assert!(matches!(registry.analyzer(&config), Err(AnalyzerError::Health(_))));
}
