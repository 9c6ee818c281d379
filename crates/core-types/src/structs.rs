use crate::enums::{
    CostTier, DetectorCategory, Difficulty, Dimension, HealthGrade, ImpactTier, IssueCode,
    IssueSeverity, MarketRegime, Severity, TradingStyle,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// An immutable catalog entry describing one detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorMeta {
    /// Canonical id, UPPER_SNAKE_CASE. This is what the scanning backend consumes.
    pub id: String,
    pub category: DetectorCategory,
    /// English label (primary).
    pub label_primary: String,
    /// Mongolian label (secondary subtitle).
    pub label_secondary: String,
    /// Compact label for badges.
    pub label_short: String,
    pub description: String,
    /// `false` for reserved/planned ids the backend cannot execute yet.
    pub implemented: bool,
    pub impact: ImpactTier,
    pub cost: CostTier,
    /// Required detectors cannot be removed from a selection.
    pub required: bool,
    pub tags: Vec<String>,
}

/// Per-category tally of a detector selection or of the whole catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub gate: usize,
    pub trigger: usize,
    pub confluence: usize,
    pub total: usize,
}

impl CategoryCounts {
    pub fn record(&mut self, category: DetectorCategory) {
        match category {
            DetectorCategory::Gate => self.gate += 1,
            DetectorCategory::Trigger => self.trigger += 1,
            DetectorCategory::Confluence => self.confluence += 1,
        }
        self.total += 1;
    }

    pub fn get(&self, category: DetectorCategory) -> usize {
        match category {
            DetectorCategory::Gate => self.gate,
            DetectorCategory::Trigger => self.trigger,
            DetectorCategory::Confluence => self.confluence,
        }
    }

    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = DetectorCategory>,
    {
        let mut counts = Self::default();
        for category in categories {
            counts.record(category);
        }
        counts
    }
}

/// Settings a preset or trading style was tuned with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSettings {
    pub min_rr: Decimal,
    pub symbols: Vec<String>,
    pub timeframes: Vec<String>,
}

/// A named, ordered set of canonical detector ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub detectors: Vec<String>,
    pub style: Option<TradingStyle>,
    pub difficulty: Option<Difficulty>,
    pub recommended: Option<RecommendedSettings>,
    pub popular: bool,
}

/// Strategy-level numeric and timeframe settings supplied alongside the detectors.
///
/// Deserialization never fails on a bad value: anything that does not parse is left
/// unset and recorded in `rejected`, so the validator can report it while the rest
/// of the draft is still analyzed. Unknown keys are ignored so callers can pass their
/// whole config object through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStrategyConfig")]
pub struct StrategyConfig {
    pub min_rr: Option<Decimal>,
    pub min_score: Option<Decimal>,
    pub entry_tf: Option<String>,
    pub trend_tf: Vec<String>,
    pub style: Option<TradingStyle>,
    /// The regime the strategy is meant to trade in, if the caller targets one.
    pub regime: Option<MarketRegime>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedSetting>,
}

/// A config value that was present but could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedSetting {
    pub field: String,
    /// The value as supplied, for echoing back to the caller.
    pub value: String,
}

/// Wire shape of `StrategyConfig`: every known field is taken as an untyped JSON
/// value and parsed afterwards.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStrategyConfig {
    #[serde(alias = "minRR", alias = "minRr")]
    min_rr: Option<Value>,
    #[serde(alias = "minScore")]
    min_score: Option<Value>,
    #[serde(alias = "entryTf")]
    entry_tf: Option<Value>,
    #[serde(alias = "trendTf")]
    trend_tf: Option<Value>,
    style: Option<Value>,
    regime: Option<Value>,
}

impl From<RawStrategyConfig> for StrategyConfig {
    fn from(raw: RawStrategyConfig) -> Self {
        let mut rejected = Vec::new();
        let min_rr = lenient("min_rr", raw.min_rr, decimal_value, &mut rejected);
        let min_score = lenient("min_score", raw.min_score, decimal_value, &mut rejected);
        let entry_tf = lenient("entry_tf", raw.entry_tf, string_value, &mut rejected);
        let style = lenient::<TradingStyle>("style", raw.style, parsed, &mut rejected);
        let regime = lenient::<MarketRegime>("regime", raw.regime, parsed, &mut rejected);
        let trend_tf =
            lenient("trend_tf", raw.trend_tf, string_list, &mut rejected).unwrap_or_default();

        Self {
            min_rr,
            min_score,
            entry_tf,
            trend_tf,
            style,
            regime,
            rejected,
        }
    }
}

/// Parses one optional value. `null` and absence both read as unset.
fn lenient<T>(
    field: &str,
    value: Option<Value>,
    parse: fn(&Value) -> Option<T>,
    rejected: &mut Vec<RejectedSetting>,
) -> Option<T> {
    let value = value.filter(|v| !v.is_null())?;
    let parsed = parse(&value);
    if parsed.is_none() {
        rejected.push(RejectedSetting {
            field: field.to_string(),
            value: match value {
                Value::String(s) => s,
                other => other.to_string(),
            },
        });
    }
    parsed
}

/// Numbers and numeric strings: `2.5`, `"2.5"`, `1e1`.
fn decimal_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn parsed<T: FromStr>(value: &Value) -> Option<T> {
    value.as_str()?.parse().ok()
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Accepts `"H1"` as well as `["H1", "H4"]`. One non-string element rejects the list.
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => items.iter().map(string_value).collect(),
        _ => None,
    }
}

/// The raw input handed to the core by a caller. Request-scoped, never persisted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDraft {
    pub detectors: Vec<String>,
    #[serde(default)]
    pub config: StrategyConfig,
}

impl StrategyDraft {
    pub fn new<I, S>(detectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            detectors: detectors.into_iter().map(Into::into).collect(),
            config: StrategyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StrategyConfig) -> Self {
        self.config = config;
        self
    }
}

/// A single rule violation or advisory note produced by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub severity: IssueSeverity,
    pub message: String,
    /// The same message in Mongolian, for bilingual front ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detector: Option<String>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: IssueSeverity::Error,
            message: message.into(),
            message_secondary: None,
            detector: None,
        }
    }

    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: IssueSeverity::Warning,
            message: message.into(),
            message_secondary: None,
            detector: None,
        }
    }

    pub fn for_detector(mut self, detector: impl Into<String>) -> Self {
        self.detector = Some(detector.into());
        self
    }

    pub fn with_secondary(mut self, message: impl Into<String>) -> Self {
        self.message_secondary = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub counts: CategoryCounts,
}

impl ValidationResult {
    pub fn has_code(&self, code: IssueCode) -> bool {
        self.errors.iter().chain(&self.warnings).any(|i| i.code == code)
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|i| i.message.clone()).collect()
    }
}

/// A favourable detector pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyEdge {
    pub a: String,
    pub b: String,
    /// 0..=100, higher is a better combination.
    pub score: u8,
    pub popular: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A discouraged detector pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEdge {
    pub a: String,
    pub b: String,
    pub severity: Severity,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub total: Decimal,
    pub dimensions: BTreeMap<Dimension, Decimal>,
    pub grade: HealthGrade,
}

impl HealthScore {
    pub fn dimension(&self, dimension: Dimension) -> Decimal {
        self.dimensions.get(&dimension).copied().unwrap_or(Decimal::ZERO)
    }
}
