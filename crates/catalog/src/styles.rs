use core_types::{Difficulty, RecommendedSettings, TradingStyle};
use rust_decimal_macros::dec;
use serde::Serialize;

/// How a trading style is meant to be assembled from detectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleProfile {
    pub style: TradingStyle,
    pub label: String,
    pub description: String,
    pub gates: Vec<String>,
    pub triggers: Vec<String>,
    pub confluence: Vec<String>,
    /// Detectors that work against this style.
    pub incompatible: Vec<String>,
    pub best_conditions: Vec<String>,
    pub difficulty: Difficulty,
    pub settings: RecommendedSettings,
    /// What the incompatible detectors have in common, used to explain a clash.
    #[serde(skip)]
    pub clash_kind: Option<String>,
}

impl StyleProfile {
    /// Gates, then triggers, then confluence.
    pub fn recommended(&self) -> impl Iterator<Item = &str> {
        self.gates
            .iter()
            .chain(&self.triggers)
            .chain(&self.confluence)
            .map(String::as_str)
    }

    pub fn is_incompatible(&self, detector: &str) -> bool {
        self.incompatible.iter().any(|d| d == detector)
    }

    pub fn incompatibility_reason(&self, detector: &str) -> Option<String> {
        if !self.is_incompatible(detector) {
            return None;
        }
        Some(match &self.clash_kind {
            Some(kind) => format!("{kind} detector. Conflicts with {} strategy.", self.label),
            None => format!("May conflict with {} strategy approach.", self.label),
        })
    }

    /// Affinity of a selection for this style: +1 per recommended trigger or
    /// confluence detector, -2 per incompatible one. Gates are neutral.
    pub fn affinity<S: AsRef<str>>(&self, ids: &[S]) -> i32 {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                let mut score = 0;
                if self.triggers.iter().chain(&self.confluence).any(|d| d == id) {
                    score += 1;
                }
                if self.is_incompatible(id) {
                    score -= 2;
                }
                score
            })
            .sum()
    }
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// The five built-in style profiles in declaration order.
pub fn builtin_styles() -> Vec<StyleProfile> {
    vec![
        StyleProfile {
            style: TradingStyle::Trend,
            label: "Trend Following".to_string(),
            description: "Follow the dominant market trend. Entry on pullbacks and continuations."
                .to_string(),
            gates: owned(&["GATE_REGIME", "GATE_DRIFT_SENTINEL"]),
            triggers: owned(&["BOS", "FVG", "MOMENTUM_CONTINUATION", "EQ_BREAK"]),
            confluence: owned(&["FLAG_PENNANT", "TREND_FIBO", "FIBO_RETRACE_CONFLUENCE"]),
            incompatible: owned(&["MEAN_REVERSION_SNAPBACK", "SFP", "DOUBLE_TOP_BOTTOM"]),
            best_conditions: owned(&["Strong trending markets", "Low volatility periods"]),
            difficulty: Difficulty::Beginner,
            settings: RecommendedSettings {
                min_rr: dec!(2.7),
                symbols: owned(&["XAUUSD", "EURUSD", "GBPUSD"]),
                timeframes: owned(&["15m", "1h"]),
            },
            clash_kind: Some("Counter-trend".to_string()),
        },
        StyleProfile {
            style: TradingStyle::Reversal,
            label: "Reversal Trading".to_string(),
            description: "Catch market reversals at key levels. Counter-trend entries.".to_string(),
            gates: owned(&["GATE_REGIME", "GATE_VOLATILITY"]),
            triggers: owned(&["SWEEP", "SFP", "CHOCH", "MEAN_REVERSION_SNAPBACK"]),
            confluence: owned(&[
                "PINBAR_AT_LEVEL",
                "FAKEOUT_TRAP",
                "DOUBLE_TOP_BOTTOM",
                "ENGULF_AT_LEVEL",
            ]),
            incompatible: owned(&["BOS", "MOMENTUM_CONTINUATION", "EQ_BREAK"]),
            best_conditions: owned(&[
                "Overextended markets",
                "Key S/R levels",
                "Divergence present",
            ]),
            difficulty: Difficulty::Intermediate,
            settings: RecommendedSettings {
                min_rr: dec!(3.0),
                symbols: owned(&["XAUUSD", "BTCUSD", "US30"]),
                timeframes: owned(&["15m", "1h", "4h"]),
            },
            clash_kind: Some("Trend continuation".to_string()),
        },
        StyleProfile {
            style: TradingStyle::Breakout,
            label: "Breakout Trading".to_string(),
            description: "Trade level breakouts with confirmation. High momentum entries."
                .to_string(),
            gates: owned(&["GATE_REGIME", "GATE_VOLATILITY"]),
            triggers: owned(&[
                "BREAK_RETEST",
                "SR_BREAK_CLOSE",
                "COMPRESSION_EXPANSION",
                "TRIANGLE_BREAKOUT_CLOSE",
            ]),
            confluence: owned(&["SR_ROLE_REVERSAL", "FIBO_RETRACE_CONFLUENCE", "FLAG_PENNANT"]),
            incompatible: owned(&["SR_BOUNCE", "MEAN_REVERSION_SNAPBACK"]),
            best_conditions: owned(&[
                "Consolidation breakouts",
                "High volume",
                "Clear S/R levels",
            ]),
            difficulty: Difficulty::Intermediate,
            settings: RecommendedSettings {
                min_rr: dec!(2.7),
                symbols: owned(&["XAUUSD", "GBPUSD", "NAS100"]),
                timeframes: owned(&["15m", "1h"]),
            },
            clash_kind: Some("Range/bounce".to_string()),
        },
        StyleProfile {
            style: TradingStyle::Range,
            label: "Range Trading".to_string(),
            description: "Trade bounces within a defined range. S/R based entries.".to_string(),
            gates: owned(&["GATE_REGIME", "GATE_VOLATILITY"]),
            triggers: owned(&["SR_BOUNCE", "MEAN_REVERSION_SNAPBACK"]),
            confluence: owned(&[
                "PINBAR_AT_LEVEL",
                "RECTANGLE_RANGE_EDGE",
                "ENGULF_AT_LEVEL",
                "DOJI",
            ]),
            incompatible: owned(&[
                "BOS",
                "BREAK_RETEST",
                "SR_BREAK_CLOSE",
                "MOMENTUM_CONTINUATION",
            ]),
            best_conditions: owned(&[
                "Sideways markets",
                "Clear support/resistance",
                "Low volatility",
            ]),
            difficulty: Difficulty::Beginner,
            settings: RecommendedSettings {
                min_rr: dec!(2.5),
                symbols: owned(&["EURUSD", "GBPJPY", "USDJPY"]),
                timeframes: owned(&["1h", "4h"]),
            },
            clash_kind: Some("Breakout/trend".to_string()),
        },
        StyleProfile {
            style: TradingStyle::Institutional,
            label: "Smart Money / ICT".to_string(),
            description: "Follow institutional order flow. Order blocks and imbalances."
                .to_string(),
            gates: owned(&["GATE_REGIME", "GATE_DRIFT_SENTINEL"]),
            triggers: owned(&["OB", "FVG", "IMBALANCE", "EQ_BREAK", "SWEEP"]),
            confluence: owned(&["FIBO_RETRACE_CONFLUENCE", "SR_ROLE_REVERSAL", "PINBAR_AT_LEVEL"]),
            incompatible: owned(&["TRIANGLE_BREAKOUT_CLOSE", "MEAN_REVERSION_SNAPBACK"]),
            best_conditions: owned(&["Liquid markets", "Clear order flow", "News events"]),
            difficulty: Difficulty::Advanced,
            settings: RecommendedSettings {
                min_rr: dec!(3.0),
                symbols: owned(&["XAUUSD", "EURUSD", "NAS100"]),
                timeframes: owned(&["15m", "1h", "4h"]),
            },
            clash_kind: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(style: TradingStyle) -> StyleProfile {
        builtin_styles().into_iter().find(|p| p.style == style).unwrap()
    }

    #[test]
    fn one_profile_per_style_in_declaration_order() {
        let styles: Vec<TradingStyle> = builtin_styles().iter().map(|p| p.style).collect();
        assert_eq!(styles, TradingStyle::ALL.to_vec());
    }

    #[test]
    fn clash_reasons_name_the_style() {
        let trend = profile(TradingStyle::Trend);
        assert_eq!(
            trend.incompatibility_reason("SFP").as_deref(),
            Some("Counter-trend detector. Conflicts with Trend Following strategy.")
        );
        assert_eq!(trend.incompatibility_reason("BOS"), None);

        let smart_money = profile(TradingStyle::Institutional);
        assert_eq!(
            smart_money.incompatibility_reason("MEAN_REVERSION_SNAPBACK").as_deref(),
            Some("May conflict with Smart Money / ICT strategy approach.")
        );
    }

    #[test]
    fn affinity_ignores_gates_and_penalises_clashes() {
        let trend = profile(TradingStyle::Trend);
        assert_eq!(trend.affinity(&["GATE_REGIME", "BOS", "FVG"]), 2);
        assert_eq!(trend.affinity(&["BOS", "SFP"]), -1);
    }
}
