//! The synergy and conflict tables shipped with the application.

use core_types::{ConflictEdge, Severity, SynergyEdge};

const SYNERGIES: &[(&str, &str, u8, bool, &str)] = &[
    // Trend continuation
    ("BOS", "FVG", 90, true, "BOS confirms structure, FVG provides entry zone"),
    ("BOS", "FLAG_PENNANT", 85, true, "Both confirm trend continuation"),
    ("BOS", "TREND_FIBO", 80, false, "Structure break + Fibonacci confluence"),
    ("FVG", "OB", 88, true, "Order block with fair value gap = high probability zone"),
    ("MOMENTUM_CONTINUATION", "FLAG_PENNANT", 82, false, "Pattern confirms momentum continuation"),
    // Reversal
    ("SWEEP", "SFP", 92, true, "Both indicate liquidity grab reversal"),
    ("SWEEP", "PINBAR_AT_LEVEL", 85, false, "Sweep with rejection candle = strong reversal"),
    ("SFP", "ENGULF_AT_LEVEL", 83, false, "Swing failure with engulfing confirmation"),
    ("CHOCH", "PINBAR_AT_LEVEL", 80, false, "Structure change with price action confirmation"),
    (
        "DOUBLE_TOP_BOTTOM",
        "PRICE_MOMENTUM_WEAKENING",
        78,
        false,
        "Pattern with divergence = higher probability",
    ),
    // Breakout
    ("BREAK_RETEST", "SR_ROLE_REVERSAL", 90, true, "Breakout with polarity flip confirmation"),
    ("SR_BREAK_CLOSE", "COMPRESSION_EXPANSION", 85, false, "S/R break after volatility compression"),
    ("TRIANGLE_BREAKOUT_CLOSE", "FLAG_PENNANT", 80, false, "Both are continuation patterns"),
    ("BREAK_RETEST", "FIBO_RETRACE_CONFLUENCE", 82, false, "Retest at Fibonacci level = strong entry"),
    // Range
    ("SR_BOUNCE", "PINBAR_AT_LEVEL", 88, true, "S/R bounce with price action confirmation"),
    ("SR_BOUNCE", "ENGULF_AT_LEVEL", 85, false, "S/R bounce with engulfing candle"),
    ("SR_BOUNCE", "RECTANGLE_RANGE_EDGE", 80, false, "Range edge bounce setup"),
    // Institutional
    ("OB", "IMBALANCE", 87, true, "Order block + imbalance = institutional zone"),
    ("OB", "PINBAR_AT_LEVEL", 84, false, "Order block with rejection confirmation"),
    ("FVG", "FIBO_RETRACE_CONFLUENCE", 82, false, "Gap at Fibonacci level"),
    ("EQ_BREAK", "FVG", 80, false, "Equilibrium break through fair value gap"),
    // Gates
    ("GATE_REGIME", "GATE_VOLATILITY", 75, false, "Both filter market conditions"),
    ("GATE_REGIME", "GATE_DRIFT_SENTINEL", 78, false, "Regime + momentum alignment"),
    // Fibonacci
    ("FIBO_RETRACE_CONFLUENCE", "TREND_FIBO", 85, false, "Multiple Fibonacci confirmation"),
    ("FIBO_RETRACE_CONFLUENCE", "SR_ROLE_REVERSAL", 82, false, "Fibonacci + S/R confluence"),
];

const CONFLICTS: &[(&str, &str, Severity, &str)] = &[
    (
        "BOS",
        "MEAN_REVERSION_SNAPBACK",
        Severity::Warning,
        "BOS is trend-following, Mean Reversion is counter-trend",
    ),
    (
        "MOMENTUM_CONTINUATION",
        "SFP",
        Severity::Warning,
        "Momentum continuation vs reversal pattern",
    ),
    (
        "EQ_BREAK",
        "MEAN_REVERSION_SNAPBACK",
        Severity::Warning,
        "Equilibrium break is trend, snapback is counter-trend",
    ),
    (
        "SR_BREAK_CLOSE",
        "SR_BOUNCE",
        Severity::Error,
        "Break expects continuation, bounce expects rejection",
    ),
    (
        "BREAK_RETEST",
        "MEAN_REVERSION_SNAPBACK",
        Severity::Warning,
        "Breakout vs mean reversion approach",
    ),
    (
        "FLAG_PENNANT",
        "DOUBLE_TOP_BOTTOM",
        Severity::Warning,
        "Continuation vs reversal pattern",
    ),
    (
        "TRIANGLE_BREAKOUT_CLOSE",
        "RECTANGLE_RANGE_EDGE",
        Severity::Warning,
        "Breakout vs range-bound approach",
    ),
];

pub fn builtin_synergies() -> Vec<SynergyEdge> {
    SYNERGIES
        .iter()
        .map(|&(a, b, score, popular, reason)| SynergyEdge {
            a: a.to_string(),
            b: b.to_string(),
            score,
            popular,
            reason: Some(reason.to_string()),
        })
        .collect()
}

pub fn builtin_conflicts() -> Vec<ConflictEdge> {
    CONFLICTS
        .iter()
        .map(|&(a, b, severity, reason)| ConflictEdge {
            a: a.to_string(),
            b: b.to_string(),
            severity,
            reason: reason.to_string(),
        })
        .collect()
}
