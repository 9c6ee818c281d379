//! The detector registry shipped with the application: 3 gates, 15 triggers and
//! 13 confluence detectors, in registration order.

use core_types::{CostTier as C, DetectorCategory, DetectorMeta, ImpactTier as I};

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    category: DetectorCategory,
    label_primary: &str,
    label_secondary: &str,
    label_short: &str,
    description: &str,
    impact: I,
    cost: C,
    tags: &[&str],
) -> DetectorMeta {
    DetectorMeta {
        id: id.to_string(),
        category,
        label_primary: label_primary.to_string(),
        label_secondary: label_secondary.to_string(),
        label_short: label_short.to_string(),
        description: description.to_string(),
        implemented: true,
        impact,
        cost,
        required: false,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn required(mut meta: DetectorMeta) -> DetectorMeta {
    meta.required = true;
    meta
}

/// Reserved ids the scanning backend cannot execute yet.
fn planned(mut meta: DetectorMeta) -> DetectorMeta {
    meta.implemented = false;
    meta
}

pub fn builtin_detectors() -> Vec<DetectorMeta> {
    use DetectorCategory::{Confluence, Gate, Trigger};

    vec![
        // --- Gates ---
        required(entry(
            "GATE_REGIME",
            Gate,
            "Regime Filter",
            "Regime шүүлтүүр",
            "Regime",
            "Checks if market is trending. Blocks trades during choppy conditions. Required for all strategies.",
            I::High,
            C::Light,
            &["trend", "filter", "regime"],
        )),
        entry(
            "GATE_VOLATILITY",
            Gate,
            "Volatility Filter",
            "Volatility шүүлтүүр",
            "Volatility",
            "Measures volatility via ATR. Blocks trades during extremely low or high volatility.",
            I::Medium,
            C::Light,
            &["volatility", "atr", "filter"],
        ),
        entry(
            "GATE_DRIFT_SENTINEL",
            Gate,
            "Drift Sentinel",
            "Drift Sentinel",
            "Drift",
            "Prevents counter-trend trades during strong momentum drift.",
            I::Medium,
            C::Light,
            &["momentum", "drift", "filter"],
        ),
        // --- Triggers ---
        entry(
            "BOS",
            Trigger,
            "Break of Structure",
            "Бүтэц эвдрэлт (BOS)",
            "BOS",
            "Break of Structure - trend continuation signal when swing high/low is broken.",
            I::High,
            C::Light,
            &["structure", "breakout", "trend"],
        ),
        entry(
            "FVG",
            Trigger,
            "Fair Value Gap",
            "Fair Value Gap",
            "FVG",
            "3-candle gap pattern indicating institutional movement.",
            I::High,
            C::Light,
            &["gap", "institutional", "imbalance"],
        ),
        entry(
            "OB",
            Trigger,
            "Order Block",
            "Order Block",
            "OB",
            "Institutional order zone - the opposing candle before a large move.",
            I::High,
            C::Medium,
            &["institutional", "zone", "supply-demand"],
        ),
        entry(
            "CHOCH",
            Trigger,
            "Change of Character",
            "Trend өөрчлөлт (CHoCH)",
            "CHoCH",
            "Change of Character - the first sign of trend reversal.",
            I::High,
            C::Light,
            &["reversal", "structure", "change"],
        ),
        entry(
            "EQ_BREAK",
            Trigger,
            "Equilibrium Break",
            "Equilibrium эвдрэлт",
            "EQ Break",
            "Strong continuation signal when price breaks the 50% retracement level.",
            I::Medium,
            C::Light,
            &["equilibrium", "50%", "continuation"],
        ),
        entry(
            "SWEEP",
            Trigger,
            "Liquidity Sweep",
            "Liquidity Sweep",
            "Sweep",
            "Stop hunting pattern - temporarily breaks old high/low then reverses.",
            I::High,
            C::Light,
            &["liquidity", "sweep", "stop-hunt"],
        ),
        entry(
            "IMBALANCE",
            Trigger,
            "Price Imbalance",
            "Үнийн тэнцвэргүй байдал",
            "Imbalance",
            "Buy/Sell force imbalance. Similar to FVG.",
            I::Medium,
            C::Light,
            &["imbalance", "gap", "inefficiency"],
        ),
        entry(
            "SFP",
            Trigger,
            "Swing Failure Pattern",
            "Swing Failure Pattern",
            "SFP",
            "Reversal signal when price breaks swing high/low but closes back inside.",
            I::High,
            C::Light,
            &["reversal", "failure", "trap"],
        ),
        entry(
            "BREAK_RETEST",
            Trigger,
            "Break & Retest",
            "Break & Retest",
            "Break Retest",
            "Classic pattern - break level, retest it, then continue in trend direction.",
            I::High,
            C::Medium,
            &["breakout", "retest", "confirmation"],
        ),
        entry(
            "COMPRESSION_EXPANSION",
            Trigger,
            "Compression → Expansion",
            "Compression → Expansion",
            "Compression",
            "Strong breakout from a tight range. Volatility expansion.",
            I::Medium,
            C::Medium,
            &["compression", "expansion", "volatility"],
        ),
        entry(
            "MOMENTUM_CONTINUATION",
            Trigger,
            "Momentum Continuation",
            "Momentum үргэлжлэл",
            "Momentum",
            "Continuation signal after a strong trend move.",
            I::Medium,
            C::Light,
            &["momentum", "continuation", "trend"],
        ),
        entry(
            "MEAN_REVERSION_SNAPBACK",
            Trigger,
            "Mean Reversion Snapback",
            "Mean Reversion",
            "Snapback",
            "Counter-trend entry when price snaps back to the mean from overextended levels.",
            I::Medium,
            C::Medium,
            &["mean-reversion", "oversold", "overbought"],
        ),
        entry(
            "SR_BOUNCE",
            Trigger,
            "S/R Bounce",
            "S/R Bounce",
            "SR Bounce",
            "Bounce entry from Support/Resistance level.",
            I::High,
            C::Medium,
            &["support", "resistance", "bounce"],
        ),
        entry(
            "SR_BREAK_CLOSE",
            Trigger,
            "S/R Break & Close",
            "S/R Break & Close",
            "SR Break",
            "Confirmation breakout - break S/R level and close beyond it.",
            I::High,
            C::Medium,
            &["support", "resistance", "breakout"],
        ),
        planned(entry(
            "TRIANGLE_BREAKOUT_CLOSE",
            Trigger,
            "Triangle Breakout",
            "Triangle Breakout",
            "Triangle",
            "Breakout from triangle pattern. Move after consolidation.",
            I::Medium,
            C::Heavy,
            &["triangle", "pattern", "breakout"],
        )),
        // --- Confluence ---
        entry(
            "DOJI",
            Confluence,
            "Doji Candle",
            "Doji Candle",
            "Doji",
            "Indecision candle (open ≈ close). Reversal signal at S/R levels.",
            I::Low,
            C::Light,
            &["candle", "indecision", "reversal"],
        ),
        entry(
            "DOUBLE_TOP_BOTTOM",
            Confluence,
            "Double Top/Bottom",
            "Double Top/Bottom",
            "Double TB",
            "Classic reversal pattern - double peak or double trough.",
            I::Medium,
            C::Medium,
            &["pattern", "reversal", "double"],
        ),
        entry(
            "ENGULF_AT_LEVEL",
            Confluence,
            "Engulfing at Level",
            "Engulfing at Level",
            "Engulfing",
            "Engulfing candle at a key level. Strong reversal signal.",
            I::Medium,
            C::Light,
            &["candle", "engulfing", "reversal"],
        ),
        entry(
            "FAKEOUT_TRAP",
            Confluence,
            "Fakeout Trap",
            "Fakeout Trap",
            "Fakeout",
            "False breakout - breaks level but reverses back. Stop hunt entry.",
            I::Medium,
            C::Light,
            &["trap", "fakeout", "reversal"],
        ),
        entry(
            "FIBO_EXTENSION",
            Confluence,
            "Fibonacci Extension",
            "Fibonacci Extension",
            "Fibo Ext",
            "Fibonacci extension levels (127.2%, 161.8%) for TP targets.",
            I::Low,
            C::Light,
            &["fibonacci", "extension", "target"],
        ),
        entry(
            "FIBO_RETRACE_CONFLUENCE",
            Confluence,
            "Fibo Retracement Zone",
            "Fibo Retracement",
            "Fibo Ret",
            "38.2%, 50%, 61.8% retracement levels for entry zones.",
            I::Medium,
            C::Light,
            &["fibonacci", "retracement", "entry"],
        ),
        entry(
            "FLAG_PENNANT",
            Confluence,
            "Flag / Pennant",
            "Flag/Pennant",
            "Flag",
            "Continuation pattern - consolidation after a strong move.",
            I::Medium,
            C::Medium,
            &["pattern", "flag", "continuation"],
        ),
        planned(entry(
            "HEAD_SHOULDERS",
            Confluence,
            "Head & Shoulders",
            "Head & Shoulders",
            "H&S",
            "Classic reversal pattern - entry on neckline break.",
            I::High,
            C::Heavy,
            &["pattern", "reversal", "head-shoulders"],
        )),
        entry(
            "PINBAR_AT_LEVEL",
            Confluence,
            "Pinbar at Level",
            "Pinbar at Level",
            "Pinbar",
            "Pinbar/hammer at a key level. Rejection signal.",
            I::Medium,
            C::Light,
            &["candle", "pinbar", "rejection"],
        ),
        entry(
            "PRICE_MOMENTUM_WEAKENING",
            Confluence,
            "Momentum Weakening",
            "Momentum суларч байна",
            "Weak Momentum",
            "Indicates trend strength is weakening. Divergence signal.",
            I::Medium,
            C::Medium,
            &["momentum", "divergence", "weakness"],
        ),
        entry(
            "RECTANGLE_RANGE_EDGE",
            Confluence,
            "Rectangle/Range Edge",
            "Rectangle/Range Edge",
            "Range Edge",
            "Top/bottom of a range. Bounce or breakout setup.",
            I::Medium,
            C::Medium,
            &["range", "rectangle", "edge"],
        ),
        entry(
            "SR_ROLE_REVERSAL",
            Confluence,
            "S/R Role Reversal",
            "S/R Role Reversal",
            "SR Flip",
            "Support becomes Resistance (or vice versa). Polarity shift.",
            I::High,
            C::Medium,
            &["support", "resistance", "flip"],
        ),
        entry(
            "TREND_FIBO",
            Confluence,
            "Trend + Fibo Confluence",
            "Trend + Fibo",
            "Trend Fibo",
            "Trend direction aligns with Fibo level. Strong confluence.",
            I::Medium,
            C::Light,
            &["trend", "fibonacci", "confluence"],
        ),
    ]
}
