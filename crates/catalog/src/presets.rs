//! Built-in presets: the `essential` starter set, its `advanced` complement, and the
//! per-symbol presets tuned for specific markets.

use core_types::{DetectorMeta, Difficulty, Preset, RecommendedSettings, TradingStyle};
use rust_decimal_macros::dec;

const ESSENTIAL: &[&str] = &[
    "GATE_REGIME",
    "GATE_VOLATILITY",
    "BOS",
    "FVG",
    "OB",
    "CHOCH",
    "SWEEP",
    "BREAK_RETEST",
    "SR_BOUNCE",
    "SFP",
    "PINBAR_AT_LEVEL",
    "ENGULF_AT_LEVEL",
    "FIBO_RETRACE_CONFLUENCE",
    "SR_ROLE_REVERSAL",
];

const CHOCH_MOMENTUM: &[&str] = &["GATE_REGIME", "CHOCH", "MOMENTUM_CONTINUATION"];
const MEAN_REVERSION: &[&str] = &["GATE_REGIME", "MEAN_REVERSION_SNAPBACK", "PINBAR_AT_LEVEL"];
const EQ_BREAK: &[&str] = &["GATE_REGIME", "EQ_BREAK", "BOS"];
const IMBALANCE_FILL: &[&str] = &["GATE_REGIME", "IMBALANCE", "FVG", "SR_BOUNCE"];
const SR_BREAK_CLOSE: &[&str] = &["GATE_REGIME", "SR_BREAK_CLOSE", "ENGULF_AT_LEVEL"];
const TREND_BOS_FVG: &[&str] = &["GATE_REGIME", "BOS", "FVG", "TREND_FIBO"];

struct SymbolPreset {
    symbol: &'static str,
    label: &'static str,
    description: &'static str,
    detectors: &'static [&'static str],
    timeframe: &'static str,
    style: TradingStyle,
    difficulty: Difficulty,
    popular: bool,
}

const SYMBOL_PRESETS: &[SymbolPreset] = &[
    SymbolPreset {
        symbol: "EURUSD",
        label: "CHOCH Momentum",
        description: "Structure shift confirmed by momentum continuation on the 4h chart.",
        detectors: CHOCH_MOMENTUM,
        timeframe: "4h",
        style: TradingStyle::Trend,
        difficulty: Difficulty::Beginner,
        popular: true,
    },
    SymbolPreset {
        symbol: "USDJPY",
        label: "Mean Reversion",
        description: "Snapback to the mean with a pinbar rejection at the level.",
        detectors: MEAN_REVERSION,
        timeframe: "4h",
        style: TradingStyle::Reversal,
        difficulty: Difficulty::Beginner,
        popular: true,
    },
    SymbolPreset {
        symbol: "GBPUSD",
        label: "EQ Break",
        description: "Equilibrium break confirmed by a break of structure.",
        detectors: EQ_BREAK,
        timeframe: "4h",
        style: TradingStyle::Breakout,
        difficulty: Difficulty::Beginner,
        popular: true,
    },
    SymbolPreset {
        symbol: "AUDUSD",
        label: "EQ Break",
        description: "Equilibrium break confirmed by a break of structure.",
        detectors: EQ_BREAK,
        timeframe: "4h",
        style: TradingStyle::Breakout,
        difficulty: Difficulty::Beginner,
        popular: false,
    },
    SymbolPreset {
        symbol: "USDCAD",
        label: "EQ Break",
        description: "Equilibrium break confirmed by a break of structure.",
        detectors: EQ_BREAK,
        timeframe: "4h",
        style: TradingStyle::Breakout,
        difficulty: Difficulty::Beginner,
        popular: true,
    },
    SymbolPreset {
        symbol: "USDCHF",
        label: "Imbalance Fill",
        description: "Imbalance and fair value gap fills into a support/resistance bounce.",
        detectors: IMBALANCE_FILL,
        timeframe: "4h",
        style: TradingStyle::Reversal,
        difficulty: Difficulty::Intermediate,
        popular: false,
    },
    SymbolPreset {
        symbol: "NZDUSD",
        label: "EQ Break",
        description: "Equilibrium break confirmed by a break of structure.",
        detectors: EQ_BREAK,
        timeframe: "1h",
        style: TradingStyle::Breakout,
        difficulty: Difficulty::Beginner,
        popular: true,
    },
    SymbolPreset {
        symbol: "EURJPY",
        label: "Mean Reversion",
        description: "Snapback to the mean with a pinbar rejection at the level.",
        detectors: MEAN_REVERSION,
        timeframe: "15m",
        style: TradingStyle::Reversal,
        difficulty: Difficulty::Intermediate,
        popular: true,
    },
    SymbolPreset {
        symbol: "GBPJPY",
        label: "Mean Reversion",
        description: "Snapback to the mean with a pinbar rejection at the level.",
        detectors: MEAN_REVERSION,
        timeframe: "4h",
        style: TradingStyle::Reversal,
        difficulty: Difficulty::Intermediate,
        popular: true,
    },
    SymbolPreset {
        symbol: "EURGBP",
        label: "Mean Reversion",
        description: "Snapback to the mean with a pinbar rejection at the level.",
        detectors: MEAN_REVERSION,
        timeframe: "15m",
        style: TradingStyle::Reversal,
        difficulty: Difficulty::Intermediate,
        popular: true,
    },
    SymbolPreset {
        symbol: "AUDJPY",
        label: "EQ Break",
        description: "Equilibrium break confirmed by a break of structure.",
        detectors: EQ_BREAK,
        timeframe: "4h",
        style: TradingStyle::Breakout,
        difficulty: Difficulty::Beginner,
        popular: false,
    },
    SymbolPreset {
        symbol: "EURAUD",
        label: "SR Break Close",
        description: "Close beyond support/resistance with an engulfing candle at the level.",
        detectors: SR_BREAK_CLOSE,
        timeframe: "4h",
        style: TradingStyle::Breakout,
        difficulty: Difficulty::Intermediate,
        popular: true,
    },
    SymbolPreset {
        symbol: "EURCHF",
        label: "SR Break Close",
        description: "Close beyond support/resistance with an engulfing candle at the level.",
        detectors: SR_BREAK_CLOSE,
        timeframe: "4h",
        style: TradingStyle::Breakout,
        difficulty: Difficulty::Intermediate,
        popular: false,
    },
    SymbolPreset {
        symbol: "XAUUSD",
        label: "Trend BOS + FVG",
        description: "Trend continuation via break of structure and fair value gap entries.",
        detectors: TREND_BOS_FVG,
        timeframe: "4h",
        style: TradingStyle::Trend,
        difficulty: Difficulty::Intermediate,
        popular: true,
    },
    SymbolPreset {
        symbol: "BTCUSD",
        label: "Mean Reversion",
        description: "Snapback to the mean with a pinbar rejection at the level.",
        detectors: MEAN_REVERSION,
        timeframe: "1h",
        style: TradingStyle::Reversal,
        difficulty: Difficulty::Intermediate,
        popular: true,
    },
];

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Builds the built-in presets against `detectors`; `advanced` is derived as the
/// complement of `essential` in registration order.
pub fn builtin_presets(detectors: &[DetectorMeta]) -> Vec<Preset> {
    let advanced: Vec<String> = detectors
        .iter()
        .filter(|d| !ESSENTIAL.contains(&d.id.as_str()))
        .map(|d| d.id.clone())
        .collect();

    let mut presets = vec![
        Preset {
            id: "essential".to_string(),
            name: "Essential".to_string(),
            description: "The core detectors most strategies are built from.".to_string(),
            detectors: owned(ESSENTIAL),
            style: None,
            difficulty: Some(Difficulty::Beginner),
            recommended: None,
            popular: true,
        },
        Preset {
            id: "advanced".to_string(),
            name: "Advanced".to_string(),
            description: "Specialised detectors outside the essential set.".to_string(),
            detectors: advanced,
            style: None,
            difficulty: Some(Difficulty::Advanced),
            recommended: None,
            popular: false,
        },
    ];

    presets.extend(SYMBOL_PRESETS.iter().map(|p| Preset {
        id: p.symbol.to_string(),
        name: format!("{} - {}", p.symbol, p.label),
        description: p.description.to_string(),
        detectors: owned(p.detectors),
        style: Some(p.style),
        difficulty: Some(p.difficulty),
        recommended: Some(RecommendedSettings {
            min_rr: dec!(2.5),
            symbols: vec![p.symbol.to_string()],
            timeframes: vec![p.timeframe.to_string()],
        }),
        popular: p.popular,
    }));

    presets
}
