use core_types::MarketRegime::{self, Ranging, TrendingDown, TrendingUp, Volatile};
use serde::Serialize;

/// The market regimes a detector is expected to perform in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeFit {
    pub detector: String,
    pub regimes: Vec<MarketRegime>,
    /// English summary of where the detector works.
    pub note: String,
    /// Mongolian summary.
    pub note_secondary: String,
}

impl RegimeFit {
    pub fn fits(&self, regime: MarketRegime) -> bool {
        self.regimes.contains(&regime)
    }
}

const EVERY: &[MarketRegime] = &[TrendingUp, TrendingDown, Ranging, Volatile];
const TRENDING: &[MarketRegime] = &[TrendingUp, TrendingDown];
const SETTLED: &[MarketRegime] = &[TrendingUp, TrendingDown, Ranging];
const RANGING: &[MarketRegime] = &[Ranging];

#[rustfmt::skip]
const TABLE: &[(&str, &[MarketRegime], &str, &str)] = &[
    // Gates
    ("GATE_REGIME", EVERY, "works in every regime, classifies it", "Бүх горимд ажиллана - горим тодорхойлогч"),
    ("GATE_VOLATILITY", EVERY, "works in every regime, filters volatility", "Бүх горимд ажиллана - volatility шүүлт"),
    ("GATE_DRIFT_SENTINEL", EVERY, "works in every regime, detects drift", "Бүх горимд ажиллана - drift илрүүлэгч"),
    // Structure and continuation
    ("BOS", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("FVG", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("OB", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("IMBALANCE", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("EQ_BREAK", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("MOMENTUM_CONTINUATION", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("BREAK_RETEST", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    // Reversal
    ("CHOCH", SETTLED, "works at trend changes", "Trend эргэлт дээр ажиллана"),
    ("SWEEP", SETTLED, "liquidity sweep, trending or ranging", "Liquidity sweep - бүх горимд"),
    ("SFP", SETTLED, "swing failure, trending or ranging", "Swing failure - бүх горимд"),
    // Range
    ("SR_BOUNCE", RANGING, "works best in ranging markets", "Ranging market дээр сайн ажиллана"),
    ("MEAN_REVERSION_SNAPBACK", RANGING, "works best in ranging markets", "Ranging market дээр сайн ажиллана"),
    // Breakout
    ("SR_BREAK_CLOSE", SETTLED, "breakout, trending or ranging", "Breakout - бүх горимд"),
    ("COMPRESSION_EXPANSION", SETTLED, "volatility squeeze, trending or ranging", "Volatility squeeze - бүх горимд"),
    ("TRIANGLE_BREAKOUT_CLOSE", SETTLED, "pattern breakout, trending or ranging", "Pattern breakout - бүх горимд"),
    // Confluence
    ("DOJI", SETTLED, "candle pattern, trending or ranging", "Candle pattern - бүх горимд"),
    ("PINBAR_AT_LEVEL", SETTLED, "candle pattern, trending or ranging", "Candle pattern - бүх горимд"),
    ("ENGULF_AT_LEVEL", SETTLED, "candle pattern, trending or ranging", "Candle pattern - бүх горимд"),
    ("FIBO_RETRACE_CONFLUENCE", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("FIBO_EXTENSION", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("TREND_FIBO", TRENDING, "works best in trending markets", "Trending market дээр сайн ажиллана"),
    ("SR_ROLE_REVERSAL", SETTLED, "S/R polarity, trending or ranging", "S/R polarity - бүх горимд"),
    ("FAKEOUT_TRAP", RANGING, "works best in ranging markets", "Ranging market дээр сайн ажиллана"),
    ("RECTANGLE_RANGE_EDGE", RANGING, "works best in ranging markets", "Ranging market дээр сайн ажиллана"),
    ("DOUBLE_TOP_BOTTOM", SETTLED, "reversal pattern, trending or ranging", "Reversal pattern - бүх горимд"),
    ("HEAD_SHOULDERS", TRENDING, "reversal pattern, needs a trend", "Reversal pattern - trend дээр"),
    ("FLAG_PENNANT", TRENDING, "continuation pattern, needs a trend", "Continuation pattern - trend дээр"),
    ("PRICE_MOMENTUM_WEAKENING", TRENDING, "momentum, needs a trend", "Momentum - trend дээр"),
];

/// Regime fit for every built-in detector, grouped by role.
pub fn builtin_regimes() -> Vec<RegimeFit> {
    TABLE
        .iter()
        .map(|(detector, regimes, note, secondary)| RegimeFit {
            detector: detector.to_string(),
            regimes: regimes.to_vec(),
            note: note.to_string(),
            note_secondary: secondary.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_gates_tolerate_volatility() {
        let volatile: Vec<String> = builtin_regimes()
            .into_iter()
            .filter(|fit| fit.fits(Volatile))
            .map(|fit| fit.detector)
            .collect();
        assert_eq!(volatile, vec!["GATE_REGIME", "GATE_VOLATILITY", "GATE_DRIFT_SENTINEL"]);
    }

    #[test]
    fn every_detector_fits_at_least_one_tradable_regime() {
        for fit in builtin_regimes() {
            assert!(
                MarketRegime::TRADABLE.iter().any(|r| fit.fits(*r)),
                "{} fits nothing",
                fit.detector
            );
        }
    }
}
