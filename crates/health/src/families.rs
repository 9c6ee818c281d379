use core_types::{DetectorCategory, DetectorMeta};

/// A named group of detectors that read the market the same way.
pub type Family = (&'static str, &'static [&'static str]);

pub const TRIGGER_FAMILIES: &[Family] = &[
    ("structure", &["BOS", "CHOCH", "EQ_BREAK"]),
    ("zone", &["OB", "FVG", "IMBALANCE", "SR_BOUNCE", "SR_BREAK_CLOSE"]),
    (
        "momentum",
        &["MOMENTUM_CONTINUATION", "COMPRESSION_EXPANSION", "MEAN_REVERSION_SNAPBACK"],
    ),
    ("pattern", &["BREAK_RETEST", "SWEEP", "SFP", "TRIANGLE_BREAKOUT_CLOSE"]),
];

pub const CONFLUENCE_FAMILIES: &[Family] = &[
    ("candle", &["PINBAR_AT_LEVEL", "ENGULF_AT_LEVEL", "DOJI"]),
    (
        "pattern",
        &["DOUBLE_TOP_BOTTOM", "HEAD_SHOULDERS", "FLAG_PENNANT", "RECTANGLE_RANGE_EDGE"],
    ),
    ("fibonacci", &["FIBO_EXTENSION", "FIBO_RETRACE_CONFLUENCE", "TREND_FIBO"]),
    ("level", &["FAKEOUT_TRAP", "SR_ROLE_REVERSAL", "PRICE_MOMENTUM_WEAKENING"]),
];

/// How many of `families` have a member among the `category` detectors.
pub fn families_covered(
    families: &[Family],
    detectors: &[&DetectorMeta],
    category: DetectorCategory,
) -> usize {
    families
        .iter()
        .filter(|(_, members)| {
            detectors
                .iter()
                .any(|d| d.category == category && members.contains(&d.id.as_str()))
        })
        .count()
}
