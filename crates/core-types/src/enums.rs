use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a detector plays inside a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorCategory {
    /// Eligibility filter. If a gate fails, the trade is blocked.
    Gate,
    /// Entry signal.
    Trigger,
    /// Corroborating evidence that raises signal quality.
    Confluence,
}

impl DetectorCategory {
    pub const ALL: [DetectorCategory; 3] = [
        DetectorCategory::Gate,
        DetectorCategory::Trigger,
        DetectorCategory::Confluence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorCategory::Gate => "gate",
            DetectorCategory::Trigger => "trigger",
            DetectorCategory::Confluence => "confluence",
        }
    }

    /// Human label used by table renderers.
    pub fn label(&self) -> &'static str {
        match self {
            DetectorCategory::Gate => "Gate (Filter)",
            DetectorCategory::Trigger => "Trigger (Entry Signal)",
            DetectorCategory::Confluence => "Confluence (Confirmation)",
        }
    }
}

impl fmt::Display for DetectorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectorCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gate" => Ok(DetectorCategory::Gate),
            "trigger" => Ok(DetectorCategory::Trigger),
            "confluence" => Ok(DetectorCategory::Confluence),
            _ => Err(CoreError::invalid("category", s)),
        }
    }
}

/// How much a detector moves strategy performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for ImpactTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImpactTier::Low => "low",
            ImpactTier::Medium => "medium",
            ImpactTier::High => "high",
        })
    }
}

/// Computational cost of running a detector downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Light,
    Medium,
    Heavy,
}

impl CostTier {
    /// Share of a scan's budget the detector takes: light is free, heavy is all of it.
    pub fn load_weight(&self) -> Decimal {
        match self {
            CostTier::Light => Decimal::ZERO,
            CostTier::Medium => Decimal::new(5, 1),
            CostTier::Heavy => Decimal::ONE,
        }
    }
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CostTier::Light => "light",
            CostTier::Medium => "medium",
            CostTier::Heavy => "heavy",
        })
    }
}

/// Severity of a discouraged detector combination.
///
/// Ordered so that `Warning < Error`. The penalty weight is the single lookup the
/// health scorer multiplies its base conflict penalty by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Usable but suboptimal.
    Warning,
    /// Avoid. Callers treat this as strategy-blocking.
    Error,
}

impl Severity {
    pub fn penalty_weight(&self) -> Decimal {
        match self {
            Severity::Warning => Decimal::ONE,
            Severity::Error => Decimal::TWO,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Whether a validation issue blocks the strategy or is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Stable machine-readable codes for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    NoGate,
    RequiredMissing,
    NoTrigger,
    NoConfluence,
    CountOutOfRange,
    UnknownDetector,
    AllUnimplemented,
    InvalidConfig,
    Unimplemented,
    TimeframeOrder,
    StyleIncompatible,
    RegimeIncompatible,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            IssueCode::NoGate => "NO_GATE",
            IssueCode::RequiredMissing => "REQUIRED_MISSING",
            IssueCode::NoTrigger => "NO_TRIGGER",
            IssueCode::NoConfluence => "NO_CONFLUENCE",
            IssueCode::CountOutOfRange => "COUNT_OUT_OF_RANGE",
            IssueCode::UnknownDetector => "UNKNOWN_DETECTOR",
            IssueCode::AllUnimplemented => "ALL_UNIMPLEMENTED",
            IssueCode::InvalidConfig => "INVALID_CONFIG",
            IssueCode::Unimplemented => "UNIMPLEMENTED",
            IssueCode::TimeframeOrder => "TIMEFRAME_ORDER",
            IssueCode::StyleIncompatible => "STYLE_INCOMPATIBLE",
            IssueCode::RegimeIncompatible => "REGIME_INCOMPATIBLE",
        };
        f.write_str(code)
    }
}

/// The independently computed components of a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Coverage,
    Balance,
    Synergy,
    Risk,
    Implementation,
    Diversity,
    Timeframe,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Coverage,
        Dimension::Balance,
        Dimension::Synergy,
        Dimension::Risk,
        Dimension::Implementation,
        Dimension::Diversity,
        Dimension::Timeframe,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Coverage => "coverage",
            Dimension::Balance => "balance",
            Dimension::Synergy => "synergy",
            Dimension::Risk => "risk",
            Dimension::Implementation => "implementation",
            Dimension::Diversity => "diversity",
            Dimension::Timeframe => "timeframe",
        })
    }
}

/// Coarse bucket for a health total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthGrade {
    Broken,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthGrade::Broken => "Broken",
            HealthGrade::Poor => "Poor",
            HealthGrade::Fair => "Fair",
            HealthGrade::Good => "Good",
            HealthGrade::Excellent => "Excellent",
        })
    }
}

/// The trading approach a strategy or preset is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingStyle {
    Trend,
    Reversal,
    Breakout,
    Range,
    Institutional,
}

impl TradingStyle {
    pub const ALL: [TradingStyle; 5] = [
        TradingStyle::Trend,
        TradingStyle::Reversal,
        TradingStyle::Breakout,
        TradingStyle::Range,
        TradingStyle::Institutional,
    ];
}

impl fmt::Display for TradingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TradingStyle::Trend => "trend",
            TradingStyle::Reversal => "reversal",
            TradingStyle::Breakout => "breakout",
            TradingStyle::Range => "range",
            TradingStyle::Institutional => "institutional",
        })
    }
}

impl FromStr for TradingStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trend" => Ok(TradingStyle::Trend),
            "reversal" => Ok(TradingStyle::Reversal),
            "breakout" => Ok(TradingStyle::Breakout),
            "range" => Ok(TradingStyle::Range),
            "institutional" => Ok(TradingStyle::Institutional),
            _ => Err(CoreError::invalid("trading style", s)),
        }
    }
}

/// The market state a regime gate classifies the chart into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRegime {
    TrendingUp,
    TrendingDown,
    Ranging,
    Volatile,
    /// The classifier could not decide. Nothing is flagged against it.
    Unknown,
}

impl MarketRegime {
    /// Regimes a strategy can be aimed at. `Volatile` and `Unknown` are states the
    /// regime gate blocks rather than targets.
    pub const TRADABLE: [MarketRegime; 3] = [
        MarketRegime::TrendingUp,
        MarketRegime::TrendingDown,
        MarketRegime::Ranging,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketRegime::TrendingUp => "trending_up",
            MarketRegime::TrendingDown => "trending_down",
            MarketRegime::Ranging => "ranging",
            MarketRegime::Volatile => "volatile",
            MarketRegime::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketRegime::TrendingUp => "Trending ↑",
            MarketRegime::TrendingDown => "Trending ↓",
            MarketRegime::Ranging => "Ranging ↔",
            MarketRegime::Volatile => "Volatile ⚡",
            MarketRegime::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketRegime {
    type Err = CoreError;

    /// Accepts `trending_up`, `TRENDING-UP` and `trending up` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "trending_up" => Ok(MarketRegime::TrendingUp),
            "trending_down" => Ok(MarketRegime::TrendingDown),
            "ranging" => Ok(MarketRegime::Ranging),
            "volatile" => Ok(MarketRegime::Volatile),
            "unknown" => Ok(MarketRegime::Unknown),
            _ => Err(CoreError::invalid("market regime", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        })
    }
}

/// Chart timeframes, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
}

impl Timeframe {
    /// Position in the hierarchy, `M5` being 0.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl FromStr for Timeframe {
    type Err = CoreError;

    /// Accepts both `M15`/`H1` and the `15m`/`1h` spellings used by presets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M5" | "5M" => Ok(Timeframe::M5),
            "M15" | "15M" => Ok(Timeframe::M15),
            "M30" | "30M" => Ok(Timeframe::M30),
            "H1" | "1H" => Ok(Timeframe::H1),
            "H4" | "4H" => Ok(Timeframe::H4),
            "D1" | "1D" => Ok(Timeframe::D1),
            _ => Err(CoreError::invalid("timeframe", s)),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D1 => "D1",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Gate".parse::<DetectorCategory>(), Ok(DetectorCategory::Gate));
        assert_eq!(" TRIGGER ".parse::<DetectorCategory>(), Ok(DetectorCategory::Trigger));
        assert_eq!("confluence".parse::<DetectorCategory>(), Ok(DetectorCategory::Confluence));
    }

    #[test]
    fn unknown_category_is_an_error() {
        assert!("filter".parse::<DetectorCategory>().is_err());
    }

    #[test]
    fn severity_orders_warning_below_error() {
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Warning.penalty_weight() < Severity::Error.penalty_weight());
        assert!(Severity::Error.is_blocking());
        assert!(!Severity::Warning.is_blocking());
    }

    #[test]
    fn timeframe_accepts_both_spellings() {
        assert_eq!("15m".parse::<Timeframe>(), Ok(Timeframe::M15));
        assert_eq!("h4".parse::<Timeframe>(), Ok(Timeframe::H4));
        assert!(Timeframe::M15 < Timeframe::H1);
        assert_eq!(Timeframe::H1.rank() - Timeframe::M15.rank(), 2);
        assert!("W1".parse::<Timeframe>().is_err());
    }

    #[test]
    fn regime_parses_loose_spellings_and_matches_serde() {
        assert_eq!("Trending-Up".parse::<MarketRegime>(), Ok(MarketRegime::TrendingUp));
        assert_eq!(" ranging ".parse::<MarketRegime>(), Ok(MarketRegime::Ranging));
        assert!("sideways".parse::<MarketRegime>().is_err());
        let json = serde_json::to_string(&MarketRegime::TrendingDown).unwrap();
        assert_eq!(json, format!("\"{}\"", MarketRegime::TrendingDown));
        assert!(!MarketRegime::TRADABLE.contains(&MarketRegime::Volatile));
    }

    #[test]
    fn issue_code_display_matches_serde() {
        let json = serde_json::to_string(&IssueCode::RequiredMissing).unwrap();
        assert_eq!(json, format!("\"{}\"", IssueCode::RequiredMissing));
    }
}
