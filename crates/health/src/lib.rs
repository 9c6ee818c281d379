//! # Stratagem Health
//!
//! Layer 3 crate. Grades a strategy on seven dimensions and folds them into a weighted
//! 0..=100 total. Coverage, balance and diversity look at which detectors were picked;
//! synergy at how they pair up; risk and timeframe at the strategy settings;
//! implementation at whether the scanner can run them and at what cost.
//!
//! ## Architectural Principles
//!
//! - **Stateless Calculation:** `HealthScorer` holds only its policy. It takes the
//!   outputs of the earlier stages as input and produces a `HealthScore`.
//! - **Order Independence:** every dimension is built from counts and sums, so the
//!   score does not depend on the order detectors were selected in.
//!
//! ## Public API
//!
//! - `HealthScorer` and `ScoreInput`
//! - `grade_for`: the total-to-grade mapping
//! - `families`: the trigger and confluence family tables diversity is scored on
//! - `HealthError`

pub mod error;
pub mod families;
pub mod scorer;

pub use error::HealthError;
pub use scorer::{HealthScorer, ScoreInput, grade_for};
