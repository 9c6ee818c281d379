//! # Stratagem Analyzer
//!
//! Layer 4 crate. Wires the catalog, normalizer, validator, synergy table and
//! health scorer into a single pass over a strategy draft.
//!
//! ## Architectural Principles
//!
//! - **Single Entry Point:** callers hand a `StrategyDraft` (or its JSON payload) to
//!   `Analyzer::analyze` and get one `StrategyReport` back.
//! - **Borrowed Tables:** the `Registry` owns the read-only tables; any number of
//!   `Analyzer`s borrow them for as long as they live.
//! - **Errors Are For Setup:** only building the registry or the analyzer, or parsing
//!   a payload, can fail. Bad user selections are findings inside the report.
//!
//! ## Public API
//!
//! - `Registry`: the builtin catalog, alias and synergy tables
//! - `Analyzer`: the pipeline
//! - `StrategyReport`: the pipeline's output
//! - `AnalyzerError`

pub mod error;
pub mod pipeline;
pub mod report;

pub use error::AnalyzerError;
pub use pipeline::{Analyzer, Registry, SUGGESTION_LIMIT};
pub use report::StrategyReport;
