//! # Stratagem Validator
//!
//! Layer 2 crate. Enforces the structural rules a detector selection must satisfy
//! before it can be saved or scanned: category coverage, required detectors, count
//! bounds, catalog membership and implementation status. Draft validation adds
//! checks on the strategy's numeric, timeframe, style and regime settings.
//!
//! Rule violations are returned as data in a `ValidationResult`; only an unusable
//! policy is an error.

pub mod error;
pub mod structural;

pub use error::ValidatorError;
pub use structural::StructuralValidator;
