//! # Stratagem Synergy
//!
//! Layer 2 crate. Knows which detector pairings reinforce each other and which work
//! against each other, and answers pairwise questions about a selection.
//!
//! The table never passes a verdict: it reports the synergy and conflict edges it
//! finds and leaves the rejection policy to the caller.
//!
//! ## Public API
//! - [`SynergyTable`]: validated, unordered-pair lookups plus partner and suggestion
//!   queries.
//! - [`PairwiseAnalysis`]: the edges found among a selection's pairs.
//! - [`Suggestion`]: a ranked candidate to add to a selection.

pub mod builtin;
pub mod error;
pub mod table;

pub use error::SynergyError;
pub use table::{PairwiseAnalysis, SUGGESTION_MIN_SCORE, Suggestion, SynergyTable};
