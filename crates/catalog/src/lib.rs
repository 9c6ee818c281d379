//! # Stratagem Catalog
//!
//! Layer 1 crate. Owns the detector registry and everything defined directly over it:
//! the alias table used by the normalizer, the built-in presets, the trading style
//! profiles and the regime compatibility table.
//!
//! ## Public API
//! - [`Catalog`]: ordered, read-only detector metadata with category, preset, search
//!   and style queries.
//! - [`AliasTable`] and [`fold_separators`]: alternate spellings mapped onto
//!   canonical ids.
//! - [`StyleProfile`]: how a trading style is assembled from detectors.
//! - [`RegimeFit`]: the market regimes each detector is expected to perform in.

pub mod aliases;
pub mod builtin;
pub mod error;
pub mod presets;
pub mod regimes;
pub mod registry;
pub mod styles;

pub use aliases::{AliasTable, alias_key, fold_separators};
pub use error::CatalogError;
pub use regimes::RegimeFit;
pub use registry::Catalog;
pub use styles::StyleProfile;
