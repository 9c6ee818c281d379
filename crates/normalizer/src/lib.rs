//! # Stratagem Normalizer
//!
//! Layer 2 crate. Turns the free-form detector ids users type into the canonical
//! catalog ids every later stage works with.
//!
//! Resolution order for one raw id:
//! 1. trim and collapse separators (`-`, `.` and whitespace runs become `_`);
//! 2. look the lowercased key up in the [`AliasTable`];
//! 3. otherwise uppercase it and check catalog membership directly;
//! 4. otherwise report the raw string verbatim as unknown.
//!
//! Normalization is idempotent: feeding a canonical id back in returns it unchanged.

use catalog::{AliasTable, Catalog, fold_separators};
use serde::Serialize;

/// Outcome of normalizing a single raw id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedId {
    Canonical(String),
    /// The original raw input, untouched.
    Unknown(String),
}

impl NormalizedId {
    pub fn canonical(&self) -> Option<&str> {
        match self {
            NormalizedId::Canonical(id) => Some(id),
            NormalizedId::Unknown(_) => None,
        }
    }

    /// The canonical id, or the raw input when it did not resolve.
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedId::Canonical(id) | NormalizedId::Unknown(id) => id,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, NormalizedId::Canonical(_))
    }
}

/// Outcome of normalizing a whole selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeResult {
    /// Non-blank raw inputs, in the order given.
    pub requested: Vec<String>,
    /// Resolved ids, deduplicated, in first-occurrence order.
    pub canonical: Vec<String>,
    /// Raw strings that did not resolve, each reported once.
    pub unknown: Vec<String>,
    /// Whether entries were dropped or merged. Respelling an id alone does not count.
    pub changed: bool,
}

/// Resolves raw ids against an injected catalog and alias table.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    catalog: &'a Catalog,
    aliases: &'a AliasTable,
}

impl<'a> Normalizer<'a> {
    pub fn new(catalog: &'a Catalog, aliases: &'a AliasTable) -> Self {
        Self { catalog, aliases }
    }

    pub fn normalize_id(&self, raw: &str) -> NormalizedId {
        let folded = fold_separators(raw);
        if folded.is_empty() {
            return NormalizedId::Unknown(raw.to_string());
        }

        if let Some(target) = self.aliases.resolve(&folded.to_lowercase()) {
            return NormalizedId::Canonical(target.to_string());
        }

        let upper = folded.to_uppercase();
        if self.catalog.contains(&upper) {
            return NormalizedId::Canonical(upper);
        }

        NormalizedId::Unknown(raw.to_string())
    }

    pub fn normalize_list<S: AsRef<str>>(&self, raw: &[S]) -> NormalizeResult {
        let mut result = NormalizeResult::default();
        // Per requested item, in order.
        let mut resolved: Vec<Option<String>> = Vec::with_capacity(raw.len());

        for item in raw {
            let item = item.as_ref();
            if item.trim().is_empty() {
                continue;
            }
            result.requested.push(item.to_string());

            match self.normalize_id(item) {
                NormalizedId::Canonical(id) => {
                    if !result.canonical.contains(&id) {
                        result.canonical.push(id.clone());
                    }
                    resolved.push(Some(id));
                }
                NormalizedId::Unknown(raw) => {
                    if !result.unknown.contains(&raw) {
                        result.unknown.push(raw);
                    }
                    resolved.push(None);
                }
            }
        }

        // Respelling alone is not a change; dropping, merging or reordering is.
        result.changed = resolved.len() != result.canonical.len()
            || resolved
                .iter()
                .zip(&result.canonical)
                .any(|(r, c)| r.as_ref() != Some(c));
        if !result.unknown.is_empty() {
            tracing::debug!(unknown = ?result.unknown, "Unresolved detector ids.");
        }
        result
    }

    pub fn is_known(&self, raw: &str) -> bool {
        self.normalize_id(raw).is_known()
    }

    pub fn canonical_or_none(&self, raw: &str) -> Option<String> {
        match self.normalize_id(raw) {
            NormalizedId::Canonical(id) => Some(id),
            NormalizedId::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        catalog: Catalog,
        aliases: AliasTable,
    }

    impl Fixture {
        fn new() -> Self {
            let catalog = Catalog::builtin().unwrap();
            let aliases = AliasTable::builtin(&catalog).unwrap();
            Self { catalog, aliases }
        }

        fn normalizer(&self) -> Normalizer<'_> {
            Normalizer::new(&self.catalog, &self.aliases)
        }
    }

    fn canonical(id: &str) -> NormalizedId {
        NormalizedId::Canonical(id.to_string())
    }

    #[test]
    fn aliases_and_case_variants_resolve() {
        let fx = Fixture::new();
        let n = fx.normalizer();
        assert_eq!(n.normalize_id("breakout-retest-entry"), canonical("BREAK_RETEST"));
        assert_eq!(n.normalize_id("  sr bounce "), canonical("SR_BOUNCE"));
        assert_eq!(n.normalize_id("Bos"), canonical("BOS"));
        assert_eq!(n.normalize_id("fibo.ret"), canonical("FIBO_RETRACE_CONFLUENCE"));
    }

    #[test]
    fn unknown_keeps_the_raw_input() {
        let fx = Fixture::new();
        let n = fx.normalizer();
        assert_eq!(n.normalize_id(" Made Up "), NormalizedId::Unknown(" Made Up ".into()));
        assert_eq!(n.normalize_id("   "), NormalizedId::Unknown("   ".into()));
        assert!(!n.is_known("made_up"));
        assert_eq!(n.canonical_or_none("made_up"), None);
        assert_eq!(n.canonical_or_none("order block"), Some("OB".to_string()));
    }

    #[test]
    fn canonical_ids_are_fixed_points() {
        let fx = Fixture::new();
        let n = fx.normalizer();
        for meta in fx.catalog.iter() {
            assert_eq!(n.normalize_id(&meta.id), canonical(&meta.id));
        }
    }

    #[test]
    fn list_dedups_and_keeps_first_occurrence_order() {
        let fx = Fixture::new();
        let result = fx
            .normalizer()
            .normalize_list(&["fvg", "", "bos", "BOS", "Bos", "xyz", "xyz", "FVG"]);
        assert_eq!(result.requested.len(), 7);
        assert_eq!(result.canonical, vec!["FVG", "BOS"]);
        assert_eq!(result.unknown, vec!["xyz"]);
        assert!(result.changed);
    }

    #[test]
    fn canonical_input_is_unchanged() {
        let fx = Fixture::new();
        let result = fx.normalizer().normalize_list(&["GATE_REGIME", "BOS", "DOJI"]);
        assert_eq!(result.canonical, result.requested);
        assert!(!result.changed);
        assert!(result.unknown.is_empty());
    }

    #[test]
    fn respelling_alone_is_not_a_change() {
        let fx = Fixture::new();
        let n = fx.normalizer();

        let respelled = n.normalize_list(&["bos", "fvg"]);
        assert_eq!(respelled.canonical, vec!["BOS", "FVG"]);
        assert!(!respelled.changed);
        assert!(!n.normalize_list(&["breakout-retest-entry", "Doji"]).changed);

        assert!(n.normalize_list(&["bos", "bos"]).changed);
        assert!(n.normalize_list(&["bos", "made_up"]).changed);
    }
}
