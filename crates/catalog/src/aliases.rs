use crate::error::CatalogError;
use crate::registry::Catalog;
use std::collections::HashMap;

/// Collapses the separators users type into the single `_` the catalog uses.
///
/// Trims, then maps `-` and `.` to `_` and every run of whitespace to one `_`. Case
/// is left untouched.
pub fn fold_separators(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                folded.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        match ch {
            '-' | '.' => folded.push('_'),
            other => folded.push(other),
        }
    }
    folded
}

/// Folds and lowercases a raw alias into the key the table is indexed by.
pub fn alias_key(raw: &str) -> String {
    fold_separators(raw).to_lowercase()
}

/// Many-to-one mapping from alternate spellings to canonical detector ids.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Builds a table from `(alias, canonical id)` pairs, checked against `catalog`.
    ///
    /// Aliases are folded before insertion. Repeating an identical pair is accepted.
    pub fn new<I, A, T>(entries: I, catalog: &Catalog) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (A, T)>,
        A: AsRef<str>,
        T: AsRef<str>,
    {
        let mut table: HashMap<String, String> = HashMap::new();
        for (alias, target) in entries {
            let key = alias_key(alias.as_ref());
            let target = target.as_ref();

            if !catalog.contains(target) {
                return Err(CatalogError::UnknownAliasTarget {
                    alias: key,
                    target: target.to_string(),
                });
            }

            // A key that spells a catalog id must resolve to that id.
            let shadowed = key.to_uppercase();
            if catalog.contains(&shadowed) && shadowed != target {
                return Err(CatalogError::ShadowingAlias {
                    alias: key,
                    shadowed,
                    target: target.to_string(),
                });
            }

            match table.get(&key) {
                Some(existing) if existing != target => {
                    return Err(CatalogError::ConflictingAlias {
                        alias: key,
                        first: existing.clone(),
                        second: target.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    table.insert(key, target.to_string());
                }
            }
        }
        tracing::debug!(aliases = table.len(), "Alias table built.");
        Ok(Self { entries: table })
    }

    /// The alias set shipped with the application.
    pub fn builtin(catalog: &Catalog) -> Result<Self, CatalogError> {
        Self::new(BUILTIN_ALIASES.iter().copied(), catalog)
    }

    /// Looks up an already folded, lowercase key.
    pub fn resolve(&self, folded_key: &str) -> Option<&str> {
        self.entries.get(folded_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All aliases pointing at `id`, sorted.
    pub fn aliases_of(&self, id: &str) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, target)| target.as_str() == id)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }
}

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("gate_regime", "GATE_REGIME"),
    ("gateregime", "GATE_REGIME"),
    ("regime", "GATE_REGIME"),
    ("gate_volatility", "GATE_VOLATILITY"),
    ("gatevolatility", "GATE_VOLATILITY"),
    ("volatility_filter", "GATE_VOLATILITY"),
    ("gate_drift", "GATE_DRIFT_SENTINEL"),
    ("gatedrift", "GATE_DRIFT_SENTINEL"),
    ("drift_sentinel", "GATE_DRIFT_SENTINEL"),
    ("break_of_structure", "BOS"),
    ("breakofstructure", "BOS"),
    ("fair_value_gap", "FVG"),
    ("fairvaluegap", "FVG"),
    ("order_block", "OB"),
    ("orderblock", "OB"),
    ("change_of_character", "CHOCH"),
    ("changeofcharacter", "CHOCH"),
    ("eq_break", "EQ_BREAK"),
    ("eqbreak", "EQ_BREAK"),
    ("equilibrium", "EQ_BREAK"),
    ("equilibrium_break", "EQ_BREAK"),
    ("liquidity_sweep", "SWEEP"),
    ("liquiditysweep", "SWEEP"),
    ("swing_failure", "SFP"),
    ("swingfailure", "SFP"),
    ("swing_failure_pattern", "SFP"),
    ("break_retest", "BREAK_RETEST"),
    ("breakretest", "BREAK_RETEST"),
    ("breakout_retest_entry", "BREAK_RETEST"),
    ("breakoutretestentry", "BREAK_RETEST"),
    ("break_retest_entry", "BREAK_RETEST"),
    ("compression_expansion", "COMPRESSION_EXPANSION"),
    ("compressionexpansion", "COMPRESSION_EXPANSION"),
    ("momentum_continuation", "MOMENTUM_CONTINUATION"),
    ("momentumcontinuation", "MOMENTUM_CONTINUATION"),
    ("mean_reversion_snapback", "MEAN_REVERSION_SNAPBACK"),
    ("meanreversionsnapback", "MEAN_REVERSION_SNAPBACK"),
    ("mean_reversion", "MEAN_REVERSION_SNAPBACK"),
    ("sr_bounce", "SR_BOUNCE"),
    ("srbounce", "SR_BOUNCE"),
    ("sr_break_close", "SR_BREAK_CLOSE"),
    ("srbreakclose", "SR_BREAK_CLOSE"),
    ("triangle_breakout_close", "TRIANGLE_BREAKOUT_CLOSE"),
    ("trianglebreakoutclose", "TRIANGLE_BREAKOUT_CLOSE"),
    ("triangle_breakout", "TRIANGLE_BREAKOUT_CLOSE"),
    ("double_top_bottom", "DOUBLE_TOP_BOTTOM"),
    ("doubletopbottom", "DOUBLE_TOP_BOTTOM"),
    ("engulf_at_level", "ENGULF_AT_LEVEL"),
    ("engulfatlevel", "ENGULF_AT_LEVEL"),
    ("fakeout_trap", "FAKEOUT_TRAP"),
    ("fakeouttrap", "FAKEOUT_TRAP"),
    ("fibo_ext", "FIBO_EXTENSION"),
    ("fiboext", "FIBO_EXTENSION"),
    ("fibo_extension", "FIBO_EXTENSION"),
    ("fibo_ret", "FIBO_RETRACE_CONFLUENCE"),
    ("fiboret", "FIBO_RETRACE_CONFLUENCE"),
    ("fibo_retrace", "FIBO_RETRACE_CONFLUENCE"),
    ("fibo_retrace_confluence", "FIBO_RETRACE_CONFLUENCE"),
    ("flag_pennant", "FLAG_PENNANT"),
    ("flagpennant", "FLAG_PENNANT"),
    ("h_s", "HEAD_SHOULDERS"),
    ("hs", "HEAD_SHOULDERS"),
    ("head_shoulders", "HEAD_SHOULDERS"),
    ("headshoulders", "HEAD_SHOULDERS"),
    ("pinbar_at_level", "PINBAR_AT_LEVEL"),
    ("pinbaratlevel", "PINBAR_AT_LEVEL"),
    ("price_momentum_weakening", "PRICE_MOMENTUM_WEAKENING"),
    ("pricemomentumweakening", "PRICE_MOMENTUM_WEAKENING"),
    ("momentum_weakening", "PRICE_MOMENTUM_WEAKENING"),
    ("rectangle_range_edge", "RECTANGLE_RANGE_EDGE"),
    ("rectanglerangeedge", "RECTANGLE_RANGE_EDGE"),
    ("sr_role_reversal", "SR_ROLE_REVERSAL"),
    ("srrolereversal", "SR_ROLE_REVERSAL"),
    ("sr_flip", "SR_ROLE_REVERSAL"),
    ("sr_polarity", "SR_ROLE_REVERSAL"),
    ("trend_fibo", "TREND_FIBO"),
    ("trendfibo", "TREND_FIBO"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn folding_collapses_separators() {
        assert_eq!(fold_separators("  breakout-retest entry "), "breakout_retest_entry");
        assert_eq!(fold_separators("fibo.ret"), "fibo_ret");
        assert_eq!(fold_separators("sr \t  bounce"), "sr_bounce");
        assert_eq!(alias_key("Break-Retest"), "break_retest");
    }

    #[test]
    fn builtin_aliases_resolve() {
        let catalog = catalog();
        let aliases = AliasTable::builtin(&catalog).unwrap();
        assert_eq!(aliases.resolve("breakout_retest_entry"), Some("BREAK_RETEST"));
        assert_eq!(aliases.resolve("hs"), Some("HEAD_SHOULDERS"));
        assert_eq!(aliases.resolve("regime"), Some("GATE_REGIME"));
        assert_eq!(aliases.resolve("BREAKOUT_RETEST_ENTRY"), None);
        assert!(aliases.aliases_of("SR_ROLE_REVERSAL").contains(&"sr_flip"));
    }

    #[test]
    fn every_builtin_target_exists() {
        let catalog = catalog();
        for (_, target) in BUILTIN_ALIASES {
            assert!(catalog.contains(target), "{target} missing from catalog");
        }
    }

    #[test]
    fn unknown_target_is_rejected() {
        let err = AliasTable::new([("ghost", "NOT_A_DETECTOR")], &catalog()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownAliasTarget { .. }));
    }

    #[test]
    fn shadowing_a_catalog_id_is_rejected() {
        let err = AliasTable::new([("bos", "FVG")], &catalog()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::ShadowingAlias {
                alias: "bos".to_string(),
                shadowed: "BOS".to_string(),
                target: "FVG".to_string(),
            }
        );
    }

    #[test]
    fn one_key_maps_to_one_target() {
        let err = AliasTable::new([("structure", "BOS"), ("Structure", "CHOCH")], &catalog())
            .unwrap_err();
        assert!(matches!(err, CatalogError::ConflictingAlias { .. }));

        let repeated = AliasTable::new([("structure", "BOS"), ("structure", "BOS")], &catalog());
        assert_eq!(repeated.unwrap().len(), 1);
    }
}
