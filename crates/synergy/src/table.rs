use crate::builtin::{builtin_conflicts, builtin_synergies};
use crate::error::SynergyError;
use catalog::Catalog;
use core_types::{ConflictEdge, SynergyEdge};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Partners must score at least this much with a selected detector to be suggested.
pub const SUGGESTION_MIN_SCORE: u8 = 75;

/// Unordered pair key: the two ids in sorted order.
type PairKey = (String, String);

fn pair_key(a: &str, b: &str) -> PairKey {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// The other end of an `a`-`b` pair, if `id` is one of them.
fn partner_of<'e>(a: &'e str, b: &'e str, id: &str) -> Option<&'e str> {
    if a == id {
        Some(b)
    } else if b == id {
        Some(a)
    } else {
        None
    }
}

/// Table entries found among the pairs of a selection. Pairs with no entry are
/// neutral and do not appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairwiseAnalysis {
    pub synergies: Vec<SynergyEdge>,
    pub conflicts: Vec<ConflictEdge>,
}

impl PairwiseAnalysis {
    /// Whether any conflict is severe enough that callers should reject the selection.
    pub fn has_blocking_conflict(&self) -> bool {
        self.conflicts.iter().any(|c| c.severity.is_blocking())
    }

    pub fn blocking_conflicts(&self) -> impl Iterator<Item = &ConflictEdge> {
        self.conflicts.iter().filter(|c| c.severity.is_blocking())
    }

    pub fn synergy_points(&self) -> u32 {
        self.synergies.iter().map(|s| u32::from(s.score)).sum()
    }
}

/// A detector worth adding to the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub detector: String,
    /// Reason of the first qualifying pairing, naming the selected partner.
    pub reason: String,
    /// Mean score across the selected detectors it pairs with, rounded.
    pub avg_synergy: u8,
}

/// Read-only lookup over favourable and discouraged detector pairings.
#[derive(Debug, Clone)]
pub struct SynergyTable {
    synergies: Vec<SynergyEdge>,
    conflicts: Vec<ConflictEdge>,
    synergy_index: HashMap<PairKey, usize>,
    conflict_index: HashMap<PairKey, usize>,
}

impl SynergyTable {
    /// Builds the table, checking every pair against `catalog`.
    pub fn new(
        synergies: Vec<SynergyEdge>,
        conflicts: Vec<ConflictEdge>,
        catalog: &Catalog,
    ) -> Result<Self, SynergyError> {
        let check_pair = |a: &str, b: &str| -> Result<(), SynergyError> {
            if a == b {
                return Err(SynergyError::SelfPair(a.to_string()));
            }
            if let Some(unknown) = [a, b].into_iter().find(|id| !catalog.contains(id)) {
                return Err(SynergyError::UnknownDetector(unknown.to_string()));
            }
            Ok(())
        };

        let mut synergy_index = HashMap::with_capacity(synergies.len());
        for (i, edge) in synergies.iter().enumerate() {
            check_pair(&edge.a, &edge.b)?;
            if edge.score > 100 {
                return Err(SynergyError::ScoreOutOfRange {
                    a: edge.a.clone(),
                    b: edge.b.clone(),
                    score: edge.score,
                });
            }
            if synergy_index.insert(pair_key(&edge.a, &edge.b), i).is_some() {
                return Err(SynergyError::DuplicatePair {
                    a: edge.a.clone(),
                    b: edge.b.clone(),
                    table: "synergy",
                });
            }
        }

        let mut conflict_index = HashMap::with_capacity(conflicts.len());
        for (i, edge) in conflicts.iter().enumerate() {
            check_pair(&edge.a, &edge.b)?;
            if conflict_index.insert(pair_key(&edge.a, &edge.b), i).is_some() {
                return Err(SynergyError::DuplicatePair {
                    a: edge.a.clone(),
                    b: edge.b.clone(),
                    table: "conflict",
                });
            }
        }

        tracing::debug!(
            synergies = synergies.len(),
            conflicts = conflicts.len(),
            "Synergy table built."
        );
        Ok(Self {
            synergies,
            conflicts,
            synergy_index,
            conflict_index,
        })
    }

    /// The tables shipped with the application.
    pub fn builtin(catalog: &Catalog) -> Result<Self, SynergyError> {
        Self::new(builtin_synergies(), builtin_conflicts(), catalog)
    }

    pub fn synergies(&self) -> &[SynergyEdge] {
        &self.synergies
    }

    pub fn conflicts(&self) -> &[ConflictEdge] {
        &self.conflicts
    }

    pub fn synergy_between(&self, a: &str, b: &str) -> Option<&SynergyEdge> {
        self.synergy_index
            .get(&pair_key(a, b))
            .map(|&i| &self.synergies[i])
    }

    pub fn conflict_between(&self, a: &str, b: &str) -> Option<&ConflictEdge> {
        self.conflict_index
            .get(&pair_key(a, b))
            .map(|&i| &self.conflicts[i])
    }

    /// Looks up every unordered pair of distinct ids. Repeated ids are ignored.
    pub fn pairwise_analysis<S: AsRef<str>>(&self, ids: &[S]) -> PairwiseAnalysis {
        let mut distinct: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            if !distinct.contains(&id.as_ref()) {
                distinct.push(id.as_ref());
            }
        }

        let mut analysis = PairwiseAnalysis::default();
        for (i, a) in distinct.iter().enumerate() {
            for b in &distinct[i + 1..] {
                if let Some(edge) = self.synergy_between(a, b) {
                    analysis.synergies.push(edge.clone());
                }
                if let Some(edge) = self.conflict_between(a, b) {
                    analysis.conflicts.push(edge.clone());
                }
            }
        }
        analysis
    }

    /// Detectors pairing with `id` at `min_score` or above, in table order.
    pub fn partners(&self, id: &str, min_score: u8) -> Vec<&str> {
        self.synergies
            .iter()
            .filter(|s| s.score >= min_score)
            .filter_map(|s| partner_of(&s.a, &s.b, id))
            .collect()
    }

    pub fn conflicting_with(&self, id: &str) -> Vec<&str> {
        self.conflicts
            .iter()
            .filter_map(|c| partner_of(&c.a, &c.b, id))
            .collect()
    }

    pub fn popular_combinations(&self, id: &str) -> Vec<&SynergyEdge> {
        self.synergies
            .iter()
            .filter(|s| s.popular && partner_of(&s.a, &s.b, id).is_some())
            .collect()
    }

    /// Ranks detectors that pair well with the selection and clash with none of it.
    pub fn suggest<S: AsRef<str>>(&self, selection: &[S], limit: usize) -> Vec<Suggestion> {
        let selected: Vec<&str> = selection.iter().map(|s| s.as_ref()).collect();
        // partner -> (first reason, score total, pairing count)
        let mut candidates: BTreeMap<&str, (Option<String>, u32, u32)> = BTreeMap::new();

        for &detector in &selected {
            for edge in &self.synergies {
                if edge.score < SUGGESTION_MIN_SCORE {
                    continue;
                }
                let Some(partner) = partner_of(&edge.a, &edge.b, detector) else {
                    continue;
                };
                if selected.contains(&partner)
                    || selected.iter().any(|s| self.conflict_between(s, partner).is_some())
                {
                    continue;
                }

                let entry = candidates.entry(partner).or_insert((None, 0, 0));
                if entry.0.is_none() {
                    entry.0 = edge.reason.as_ref().map(|r| format!("{r} (with {detector})"));
                }
                entry.1 += u32::from(edge.score);
                entry.2 += 1;
            }
        }

        let mut suggestions: Vec<Suggestion> = candidates
            .into_iter()
            .map(|(detector, (reason, total, count))| Suggestion {
                detector: detector.to_string(),
                reason: reason
                    .unwrap_or_else(|| "Good synergy with selected detectors".to_string()),
                avg_synergy: rounded_mean(total, count),
            })
            .collect();

        // BTreeMap iteration already orders ties by id; the sort is stable.
        suggestions.sort_by(|a, b| b.avg_synergy.cmp(&a.avg_synergy));
        suggestions.truncate(limit);
        suggestions
    }
}

/// Mean of scores that are each at most 100, rounded half up.
fn rounded_mean(total: u32, count: u32) -> u8 {
    let mean = (2 * total + count) / (2 * count.max(1));
    u8::try_from(mean).unwrap_or(u8::MAX)
}
