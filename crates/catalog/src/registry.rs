use crate::builtin::builtin_detectors;
use crate::error::CatalogError;
use crate::presets::builtin_presets;
use crate::regimes::{RegimeFit, builtin_regimes};
use crate::styles::{StyleProfile, builtin_styles};
use core_types::{
    CategoryCounts, DetectorCategory, DetectorMeta, MarketRegime, Preset, TradingStyle,
};
use std::collections::HashMap;

/// The detector registry: an immutable, ordered set of detector metadata plus the
/// presets, style profiles and regime fits defined over it.
///
/// Built once at start-up and shared by reference. There is no mutation API.
#[derive(Debug, Clone)]
pub struct Catalog {
    detectors: Vec<DetectorMeta>,
    index: HashMap<String, usize>,
    presets: Vec<Preset>,
    styles: Vec<StyleProfile>,
    regimes: Vec<RegimeFit>,
}

fn is_canonical_id(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

impl Catalog {
    /// Creates a catalog from detectors in registration order and the presets over them.
    pub fn new(detectors: Vec<DetectorMeta>, presets: Vec<Preset>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(detectors.len());
        for (position, meta) in detectors.iter().enumerate() {
            if !is_canonical_id(&meta.id) {
                return Err(CatalogError::MalformedId(meta.id.clone()));
            }
            if index.insert(meta.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateDetector(meta.id.clone()));
            }
        }

        let mut seen_presets: Vec<String> = Vec::with_capacity(presets.len());
        for preset in &presets {
            let key = preset.id.to_lowercase();
            if seen_presets.contains(&key) {
                return Err(CatalogError::DuplicatePreset(preset.id.clone()));
            }
            seen_presets.push(key);

            if let Some(missing) = preset.detectors.iter().find(|id| !index.contains_key(*id)) {
                return Err(CatalogError::UnknownPresetMember {
                    preset: preset.id.clone(),
                    detector: missing.clone(),
                });
            }
        }

        Ok(Self {
            detectors,
            index,
            presets,
            styles: Vec::new(),
            regimes: Vec::new(),
        })
    }

    /// Attaches style profiles, checking that every detector they mention exists.
    pub fn with_styles(mut self, styles: Vec<StyleProfile>) -> Result<Self, CatalogError> {
        for profile in &styles {
            let mentioned = profile
                .recommended()
                .chain(profile.incompatible.iter().map(String::as_str));
            for id in mentioned {
                if !self.contains(id) {
                    return Err(CatalogError::UnknownStyleMember {
                        style: profile.style.to_string(),
                        detector: id.to_string(),
                    });
                }
            }
        }
        self.styles = styles;
        Ok(self)
    }

    /// Attaches regime fits. Detectors without an entry are treated as fitting every
    /// regime.
    pub fn with_regimes(mut self, regimes: Vec<RegimeFit>) -> Result<Self, CatalogError> {
        if let Some(fit) = regimes.iter().find(|fit| !self.contains(&fit.detector)) {
            return Err(CatalogError::UnknownRegimeMember(fit.detector.clone()));
        }
        self.regimes = regimes;
        Ok(self)
    }

    /// The catalog shipped with the application: 31 detectors, the built-in presets,
    /// the five style profiles and the regime table.
    pub fn builtin() -> Result<Self, CatalogError> {
        let detectors = builtin_detectors();
        let presets = builtin_presets(&detectors);
        let catalog = Self::new(detectors, presets)?
            .with_styles(builtin_styles())?
            .with_regimes(builtin_regimes())?;
        tracing::debug!(
            detectors = catalog.len(),
            presets = catalog.presets.len(),
            "Built-in catalog loaded."
        );
        Ok(catalog)
    }

    // --- Detector lookups ---

    /// Exact canonical lookup. No normalization is applied.
    pub fn get_by_id(&self, id: &str) -> Option<&DetectorMeta> {
        self.index.get(id).map(|&i| &self.detectors[i])
    }

    pub fn require(&self, id: &str) -> Result<&DetectorMeta, CatalogError> {
        self.get_by_id(id)
            .ok_or_else(|| CatalogError::DetectorNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All detectors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DetectorMeta> {
        self.detectors.iter()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    pub fn list_by_category(&self, category: DetectorCategory) -> Vec<&DetectorMeta> {
        self.detectors.iter().filter(|d| d.category == category).collect()
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts::from_categories(self.detectors.iter().map(|d| d.category))
    }

    /// Case-insensitive substring match over id, labels, description and tags.
    /// A blank query returns every detector.
    pub fn search(&self, query: &str) -> Vec<&DetectorMeta> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.detectors.iter().collect();
        }
        self.detectors
            .iter()
            .filter(|d| {
                [
                    d.id.as_str(),
                    d.label_primary.as_str(),
                    d.label_secondary.as_str(),
                    d.label_short.as_str(),
                    d.description.as_str(),
                ]
                .into_iter()
                .chain(d.tags.iter().map(String::as_str))
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    // --- Required detectors ---

    /// Ids flagged `required`, in registration order.
    pub fn required_ids(&self) -> Vec<&str> {
        self.detectors
            .iter()
            .filter(|d| d.required)
            .map(|d| d.id.as_str())
            .collect()
    }

    /// Returns `ids` with any missing required detectors prepended in catalog order.
    pub fn ensure_required<S: AsRef<str>>(&self, ids: &[S]) -> Vec<String> {
        let missing = self
            .required_ids()
            .into_iter()
            .filter(|req| !ids.iter().any(|id| id.as_ref() == *req))
            .map(str::to_string);
        missing
            .chain(ids.iter().map(|id| id.as_ref().to_string()))
            .collect()
    }

    // --- Presets ---

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Looks a preset up by id, ignoring case.
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        let name = name.trim();
        self.presets.iter().find(|p| p.id.eq_ignore_ascii_case(name))
    }

    pub fn list_preset(&self, name: &str) -> Option<&[String]> {
        self.preset(name).map(|p| p.detectors.as_slice())
    }

    // --- Trading styles ---

    pub fn styles(&self) -> &[StyleProfile] {
        &self.styles
    }

    pub fn style_profile(&self, style: TradingStyle) -> Option<&StyleProfile> {
        self.styles.iter().find(|p| p.style == style)
    }

    /// Recommended gates, triggers and confluence for `style`, in that order.
    pub fn recommended_for_style(&self, style: TradingStyle) -> Vec<&str> {
        self.style_profile(style)
            .map(|p| p.recommended().collect())
            .unwrap_or_default()
    }

    /// Why `detector` works against `style`, or `None` when they are compatible.
    pub fn incompatibility_reason(&self, detector: &str, style: TradingStyle) -> Option<String> {
        self.style_profile(style)?.incompatibility_reason(detector)
    }

    /// The style with the highest strictly positive affinity for `ids`. Ties keep
    /// declaration order.
    pub fn suggest_style<S: AsRef<str>>(&self, ids: &[S]) -> Option<TradingStyle> {
        let mut best: Option<(TradingStyle, i32)> = None;
        for profile in &self.styles {
            let score = profile.affinity(ids);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((profile.style, score));
            }
        }
        best.map(|(style, _)| style)
    }

    // --- Market regimes ---

    pub fn regime_fit(&self, detector: &str) -> Option<&RegimeFit> {
        self.regimes.iter().find(|fit| fit.detector == detector)
    }

    /// Ids without a regime entry, unknown ids included, are compatible.
    pub fn is_regime_compatible(&self, detector: &str, regime: MarketRegime) -> bool {
        self.regime_fit(detector).is_none_or(|fit| fit.fits(regime))
    }

    /// Regime fits of the detectors in `ids` that do not suit `regime`, in input
    /// order. Nothing is flagged against `Unknown`.
    pub fn regime_incompatible<S: AsRef<str>>(
        &self,
        ids: &[S],
        regime: MarketRegime,
    ) -> Vec<&RegimeFit> {
        if regime == MarketRegime::Unknown {
            return Vec::new();
        }
        ids.iter()
            .filter_map(|id| self.regime_fit(id.as_ref()))
            .filter(|fit| !fit.fits(regime))
            .collect()
    }

    /// Tradable regimes every detector in `ids` suits. An empty selection suits all
    /// of them.
    pub fn compatible_regimes<S: AsRef<str>>(&self, ids: &[S]) -> Vec<MarketRegime> {
        MarketRegime::TRADABLE
            .into_iter()
            .filter(|&regime| ids.iter().all(|id| self.is_regime_compatible(id.as_ref(), regime)))
            .collect()
    }
}
