//! Many-to-one identifier lookups: every raw string is stored lowercased and in
//! its normalized form, and lookups try the exact form before the normalized one.

use std::collections::HashMap;

use crate::data::codes::IDENTIFIER_COLUMNS;
use crate::data::normalize::{exact_key, normalize_key};
use crate::data::resolver::{CountryResolver, IdentifierCandidates};
use crate::data::topology::GeoFeature;

#[derive(Debug, Clone)]
pub struct IdentifierIndex<T> {
    entries: HashMap<String, T>,
}

impl<T> Default for IdentifierIndex<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> IdentifierIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `raw` under both key forms. A later insert for the same key wins.
    pub fn insert(&mut self, raw: &str, value: T) {
        let exact = exact_key(raw);
        if exact.is_empty() {
            return;
        }
        let normalized = normalize_key(raw);
        if !normalized.is_empty() && normalized != exact {
            self.entries.insert(normalized, value.clone());
        }
        self.entries.insert(exact, value);
    }

    pub fn lookup(&self, raw: &str) -> Option<&T> {
        let exact = exact_key(raw);
        if exact.is_empty() {
            return None;
        }
        self.entries
            .get(&exact)
            .or_else(|| self.entries.get(&normalize_key(raw)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map features addressable by id, every identifier property and the
/// alpha-3 code the feature resolves to.
#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    features: Vec<GeoFeature>,
    index: IdentifierIndex<usize>,
}

impl FeatureIndex {
    /// Resolves features without metadata: alpha-3 properties, the numeric
    /// id table and bare 3-letter ids.
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self::resolved(features, &CountryResolver::default())
    }

    pub fn resolved(features: Vec<GeoFeature>, resolver: &CountryResolver) -> Self {
        let mut index = IdentifierIndex::new();
        for (position, feature) in features.iter().enumerate() {
            if let Some(id) = feature.id.as_deref() {
                index.insert(id, position);
            }
            for key in IDENTIFIER_COLUMNS.all() {
                if let Some(value) = feature.property(key) {
                    index.insert(value, position);
                }
            }
            let candidates = IdentifierCandidates::from_feature(feature);
            if let Some(code) = resolver.resolve(&candidates).code() {
                index.insert(code.as_str(), position);
            }
        }
        Self { features, index }
    }

    /// First feature matched by any of `identifiers`, tried in order.
    pub fn locate<'a, I>(&self, identifiers: I) -> Option<&GeoFeature>
    where
        I: IntoIterator<Item = &'a str>,
    {
        identifiers
            .into_iter()
            .filter(|raw| !raw.trim().is_empty())
            .find_map(|raw| self.index.lookup(raw))
            .and_then(|&position| self.features.get(position))
    }

    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
