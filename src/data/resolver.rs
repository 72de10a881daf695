//! Country identifier resolution. Precision over recall: only exact and
//! normalized-exact matches plus the fixed alias and numeric tables, never
//! fuzzy matching. A record that cannot be placed stays `Unresolved`.

use std::collections::HashMap;

use crate::data::codes::{alias_for, numeric_to_alpha3, CountryCode, IDENTIFIER_COLUMNS};
use crate::data::index::IdentifierIndex;
use crate::data::normalize::letter_token;
use crate::data::table::RawRow;
use crate::data::topology::GeoFeature;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(CountryCode),
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn code(&self) -> Option<&CountryCode> {
        match self {
            Self::Resolved(code) => Some(code),
            Self::Unresolved => None,
        }
    }

    pub fn into_code(self) -> Option<CountryCode> {
        match self {
            Self::Resolved(code) => Some(code),
            Self::Unresolved => None,
        }
    }
}

impl From<Option<CountryCode>> for Resolution {
    fn from(code: Option<CountryCode>) -> Self {
        code.map_or(Self::Unresolved, Self::Resolved)
    }
}

/// The fields a source offers for identifying a country. Any subset may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierCandidates {
    /// Values from alpha-3 style columns, in lookup order.
    pub codes: Vec<String>,
    pub alpha2: Option<String>,
    pub name: Option<String>,
    pub numeric_id: Option<String>,
    /// A source's own id (map feature id), tried last.
    pub id: Option<String>,
}

impl IdentifierCandidates {
    /// Looks up [`IDENTIFIER_COLUMNS`] through `lookup`, which returns trimmed
    /// non-blank values.
    pub fn from_fields<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let first = |columns: &[&str]| columns.iter().find_map(|c| lookup(c)).map(str::to_string);
        Self {
            codes: IDENTIFIER_COLUMNS
                .alpha3
                .iter()
                .filter_map(|c| lookup(c))
                .map(str::to_string)
                .collect(),
            alpha2: first(IDENTIFIER_COLUMNS.alpha2),
            name: first(IDENTIFIER_COLUMNS.name),
            numeric_id: first(IDENTIFIER_COLUMNS.numeric),
            id: None,
        }
    }

    pub fn from_row(row: &RawRow) -> Self {
        Self::from_fields(|column| row.non_empty(column))
    }

    pub fn from_feature(feature: &GeoFeature) -> Self {
        Self {
            id: feature.id.clone(),
            ..Self::from_fields(|key| feature.property(key))
        }
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_numeric_id(mut self, numeric_id: &str) -> Self {
        self.numeric_id = Some(numeric_id.to_string());
        self
    }

    /// The first candidate that already is a well-formed alpha-3 code.
    pub fn direct_code(&self) -> Option<CountryCode> {
        self.codes.iter().find_map(|c| CountryCode::parse(c))
    }
}

/// Name and alpha-2 tables built from authoritative metadata.
#[derive(Debug, Clone, Default)]
pub struct CountryResolver {
    names: IdentifierIndex<CountryCode>,
    alpha2: HashMap<String, CountryCode>,
}

impl CountryResolver {
    pub fn new(names: IdentifierIndex<CountryCode>, alpha2: HashMap<String, CountryCode>) -> Self {
        Self { names, alpha2 }
    }

    /// First strategy that yields a code wins:
    /// alpha-3 field, metadata name (after aliasing) or alpha-2,
    /// numeric id table, then the bare id as a 3-letter token.
    pub fn resolve(&self, candidates: &IdentifierCandidates) -> Resolution {
        if let Some(code) = candidates.direct_code() {
            return Resolution::Resolved(code);
        }
        if let Some(code) = candidates.name.as_deref().and_then(|n| self.resolve_name(n)) {
            return Resolution::Resolved(code);
        }
        if let Some(code) = candidates.alpha2.as_deref().and_then(|c| self.resolve_alpha2(c)) {
            return Resolution::Resolved(code);
        }
        let numeric = candidates
            .numeric_id
            .as_deref()
            .and_then(numeric_to_alpha3)
            .or_else(|| candidates.id.as_deref().and_then(numeric_to_alpha3));
        if let Some(code) = numeric {
            return Resolution::Resolved(code);
        }
        candidates
            .id
            .as_deref()
            .and_then(CountryCode::parse)
            .into()
    }

    /// Metadata name lookup, applying the alias table to the uppercased name first.
    pub fn resolve_name(&self, raw: &str) -> Option<CountryCode> {
        let upper = raw.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }
        let target = alias_for(&upper).unwrap_or(&upper);
        self.names.lookup(target).cloned()
    }

    pub fn resolve_alpha2(&self, raw: &str) -> Option<CountryCode> {
        let token = letter_token(raw, 2)?;
        self.alpha2.get(&token).cloned()
    }

    /// Resolves a row from its identifier columns, then scans every column
    /// that `skip` does not exclude for a bare 3-letter token.
    pub fn resolve_row<F>(&self, row: &RawRow, skip: F) -> Resolution
    where
        F: Fn(&str) -> bool,
    {
        match self.resolve(&IdentifierCandidates::from_row(row)) {
            Resolution::Unresolved => scan_row_for_code(row, skip).into(),
            resolved => resolved,
        }
    }
}

/// First cell (outside the skipped columns) that holds a bare 3-letter token.
pub fn scan_row_for_code<F>(row: &RawRow, skip: F) -> Option<CountryCode>
where
    F: Fn(&str) -> bool,
{
    row.iter()
        .filter(|(column, _)| !skip(column))
        .find_map(|(_, value)| CountryCode::parse(value))
}
