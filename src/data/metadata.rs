//! Canonical country records from the ISO-3166 metadata file.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::Serialize;

use crate::data::codes::{CountryCode, IDENTIFIER_COLUMNS};
use crate::data::index::IdentifierIndex;
use crate::data::normalize::letter_token;
use crate::data::resolver::{scan_row_for_code, CountryResolver, IdentifierCandidates};
use crate::data::table::{read_csv_table, RawTable};
use crate::data::topology::GeoFeature;
use crate::error::LoadError;

pub const DEFAULT_METADATA_FILE: &str = "ISO-3166-Countries-with-Regional-Codes.csv";

pub const UNKNOWN_NAME: &str = "Unknown";
pub const OTHER_REGION: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRecord {
    pub code: CountryCode,
    pub name: String,
    pub region: String,
}

/// Collapses the metadata's region/sub-region pair into the dashboard's
/// regions, splitting the Americas into north and south.
pub fn classify_region(region: &str, sub_region: &str) -> String {
    let region = region.trim();
    let region = if region.is_empty() { OTHER_REGION } else { region };
    if sub_region.contains("Northern America") {
        "North America".to_string()
    } else if sub_region.contains("Latin America") || sub_region.contains("Caribbean") {
        "South/Latin America".to_string()
    } else if region.contains("Oceania") {
        "Oceania".to_string()
    } else if region == "Americas" {
        "Americas (Unspecified)".to_string()
    } else {
        region.to_string()
    }
}

/// Immutable code → record table plus the alpha-2 codes seen alongside.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    records: BTreeMap<CountryCode, CountryRecord>,
    alpha2: HashMap<String, CountryCode>,
}

impl CountryTable {
    /// One record per metadata row that carries an alpha-3 code. Later rows
    /// for the same code replace earlier ones.
    pub fn from_metadata(table: &RawTable) -> Self {
        let mut countries = Self::default();
        for row in &table.rows {
            let code = IdentifierCandidates::from_row(row)
                .direct_code()
                .or_else(|| scan_row_for_code(row, |_| false));
            let Some(code) = code else {
                continue;
            };
            let name = row.non_empty("name").unwrap_or(UNKNOWN_NAME).to_string();
            let region = classify_region(
                row.non_empty("region").unwrap_or_default(),
                row.non_empty("sub-region").unwrap_or_default(),
            );
            let alpha2 = row
                .first_non_empty(IDENTIFIER_COLUMNS.alpha2)
                .and_then(|raw| letter_token(raw, 2));
            countries.insert(CountryRecord { code, name, region }, alpha2);
        }
        countries
    }

    /// Fallback when the metadata file yields nothing: one record per map
    /// feature whose id or properties identify a country.
    pub fn from_features(features: &[GeoFeature]) -> Self {
        let bare = CountryResolver::default();
        let mut countries = Self::default();
        for feature in features {
            let Some(code) = bare.resolve(&IdentifierCandidates::from_feature(feature)).into_code()
            else {
                continue;
            };
            let record = CountryRecord {
                code,
                name: feature.name().unwrap_or(UNKNOWN_NAME).to_string(),
                region: feature.property("region").unwrap_or(OTHER_REGION).to_string(),
            };
            let alpha2 = feature
                .property("iso_a2")
                .and_then(|raw| letter_token(raw, 2));
            countries.insert(record, alpha2);
        }
        countries
    }

    pub fn insert(&mut self, record: CountryRecord, alpha2: Option<String>) {
        if let Some(alpha2) = alpha2 {
            self.alpha2.insert(alpha2, record.code.clone());
        }
        self.records.insert(record.code.clone(), record);
    }

    pub fn get(&self, code: &str) -> Option<&CountryRecord> {
        self.records.get(code)
    }

    /// The stored record, or an `Unknown`/`Other` stand-in for codes that only
    /// appear in the series files.
    pub fn describe(&self, code: &CountryCode) -> CountryRecord {
        self.records.get(code).cloned().unwrap_or_else(|| CountryRecord {
            code: code.clone(),
            name: UNKNOWN_NAME.to_string(),
            region: OTHER_REGION.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> {
        self.records.values()
    }

    /// Distinct regions in first-sorted order.
    pub fn regions(&self) -> Vec<String> {
        self.records
            .values()
            .map(|r| r.region.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolver whose name table is keyed by every record's display name.
    pub fn resolver(&self) -> CountryResolver {
        let mut names = IdentifierIndex::new();
        for record in self.records.values().filter(|r| r.name != UNKNOWN_NAME) {
            names.insert(&record.name, record.code.clone());
        }
        CountryResolver::new(names, self.alpha2.clone())
    }
}

pub fn load_country_table(path: &Path) -> Result<CountryTable, LoadError> {
    let table = read_csv_table(path)?;
    Ok(CountryTable::from_metadata(&table))
}
