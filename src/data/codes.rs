//! Canonical country code plus the fixed lookup tables used during resolution.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use crate::data::normalize::{letter_token, numeric_token};

/// ISO 3166-1 alpha-3 code, always three uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Accepts any three-letter token regardless of case or surrounding space.
    pub fn parse(value: &str) -> Option<Self> {
        letter_token(value, 3).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CountryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Column and property names that may identify a country, in lookup order.
/// Shared by wide-table rows, metadata rows and map features.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierColumns {
    /// Columns expected to hold an alpha-3 code.
    pub alpha3: &'static [&'static str],
    pub alpha2: &'static [&'static str],
    pub numeric: &'static [&'static str],
    pub name: &'static [&'static str],
}

pub const IDENTIFIER_COLUMNS: IdentifierColumns = IdentifierColumns {
    alpha3: &[
        "alpha-3",
        "alpha3",
        "iso_a3",
        "ISO_A3",
        "iso3",
        "ISO3",
        "iso",
        "Country Code",
        "Code",
        "geo",
        "ADM0_A3",
        "adm0_a3",
        "iso_a3_eh",
        "iso_a3_us",
        "A3",
        "abbrev",
    ],
    alpha2: &["alpha-2", "alpha2", "iso_a2", "ISO_A2"],
    numeric: &["country-code", "iso_n3", "ISO_N3", "numeric"],
    name: &[
        "name",
        "NAME",
        "country",
        "Country",
        "Country Name",
        "admin",
        "name_long",
    ],
};

impl IdentifierColumns {
    /// Every column in every group, codes first.
    pub fn all(&self) -> impl Iterator<Item = &'static str> {
        self.alpha3
            .iter()
            .chain(self.alpha2)
            .chain(self.numeric)
            .chain(self.name)
            .copied()
    }
}

/// Map-file abbreviations that differ from the metadata's official names.
/// Keys and values are uppercase.
pub const NAME_ALIASES: &[(&str, &str)] = &[
    ("BOSNIA AND HERZ.", "BOSNIA AND HERZEGOVINA"),
    ("SOLOMON IS.", "SOLOMON ISLANDS"),
    ("BRUNEI", "BRUNEI DARUSSALAM"),
    ("BOLIVIA", "BOLIVIA (PLURINATIONAL STATE OF)"),
];

/// ISO 3166-1 numeric ids seen in world-110m topologies. Known to be incomplete.
pub const ISO_NUMERIC_TO_ALPHA3: &[(&str, &str)] = &[
    ("4", "AFG"),
    ("8", "ALB"),
    ("12", "DZA"),
    ("24", "AGO"),
    ("32", "ARG"),
    ("36", "AUS"),
    ("40", "AUT"),
    ("51", "ARM"),
    ("50", "BGD"),
    ("56", "BEL"),
    ("68", "BOL"),
    ("76", "BRA"),
    ("124", "CAN"),
    ("152", "CHL"),
    ("156", "CHN"),
    ("170", "COL"),
    ("180", "COD"),
    ("188", "CRI"),
    ("191", "HRV"),
    ("196", "CYP"),
    ("208", "DNK"),
    ("262", "DJI"),
    ("276", "DEU"),
    ("300", "GRC"),
    ("344", "HKG"),
    ("356", "IND"),
    ("360", "IDN"),
    ("376", "ISR"),
    ("392", "JPN"),
    ("398", "KAZ"),
    ("404", "KEN"),
    ("484", "MEX"),
    ("528", "NLD"),
    ("554", "NZL"),
    ("586", "PAK"),
    ("643", "RUS"),
    ("764", "THA"),
    ("784", "ARE"),
    ("840", "USA"),
    ("858", "URY"),
    ("860", "UZB"),
    ("862", "VEN"),
    ("894", "ZMB"),
    ("710", "ZAF"),
    ("250", "FRA"),
    ("826", "GBR"),
    ("380", "ITA"),
    ("400", "JOR"),
    ("504", "MAR"),
    ("792", "TUR"),
    ("804", "UKR"),
    ("608", "PHL"),
    ("372", "IRL"),
    ("226", "GNQ"),
    ("140", "CAF"),
    ("728", "SSD"),
    ("834", "TZA"),
    ("807", "MKD"),
    ("498", "MDA"),
    ("275", "PSE"),
    ("760", "SYR"),
    ("238", "FLK"),
    ("540", "NCL"),
    ("364", "IRN"),
    ("418", "LAO"),
    ("704", "VNM"),
    ("408", "PRK"),
    ("410", "KOR"),
    ("732", "ESH"),
    ("96", "BRN"),
    ("214", "DOM"),
    ("90", "SLB"),
    ("70", "BIH"),
    ("212", "DMA"),
];

/// Canonical spelling for a known abbreviated name; `upper_name` must be uppercase.
pub fn alias_for(upper_name: &str) -> Option<&'static str> {
    NAME_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper_name)
        .map(|(_, canonical)| *canonical)
}

pub fn numeric_to_alpha3(raw: &str) -> Option<CountryCode> {
    let token = numeric_token(raw)?;
    ISO_NUMERIC_TO_ALPHA3
        .iter()
        .find(|(numeric, _)| *numeric == token)
        .and_then(|(_, alpha3)| CountryCode::parse(alpha3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_code_parse_uppercases_three_letters() {
        assert_eq!(CountryCode::parse(" fra").map(|c| c.to_string()), Some("FRA".into()));
        assert!(CountryCode::parse("FR").is_none());
        assert!(CountryCode::parse("840").is_none());
    }

    #[test]
    fn numeric_table_accepts_padded_ids() {
        assert_eq!(numeric_to_alpha3("840").map(|c| c.to_string()), Some("USA".into()));
        assert_eq!(numeric_to_alpha3("004").map(|c| c.to_string()), Some("AFG".into()));
        assert!(numeric_to_alpha3("999").is_none());
        assert!(numeric_to_alpha3("USA").is_none());
    }

    #[test]
    fn numeric_table_has_no_duplicate_ids() {
        let mut ids: Vec<&str> = ISO_NUMERIC_TO_ALPHA3.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ISO_NUMERIC_TO_ALPHA3.len());
        assert!(ISO_NUMERIC_TO_ALPHA3
            .iter()
            .all(|(_, code)| CountryCode::parse(code).is_some()));
    }

    #[test]
    fn aliases_map_map_abbreviations() {
        assert_eq!(alias_for("SOLOMON IS."), Some("SOLOMON ISLANDS"));
        assert_eq!(alias_for("FRANCE"), None);
    }
}
