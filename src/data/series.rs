//! Per-country yearly series, the long form of a wide indicator table.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::data::codes::CountryCode;

pub type YearSeries = BTreeMap<i32, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Gdp,
    LifeExpectancy,
    Population,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [Self::Gdp, Self::LifeExpectancy, Self::Population];

    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Gdp => "gdp_pcap.csv",
            Self::LifeExpectancy => "lex.csv",
            Self::Population => "pop.csv",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gdp => "gdp",
            Self::LifeExpectancy => "life_expectancy",
            Self::Population => "population",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical code → year → value. Absent years are simply missing keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeriesTable {
    series: BTreeMap<CountryCode, YearSeries>,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing series for `code`.
    pub fn insert(&mut self, code: CountryCode, series: YearSeries) {
        self.series.insert(code, series);
    }

    pub fn get(&self, code: &str) -> Option<&YearSeries> {
        self.series.get(code)
    }

    pub fn value(&self, code: &str, year: i32) -> Option<f64> {
        self.series.get(code)?.get(&year).copied()
    }

    pub fn codes(&self) -> impl Iterator<Item = &CountryCode> {
        self.series.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CountryCode, &YearSeries)> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Earliest and latest year with any value.
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let first = self.series.values().filter_map(|s| s.keys().next()).min()?;
        let last = self.series.values().filter_map(|s| s.keys().next_back()).max()?;
        Some((*first, *last))
    }
}

impl FromIterator<(CountryCode, YearSeries)> for SeriesTable {
    fn from_iter<I: IntoIterator<Item = (CountryCode, YearSeries)>>(iter: I) -> Self {
        Self {
            series: iter.into_iter().collect(),
        }
    }
}
