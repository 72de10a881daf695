use serde::Serialize;

use crate::data::codes::CountryCode;
use crate::data::metadata::CountryTable;
use crate::data::series::SeriesTable;

/// One bubble on the motion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryPoint {
    pub code: CountryCode,
    pub name: String,
    pub region: String,
    /// Raw GDP per capita as stored in the series.
    pub gdp: f64,
    /// GDP raised to the floor for the log axis.
    pub gdp_display: f64,
    pub life_expectancy: f64,
    pub population: f64,
}

/// The three indicator tables a year slice is cut from.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorTables<'a> {
    pub gdp: &'a SeriesTable,
    pub life_expectancy: &'a SeriesTable,
    pub population: &'a SeriesTable,
}

/// Countries with all three indicators present at `year`, ordered by code.
/// Nothing is defaulted; a single missing value excludes the country.
pub fn points_for_year(
    countries: &CountryTable,
    tables: IndicatorTables<'_>,
    year: i32,
    gdp_floor: f64,
) -> Vec<CountryPoint> {
    tables
        .gdp
        .iter()
        .filter_map(|(code, gdp_series)| {
            let gdp = *gdp_series.get(&year)?;
            let life_expectancy = tables.life_expectancy.value(code.as_str(), year)?;
            let population = tables.population.value(code.as_str(), year)?;
            let record = countries.describe(code);
            Some(CountryPoint {
                code: code.clone(),
                name: record.name,
                region: record.region,
                gdp,
                gdp_display: gdp.max(gdp_floor),
                life_expectancy,
                population,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::metadata::{CountryRecord, OTHER_REGION, UNKNOWN_NAME};
    use crate::data::series::YearSeries;

    fn code(raw: &str) -> CountryCode {
        CountryCode::parse(raw).unwrap()
    }

    fn single(raw: &str, year: i32, value: f64) -> SeriesTable {
        [(code(raw), YearSeries::from([(year, value)]))]
            .into_iter()
            .collect()
    }

    #[test]
    fn a_missing_indicator_excludes_the_country() {
        let gdp = single("AAA", 2000, 100.0);
        let life = single("AAA", 2000, 70.0);
        let pop = SeriesTable::new();
        let tables = IndicatorTables {
            gdp: &gdp,
            life_expectancy: &life,
            population: &pop,
        };
        let points = points_for_year(&CountryTable::default(), tables, 2000, 100.0);
        assert!(points.iter().all(|p| p.code.as_str() != "AAA"));
        assert!(points.is_empty());
    }

    #[test]
    fn floor_only_touches_the_display_value() {
        let gdp = single("AAA", 1850, 40.0);
        let life = single("AAA", 1850, 31.5);
        let pop = single("AAA", 1850, 2.0e6);
        let mut countries = CountryTable::default();
        countries.insert(
            CountryRecord {
                code: code("AAA"),
                name: "Alpha".into(),
                region: "Europe".into(),
            },
            None,
        );
        let tables = IndicatorTables {
            gdp: &gdp,
            life_expectancy: &life,
            population: &pop,
        };
        let points = points_for_year(&countries, tables, 1850, 100.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].gdp, 40.0);
        assert_eq!(points[0].gdp_display, 100.0);
        assert_eq!(points[0].name, "Alpha");
        assert_eq!(gdp.value("AAA", 1850), Some(40.0));
    }

    #[test]
    fn series_codes_without_metadata_are_kept_as_unknown() {
        let gdp = single("XKX", 2010, 9_000.0);
        let life = single("XKX", 2010, 72.0);
        let pop = single("XKX", 2010, 1.8e6);
        let tables = IndicatorTables {
            gdp: &gdp,
            life_expectancy: &life,
            population: &pop,
        };
        let points = points_for_year(&CountryTable::default(), tables, 2010, 100.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, UNKNOWN_NAME);
        assert_eq!(points[0].region, OTHER_REGION);
    }
}
