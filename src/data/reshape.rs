//! Wide-to-long reshaping: one row per country, one column per year, into a
//! [`SeriesTable`].

use std::path::Path;

use serde::Serialize;

use crate::config::YearBounds;
use crate::data::resolver::CountryResolver;
use crate::data::series::{SeriesTable, YearSeries};
use crate::data::table::{parse_number, read_csv_table, RawTable};
use crate::error::LoadError;

/// Row accounting for one reshape pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReshapeReport {
    pub rows_total: usize,
    pub rows_kept: usize,
    /// Rows no identifier strategy could place.
    pub rows_unresolved: usize,
    /// Resolved rows without a single numeric value in range.
    pub rows_empty: usize,
    pub year_columns: usize,
}

/// Year columns of `headers` that fall inside `bounds`, ascending.
pub fn detect_year_columns(headers: &[String], bounds: YearBounds) -> Vec<i32> {
    let mut years: Vec<i32> = headers.iter().filter_map(|h| bounds.parse_column(h)).collect();
    years.sort_unstable();
    years.dedup();
    years
}

pub fn reshape(table: &RawTable, resolver: &CountryResolver, bounds: YearBounds) -> SeriesTable {
    reshape_with_report(table, resolver, bounds).0
}

/// Unresolved rows and rows with no usable value are dropped. Blank or
/// non-numeric cells are absent, never zero. When two rows resolve to the same
/// code the later one wins.
pub fn reshape_with_report(
    table: &RawTable,
    resolver: &CountryResolver,
    bounds: YearBounds,
) -> (SeriesTable, ReshapeReport) {
    let mut series = SeriesTable::new();
    let mut report = ReshapeReport {
        rows_total: table.rows.len(),
        year_columns: detect_year_columns(&table.headers, bounds).len(),
        ..ReshapeReport::default()
    };

    for row in &table.rows {
        let is_year_column = |column: &str| bounds.parse_column(column).is_some();
        let Some(code) = resolver.resolve_row(row, is_year_column).into_code() else {
            report.rows_unresolved += 1;
            continue;
        };

        let values: YearSeries = row
            .iter()
            .filter_map(|(column, raw)| Some((bounds.parse_column(column)?, parse_number(raw)?)))
            .collect();
        if values.is_empty() {
            report.rows_empty += 1;
            continue;
        }

        series.insert(code, values);
        report.rows_kept += 1;
    }

    (series, report)
}

/// Reads a wide CSV and reshapes it; the report is logged at debug level.
pub fn load_series(
    path: &Path,
    resolver: &CountryResolver,
    bounds: YearBounds,
) -> Result<(SeriesTable, ReshapeReport), LoadError> {
    let table = read_csv_table(path)?;
    let (series, report) = reshape_with_report(&table, resolver, bounds);
    tracing::debug!(
        path = %path.display(),
        rows = report.rows_total,
        kept = report.rows_kept,
        unresolved = report.rows_unresolved,
        empty = report.rows_empty,
        "reshaped wide table"
    );
    Ok((series, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::codes::CountryCode;
    use crate::data::index::IdentifierIndex;
    use crate::data::table::RawRow;
    use std::collections::HashMap;

    fn resolver() -> CountryResolver {
        let mut names = IdentifierIndex::new();
        names.insert("Chad", CountryCode::parse("TCD").unwrap());
        CountryResolver::new(names, HashMap::new())
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|cells| RawRow::from_pairs(headers.iter().copied().zip(cells.iter().copied())))
                .collect(),
        }
    }

    #[test]
    fn blank_cells_are_absent_not_zero() {
        let raw = table(&["geo", "2000", "2001"], &[&["aaa", "50.5", ""]]);
        let series = reshape(&raw, &resolver(), YearBounds::default());
        let row = series.get("AAA").unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get(&2000), Some(&50.5));
        assert_eq!(row.get(&2001), None);
    }

    #[test]
    fn unresolved_and_empty_rows_are_dropped() {
        let raw = table(
            &["country", "1999", "2000"],
            &[&["Chad", "1", "2"], &["Atlantis", "3", "4"], &["Chad ", "", "n/a"]],
        );
        let (series, report) = reshape_with_report(&raw, &resolver(), YearBounds::default());
        assert_eq!(series.len(), 1);
        assert_eq!(series.value("TCD", 2000), Some(2.0));
        assert_eq!(report.rows_total, 3);
        assert_eq!(report.rows_unresolved, 1);
        assert_eq!(report.rows_empty, 1);
        assert_eq!(report.rows_kept, 1);
    }

    #[test]
    fn out_of_range_and_malformed_year_columns_are_ignored() {
        let bounds = YearBounds::new(1990, 2000);
        let raw = table(
            &["iso3", "abcd", "1989", "1995", "2001", "19950"],
            &[&["BBB", "1", "2", "3", "4", "5"]],
        );
        let (series, report) = reshape_with_report(&raw, &resolver(), bounds);
        assert_eq!(report.year_columns, 1);
        let row = series.get("BBB").unwrap();
        assert_eq!(row.keys().copied().collect::<Vec<_>>(), vec![1995]);
    }

    #[test]
    fn year_cells_are_not_mistaken_for_identifiers() {
        let raw = table(&["label", "2000"], &[&["Narnia", "NaN"]]);
        let (series, report) = reshape_with_report(&raw, &resolver(), YearBounds::default());
        assert!(series.is_empty());
        assert_eq!(report.rows_unresolved, 1);
    }

    #[test]
    fn reshape_is_idempotent() {
        let raw = table(
            &["geo", "name", "1990", "1991"],
            &[&["aaa", "A", "1.5", "2"], &["", "Chad", "7", ""]],
        );
        let first = reshape(&raw, &resolver(), YearBounds::default());
        let second = reshape(&raw, &resolver(), YearBounds::default());
        assert_eq!(first, second);
        assert_eq!(first.value("TCD", 1990), Some(7.0));
    }

    #[test]
    fn detects_sorted_unique_year_columns() {
        let headers: Vec<String> = ["2001", "name", " 2000", "2000", "3000"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(detect_year_columns(&headers, YearBounds::default()), vec![2000, 2001]);
    }
}
