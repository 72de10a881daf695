use std::path::Path;

use serde::Serialize;

use crate::data::table::{parse_number, read_csv_table, RawRow, RawTable};
use crate::error::LoadError;

pub const DEFAULT_PLANTS_FILE: &str = "global_power_plant_database.csv";

pub const UNKNOWN_FUEL: &str = "Unknown";

const FUEL_COLUMNS: &[&str] = &["primary_fuel", "primary_fuel_type", "fuel"];
const COUNTRY_COLUMNS: &[&str] = &["country", "country_short"];
const COUNTRY_LONG_COLUMNS: &[&str] = &["country_long", "country_long_name"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerPlant {
    pub name: String,
    /// Short country field, usually an ISO alpha-3 code. May be empty.
    pub country: String,
    pub country_long: String,
    pub fuel: String,
    pub capacity_mw: f64,
    /// Commissioning year; fractional in the source data.
    pub year: Option<f64>,
    pub lat: f64,
    pub lon: f64,
}

impl PowerPlant {
    /// Parses one CSV row. Rows without a location or a positive capacity
    /// are not plants and yield `None`.
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let lat = row.get("latitude").and_then(parse_number)?;
        let lon = row.get("longitude").and_then(parse_number)?;
        let capacity_mw = row
            .get("capacity_mw")
            .and_then(parse_number)
            .filter(|c| *c > 0.0)?;
        let text = |columns: &[&str]| row.first_non_empty(columns).unwrap_or_default().to_string();
        Some(Self {
            name: text(&["name"]),
            country: text(COUNTRY_COLUMNS),
            country_long: text(COUNTRY_LONG_COLUMNS),
            fuel: row.first_non_empty(FUEL_COLUMNS).unwrap_or(UNKNOWN_FUEL).to_string(),
            capacity_mw,
            year: row
                .get("commissioning_year")
                .and_then(parse_number)
                .filter(|y| *y > 0.0),
            lat,
            lon,
        })
    }

    /// Key used to group plants by country: the short field, then the long
    /// name, then `UNKNOWN`.
    pub fn country_key(&self) -> &str {
        if !self.country.is_empty() {
            &self.country
        } else if !self.country_long.is_empty() {
            &self.country_long
        } else {
            "UNKNOWN"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlantLoadReport {
    pub rows_total: usize,
    pub rows_kept: usize,
    pub rows_without_year: usize,
}

pub fn plants_from_table(table: &RawTable) -> (Vec<PowerPlant>, PlantLoadReport) {
    let plants: Vec<PowerPlant> = table.rows.iter().filter_map(PowerPlant::from_row).collect();
    let report = PlantLoadReport {
        rows_total: table.len(),
        rows_kept: plants.len(),
        rows_without_year: plants.iter().filter(|p| p.year.is_none()).count(),
    };
    (plants, report)
}

/// Reads the plant database; a file with no usable plant is a load failure.
pub fn load_plants(path: &Path) -> Result<(Vec<PowerPlant>, PlantLoadReport), LoadError> {
    let table = read_csv_table(path)?;
    let (plants, report) = plants_from_table(&table);
    if plants.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(
        path = %path.display(),
        rows = report.rows_total,
        kept = report.rows_kept,
        "parsed plant records"
    );
    Ok((plants, report))
}
