//! Wealth and health over time: GDP per capita against life expectancy,
//! sized by population, for every country and year.

pub mod choropleth;
pub mod hierarchy;
pub mod kpi;
pub mod playback;
pub mod points;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{DashboardConfig, YearBounds};
use crate::data::metadata::{load_country_table, CountryRecord, CountryTable, DEFAULT_METADATA_FILE};
use crate::data::reshape::{load_series, reshape_with_report, ReshapeReport};
use crate::data::resolver::CountryResolver;
use crate::data::series::{Indicator, SeriesTable};
use crate::data::table::RawTable;
use crate::data::topology::{load_features, GeoFeature, DEFAULT_COUNTRIES_OBJECT};
use crate::error::LoadError;

pub use choropleth::{MapShade, ResolvedFeature};
pub use hierarchy::{CountryLeaf, RegionNode};
pub use kpi::TrendsKpis;
pub use playback::Playback;
pub use points::{CountryPoint, IndicatorTables};

pub const DEFAULT_TOPOLOGY_FILE: &str = "world-110m.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsSources {
    pub metadata: PathBuf,
    pub gdp: PathBuf,
    pub life_expectancy: PathBuf,
    pub population: PathBuf,
    pub topology: PathBuf,
}

impl TrendsSources {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            metadata: dir.join(DEFAULT_METADATA_FILE),
            gdp: dir.join(Indicator::Gdp.default_file_name()),
            life_expectancy: dir.join(Indicator::LifeExpectancy.default_file_name()),
            population: dir.join(Indicator::Population.default_file_name()),
            topology: dir.join(DEFAULT_TOPOLOGY_FILE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendsSettings {
    pub years: YearBounds,
    pub gdp_floor: f64,
}

impl Default for TrendsSettings {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for TrendsSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            years: config.years,
            gdp_floor: config.gdp_floor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountrySource {
    Metadata,
    /// Metadata yielded nothing and the map features stood in.
    Features,
}

/// Load diagnostics, printed by `geodash check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsSummary {
    pub country_source: CountrySource,
    pub countries: usize,
    pub regions: Vec<String>,
    pub features: usize,
    pub features_resolved: usize,
    pub gdp: ReshapeReport,
    pub life_expectancy: ReshapeReport,
    pub population: ReshapeReport,
    pub year_extent: Option<(i32, i32)>,
}

/// The active selection. Replaced, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsFilter {
    pub year: i32,
}

/// Everything the dashboard draws for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsView {
    pub year: i32,
    pub points: Vec<CountryPoint>,
    pub kpis: TrendsKpis,
    pub regions: Vec<RegionNode>,
    pub map: Vec<MapShade>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct IndicatorReports {
    gdp: ReshapeReport,
    life_expectancy: ReshapeReport,
    population: ReshapeReport,
}

/// Loaded, resolved and reshaped inputs. Immutable after construction.
#[derive(Debug, Clone)]
pub struct TrendsDataset {
    countries: CountryTable,
    country_source: CountrySource,
    resolver: CountryResolver,
    gdp: SeriesTable,
    life_expectancy: SeriesTable,
    population: SeriesTable,
    features: Vec<ResolvedFeature>,
    settings: TrendsSettings,
    reports: IndicatorReports,
}

impl TrendsDataset {
    /// Loads every input or fails on the first unreadable one.
    pub fn load(sources: &TrendsSources, settings: TrendsSettings) -> Result<Self, LoadError> {
        let features = load_features(&sources.topology, DEFAULT_COUNTRIES_OBJECT)?;
        let metadata = load_country_table(&sources.metadata)?;
        let (countries, country_source) = if metadata.is_empty() {
            tracing::warn!(
                path = %sources.metadata.display(),
                "metadata yielded no countries; falling back to map features"
            );
            (CountryTable::from_features(&features), CountrySource::Features)
        } else {
            (metadata, CountrySource::Metadata)
        };
        if countries.is_empty() {
            return Err(LoadError::Empty {
                path: sources.metadata.clone(),
            });
        }

        let resolver = countries.resolver();
        let (gdp, gdp_report) = load_series(&sources.gdp, &resolver, settings.years)?;
        let (life_expectancy, life_report) =
            load_series(&sources.life_expectancy, &resolver, settings.years)?;
        let (population, population_report) =
            load_series(&sources.population, &resolver, settings.years)?;

        let mut dataset = Self::from_parts(countries, features, gdp, life_expectancy, population, settings);
        dataset.country_source = country_source;
        dataset.reports = IndicatorReports {
            gdp: gdp_report,
            life_expectancy: life_report,
            population: population_report,
        };
        tracing::info!(
            countries = dataset.countries.len(),
            gdp = dataset.gdp.len(),
            life_expectancy = dataset.life_expectancy.len(),
            population = dataset.population.len(),
            "trends dataset loaded"
        );
        Ok(dataset)
    }

    /// Assembles a dataset from already loaded parts.
    pub fn from_parts(
        countries: CountryTable,
        features: Vec<GeoFeature>,
        gdp: SeriesTable,
        life_expectancy: SeriesTable,
        population: SeriesTable,
        settings: TrendsSettings,
    ) -> Self {
        let resolver = countries.resolver();
        let features = choropleth::resolve_features(&features, &resolver);
        Self {
            countries,
            country_source: CountrySource::Metadata,
            resolver,
            gdp,
            life_expectancy,
            population,
            features,
            settings,
            reports: IndicatorReports::default(),
        }
    }

    pub fn settings(&self) -> TrendsSettings {
        self.settings
    }

    /// The canonical country table, ordered by code.
    pub fn countries(&self) -> Vec<&CountryRecord> {
        self.countries.iter().collect()
    }

    pub fn country_table(&self) -> &CountryTable {
        &self.countries
    }

    pub fn series(&self, indicator: Indicator) -> &SeriesTable {
        match indicator {
            Indicator::Gdp => &self.gdp,
            Indicator::LifeExpectancy => &self.life_expectancy,
            Indicator::Population => &self.population,
        }
    }

    fn tables(&self) -> IndicatorTables<'_> {
        IndicatorTables {
            gdp: &self.gdp,
            life_expectancy: &self.life_expectancy,
            population: &self.population,
        }
    }

    pub fn points_for_year(&self, year: i32) -> Vec<CountryPoint> {
        points::points_for_year(&self.countries, self.tables(), year, self.settings.gdp_floor)
    }

    /// Reshapes another wide table against this dataset's resolver.
    pub fn reshape(&self, table: &RawTable) -> (SeriesTable, ReshapeReport) {
        reshape_with_report(table, &self.resolver, self.settings.years)
    }

    /// The view for the filter's year, clamped into the configured bounds.
    pub fn on_filter_changed(&self, filter: &TrendsFilter) -> TrendsView {
        let year = self.settings.years.clamp(filter.year);
        let points = self.points_for_year(year);
        TrendsView {
            year,
            kpis: kpi::trends_kpis(&points),
            regions: hierarchy::region_hierarchy(&points),
            map: choropleth::shade_features(&self.features, &self.life_expectancy, year),
            points,
        }
    }

    pub fn summary(&self) -> TrendsSummary {
        let year_extent = [&self.gdp, &self.life_expectancy, &self.population]
            .iter()
            .filter_map(|table| table.year_extent())
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
        TrendsSummary {
            country_source: self.country_source,
            countries: self.countries.len(),
            regions: self.countries.regions(),
            features: self.features.len(),
            features_resolved: self.features.iter().filter(|f| f.code.is_some()).count(),
            gdp: self.reports.gdp.clone(),
            life_expectancy: self.reports.life_expectancy.clone(),
            population: self.reports.population.clone(),
            year_extent,
        }
    }
}
