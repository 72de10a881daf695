//! Global power plants: capacity by fuel, country and commissioning year,
//! filtered by fuel and year range.

pub mod aggregate;
pub mod filter;
pub mod record;
pub mod timeline;
pub mod viewport;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::data::index::FeatureIndex;
use crate::data::topology::{load_features, GeoFeature, DEFAULT_COUNTRIES_OBJECT};
use crate::error::LoadError;
use crate::trends::DEFAULT_TOPOLOGY_FILE;

pub use aggregate::{CountryCapacity, FuelCapacity, PlantKpis};
pub use filter::{FilterState, YearRange};
pub use record::{PlantLoadReport, PowerPlant, DEFAULT_PLANTS_FILE};
pub use timeline::{StackLayer, Timeline};
pub use viewport::{LayerSettings, MapLayer, Viewport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantSources {
    pub plants: PathBuf,
    pub topology: PathBuf,
}

impl PlantSources {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            plants: dir.join(DEFAULT_PLANTS_FILE),
            topology: dir.join(DEFAULT_TOPOLOGY_FILE),
        }
    }
}

pub type PlantSettings = LayerSettings;

/// Everything the dashboard draws for one filter state, apart from the
/// zoom-dependent map layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantView {
    pub filter: FilterState,
    pub kpis: PlantKpis,
    pub fuels: Vec<FuelCapacity>,
    pub timeline: Timeline,
    pub countries: Vec<CountryCapacity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantSummary {
    pub plants: PlantLoadReport,
    pub features: usize,
    pub fuels: Vec<String>,
    pub year_extent: YearRange,
    pub countries_located: usize,
    pub countries_unlocated: Vec<String>,
}

/// Parsed plants and the country features they are placed on. Immutable
/// after construction.
#[derive(Debug, Clone)]
pub struct PlantDataset {
    plants: Vec<PowerPlant>,
    features: FeatureIndex,
    extent: YearRange,
    fuels: Vec<String>,
    settings: PlantSettings,
    report: PlantLoadReport,
}

impl PlantDataset {
    pub fn load(sources: &PlantSources, settings: PlantSettings) -> Result<Self, LoadError> {
        let features = load_features(&sources.topology, DEFAULT_COUNTRIES_OBJECT)?;
        let (plants, report) = record::load_plants(&sources.plants)?;
        let mut dataset = Self::from_parts(plants, features, settings);
        dataset.report = report;
        tracing::info!(
            plants = dataset.plants.len(),
            fuels = dataset.fuels.len(),
            from = dataset.extent.from,
            to = dataset.extent.to,
            "plant dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_parts(plants: Vec<PowerPlant>, features: Vec<GeoFeature>, settings: PlantSettings) -> Self {
        let report = PlantLoadReport {
            rows_total: plants.len(),
            rows_kept: plants.len(),
            rows_without_year: plants.iter().filter(|p| p.year.is_none()).count(),
        };
        Self {
            extent: aggregate::year_extent(&plants),
            fuels: aggregate::fuel_domain(&plants),
            features: FeatureIndex::new(features),
            plants,
            settings,
            report,
        }
    }

    pub fn plants(&self) -> &[PowerPlant] {
        &self.plants
    }

    pub fn year_extent(&self) -> YearRange {
        self.extent
    }

    /// Fuel colour domain: known fuels first, then the rest as first seen.
    pub fn fuel_domain(&self) -> &[String] {
        &self.fuels
    }

    pub fn settings(&self) -> PlantSettings {
        self.settings
    }

    /// No fuel, full year extent.
    pub fn default_filter(&self) -> FilterState {
        FilterState::new(self.extent)
    }

    pub fn filtered(&self, filter: &FilterState) -> Vec<&PowerPlant> {
        filter.apply(&self.plants)
    }

    pub fn on_filter_changed(&self, filter: &FilterState) -> PlantView {
        let selected = self.filtered(filter);
        PlantView {
            filter: filter.clone(),
            kpis: aggregate::plant_kpis(&selected, filter),
            fuels: aggregate::capacity_by_fuel(&selected),
            timeline: timeline::build_timeline(&selected, &self.fuels, filter, self.extent),
            countries: aggregate::capacity_by_country(&selected, &self.features),
        }
    }

    pub fn map_layer(&self, filter: &FilterState, viewport: &Viewport) -> MapLayer {
        viewport::map_layer(&self.filtered(filter), viewport, self.settings, &self.features)
    }

    pub fn summary(&self) -> PlantSummary {
        let all: Vec<&PowerPlant> = self.plants.iter().collect();
        let countries = aggregate::capacity_by_country(&all, &self.features);
        let mut countries_unlocated: Vec<String> = countries
            .iter()
            .filter(|c| !c.matched_feature)
            .map(|c| c.country.clone())
            .collect();
        countries_unlocated.sort();
        PlantSummary {
            plants: self.report.clone(),
            features: self.features.len(),
            fuels: self.fuels.clone(),
            year_extent: self.extent,
            countries_located: countries.len() - countries_unlocated.len(),
            countries_unlocated,
        }
    }
}
