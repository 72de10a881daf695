use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::data::index::FeatureIndex;
use crate::format;
use crate::plants::filter::{FilterState, YearRange};
use crate::plants::record::{PowerPlant, UNKNOWN_FUEL};
use crate::stats;

/// Fuels with a fixed place (and colour) in every chart, in display order.
pub const KNOWN_FUELS: [&str; 9] = [
    "Gas", "Coal", "Hydro", "Solar", "Wind", "Nuclear", "Oil", "Biomass", UNKNOWN_FUEL,
];

const FALLBACK_FIRST_YEAR: i32 = 1900;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelCapacity {
    pub fuel: String,
    pub capacity_mw: f64,
}

/// One bubble on the country-level map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCapacity {
    pub country: String,
    pub capacity_mw: f64,
    pub lon: f64,
    pub lat: f64,
    /// Whether the position is a map feature's centroid rather than the
    /// mean of the plants.
    pub matched_feature: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantKpis {
    pub total_capacity_mw: f64,
    pub plant_count: usize,
    pub fuel_label: String,
    pub capacity_label: String,
    pub count_label: String,
    pub banner: String,
}

fn by_capacity_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Known fuels first in their fixed order, then any other fuel in the order
/// it first appears.
pub fn fuel_domain(plants: &[PowerPlant]) -> Vec<String> {
    let mut domain: Vec<String> = KNOWN_FUELS.iter().map(|f| f.to_string()).collect();
    for plant in plants {
        if !domain.iter().any(|f| *f == plant.fuel) {
            domain.push(plant.fuel.clone());
        }
    }
    domain
}

/// Span of commissioning years, widened to whole years. Without any dated
/// plant the range runs from 1900 to the current year.
pub fn year_extent(plants: &[PowerPlant]) -> YearRange {
    let extent = stats::extent(plants.iter().filter_map(|p| p.year));
    match extent {
        Some((lo, hi)) => YearRange::new(lo.floor() as i32, hi.ceil() as i32),
        None => YearRange::new(FALLBACK_FIRST_YEAR, Utc::now().year()),
    }
}

pub fn capacity_by_fuel(plants: &[&PowerPlant]) -> Vec<FuelCapacity> {
    let mut totals: Vec<FuelCapacity> = stats::sum_by(plants, |p| p.fuel.clone(), |p| p.capacity_mw)
        .into_iter()
        .map(|(fuel, capacity_mw)| FuelCapacity { fuel, capacity_mw })
        .collect();
    totals.sort_by(|a, b| by_capacity_desc(a.capacity_mw, b.capacity_mw).then_with(|| a.fuel.cmp(&b.fuel)));
    totals
}

/// Capacity per country key, placed at the matching feature's centroid or
/// else at the mean plant location. Largest first.
pub fn capacity_by_country(plants: &[&PowerPlant], features: &FeatureIndex) -> Vec<CountryCapacity> {
    let mut groups: HashMap<&str, Vec<&PowerPlant>> = HashMap::new();
    for plant in plants {
        groups.entry(plant.country_key()).or_default().push(plant);
    }

    let mut countries: Vec<CountryCapacity> = groups
        .into_iter()
        .filter_map(|(key, members)| {
            let capacity_mw = members.iter().map(|p| p.capacity_mw).sum();
            let centroid = features.locate([key]).and_then(|f| f.centroid);
            let ([lon, lat], matched_feature) = match centroid {
                Some(point) => (point, true),
                None => {
                    let lons: Vec<f64> = members.iter().map(|p| p.lon).collect();
                    let lats: Vec<f64> = members.iter().map(|p| p.lat).collect();
                    ([stats::mean(&lons)?, stats::mean(&lats)?], false)
                }
            };
            (lon.is_finite() && lat.is_finite()).then(|| CountryCapacity {
                country: key.to_string(),
                capacity_mw,
                lon,
                lat,
                matched_feature,
            })
        })
        .collect();
    countries.sort_by(|a, b| {
        by_capacity_desc(a.capacity_mw, b.capacity_mw).then_with(|| a.country.cmp(&b.country))
    });
    countries
}

pub fn plant_kpis(plants: &[&PowerPlant], filter: &FilterState) -> PlantKpis {
    let total_capacity_mw: f64 = plants.iter().map(|p| p.capacity_mw).sum();
    let count_label = format::grouped(plants.len() as f64);
    PlantKpis {
        total_capacity_mw,
        plant_count: plants.len(),
        fuel_label: filter.fuel_label(),
        capacity_label: format::si(total_capacity_mw, 1),
        banner: format!(
            "Filtering: {count_label} plants from {} to {}.",
            filter.years.from, filter.years.to
        ),
        count_label,
    }
}
