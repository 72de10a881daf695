//! Population by region, the two-level tree behind the sunburst.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::codes::CountryCode;
use crate::trends::points::CountryPoint;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionNode {
    pub region: String,
    pub population: f64,
    pub countries: Vec<CountryLeaf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryLeaf {
    pub code: CountryCode,
    pub name: String,
    pub population: f64,
}

fn by_population_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Regions by total population descending, and countries within each region
/// likewise. Ties keep name order.
pub fn region_hierarchy(points: &[CountryPoint]) -> Vec<RegionNode> {
    let mut grouped: BTreeMap<&str, Vec<CountryLeaf>> = BTreeMap::new();
    for point in points {
        grouped.entry(point.region.as_str()).or_default().push(CountryLeaf {
            code: point.code.clone(),
            name: point.name.clone(),
            population: point.population,
        });
    }

    let mut regions: Vec<RegionNode> = grouped
        .into_iter()
        .map(|(region, mut countries)| {
            countries.sort_by(|a, b| {
                by_population_desc(a.population, b.population).then_with(|| a.name.cmp(&b.name))
            });
            RegionNode {
                region: region.to_string(),
                population: countries.iter().map(|c| c.population).sum(),
                countries,
            }
        })
        .collect();
    regions.sort_by(|a, b| {
        by_population_desc(a.population, b.population).then_with(|| a.region.cmp(&b.region))
    });
    regions
}
