//! Commissioned capacity per year, stacked by fuel.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::plants::filter::{FilterState, YearRange};
use crate::plants::record::PowerPlant;

/// One fuel's band across all timeline years; `[y0, y1]` per year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackLayer {
    pub fuel: String,
    pub bands: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub years: Vec<i32>,
    pub layers: Vec<StackLayer>,
    /// Total capacity per year, aligned with `years`.
    pub totals: Vec<f64>,
    pub x_domain: [i32; 2],
    /// Largest yearly total, or 1 for an empty timeline.
    pub y_max: f64,
}

/// Stacks the filtered plants that carry a year. Plants are bucketed by
/// whole year and every fuel of `fuels` gets a band, zero where absent.
/// The x-domain zooms to the selected range (padded by a year) when the
/// filter narrows the global extent.
pub fn build_timeline(
    plants: &[&PowerPlant],
    fuels: &[String],
    filter: &FilterState,
    extent: YearRange,
) -> Timeline {
    let mut by_year: BTreeMap<i32, HashMap<&str, f64>> = BTreeMap::new();
    for plant in plants {
        let Some(year) = plant.year else {
            continue;
        };
        *by_year
            .entry(year.floor() as i32)
            .or_default()
            .entry(plant.fuel.as_str())
            .or_insert(0.0) += plant.capacity_mw;
    }

    let years: Vec<i32> = by_year.keys().copied().collect();
    let mut baseline = vec![0.0; years.len()];
    let layers = fuels
        .iter()
        .map(|fuel| {
            let bands = by_year
                .values()
                .zip(baseline.iter_mut())
                .map(|(fuel_totals, base)| {
                    let y0 = *base;
                    *base += fuel_totals.get(fuel.as_str()).copied().unwrap_or(0.0);
                    [y0, *base]
                })
                .collect();
            StackLayer {
                fuel: fuel.clone(),
                bands,
            }
        })
        .collect();

    let y_max = baseline.iter().copied().fold(0.0, f64::max);
    let narrowed = filter.years != extent && filter.years.from != filter.years.to;
    let x_domain = if narrowed {
        [filter.years.from - 1, filter.years.to + 1]
    } else {
        [extent.from, extent.to]
    };

    Timeline {
        years,
        layers,
        totals: baseline,
        x_domain,
        y_max: if y_max > 0.0 { y_max } else { 1.0 },
    }
}
