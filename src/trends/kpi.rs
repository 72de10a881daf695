use serde::Serialize;

use crate::format;
use crate::stats;
use crate::trends::points::CountryPoint;

const MISSING_LABEL: &str = "N/A";

/// Headline cards for the selected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsKpis {
    pub total_population: f64,
    pub mean_life_expectancy: Option<f64>,
    /// Median of the floored display GDP, matching the log-scale chart.
    pub median_gdp: Option<f64>,
    pub population_label: String,
    pub life_expectancy_label: String,
    pub gdp_label: String,
}

pub fn trends_kpis(points: &[CountryPoint]) -> TrendsKpis {
    let total_population: f64 = points.iter().map(|p| p.population).sum();
    let life: Vec<f64> = points.iter().map(|p| p.life_expectancy).collect();
    let gdp: Vec<f64> = points.iter().map(|p| p.gdp_display).collect();
    let mean_life_expectancy = stats::mean(&life);
    let median_gdp = stats::median(&gdp);

    TrendsKpis {
        total_population,
        mean_life_expectancy,
        median_gdp,
        population_label: format::si(total_population, 2),
        life_expectancy_label: mean_life_expectancy
            .map(format::fixed1)
            .unwrap_or_else(|| MISSING_LABEL.to_string()),
        gdp_label: median_gdp
            .map(format::currency)
            .unwrap_or_else(|| MISSING_LABEL.to_string()),
    }
}
