use serde::{Deserialize, Serialize};

use crate::plants::record::PowerPlant;

/// Inclusive commissioning-year range, always ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            from: a.min(b),
            to: a.max(b),
        }
    }

    /// Plants without a year are never excluded by the range.
    pub fn admits(&self, year: Option<f64>) -> bool {
        match year {
            Some(year) => year >= f64::from(self.from) && year <= f64::from(self.to),
            None => true,
        }
    }
}

/// The plant dashboard's selection. Every change builds a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub fuel: Option<String>,
    pub years: YearRange,
}

impl FilterState {
    /// No fuel selected, full year extent.
    pub fn new(extent: YearRange) -> Self {
        Self {
            fuel: None,
            years: extent,
        }
    }

    pub fn with_fuel(self, fuel: Option<String>) -> Self {
        Self { fuel, ..self }
    }

    /// Selecting the active fuel again clears the selection.
    pub fn toggle_fuel(self, fuel: &str) -> Self {
        let fuel = match self.fuel.as_deref() {
            Some(active) if active == fuel => None,
            _ => Some(fuel.to_string()),
        };
        Self { fuel, ..self }
    }

    pub fn with_years(self, a: i32, b: i32) -> Self {
        Self {
            years: YearRange::new(a, b),
            ..self
        }
    }

    pub fn cleared(extent: YearRange) -> Self {
        Self::new(extent)
    }

    pub fn matches(&self, plant: &PowerPlant) -> bool {
        if let Some(fuel) = self.fuel.as_deref() {
            if plant.fuel != fuel {
                return false;
            }
        }
        self.years.admits(plant.year)
    }

    pub fn apply<'a>(&self, plants: &'a [PowerPlant]) -> Vec<&'a PowerPlant> {
        plants.iter().filter(|p| self.matches(p)).collect()
    }

    /// `ALL` when no fuel is selected, else the fuel uppercased.
    pub fn fuel_label(&self) -> String {
        self.fuel
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "ALL".to_string())
    }
}
