use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::plants::{FilterState, PlantDataset, Viewport};
use crate::server::AppState;
use crate::trends::{TrendsDataset, TrendsFilter};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// The named dashboard is switched off in the config.
    Unavailable(&'static str),
    Serialize(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "{msg}"),
            Self::Unavailable(dashboard) => write!(f, "the {dashboard} dashboard is disabled"),
            Self::Serialize(err) => write!(f, "failed to serialize response: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

fn to_payload<T: Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn health_payload(state: &AppState) -> Result<String, ApiError> {
    to_payload(&serde_json::json!({
        "status": "ok",
        "service": "geodash",
        "version": env!("CARGO_PKG_VERSION"),
        "dashboards": {
            "trends": state.trends.is_some(),
            "plants": state.plants.is_some(),
        }
    }))
}

pub(crate) fn trends(state: &AppState) -> Result<&TrendsDataset, ApiError> {
    state.trends.as_ref().ok_or(ApiError::Unavailable("trends"))
}

pub(crate) fn plants(state: &AppState) -> Result<&PlantDataset, ApiError> {
    state.plants.as_ref().ok_or(ApiError::Unavailable("plants"))
}

pub fn trends_countries_payload(state: &AppState) -> Result<String, ApiError> {
    to_payload(&trends(state)?.countries())
}

pub fn trends_year_payload(state: &AppState, raw_year: &str) -> Result<String, ApiError> {
    let dataset = trends(state)?;
    let year = checked_year(dataset, parse_year(raw_year, "year")?)?;
    to_payload(&dataset.on_filter_changed(&TrendsFilter { year }))
}

/// Rejects years outside the dataset's configured bounds.
pub fn checked_year(dataset: &TrendsDataset, year: i32) -> Result<i32, ApiError> {
    let bounds = dataset.settings().years;
    if bounds.contains(year) {
        Ok(year)
    } else {
        Err(ApiError::BadRequest(format!(
            "year {year} is outside {}..={}",
            bounds.min, bounds.max
        )))
    }
}

/// `fuel`, `from` and `to` for the plant views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlantQuery {
    pub fuel: Option<String>,
    pub from: Option<i32>,
    pub to: Option<i32>,
}

/// The visible box and zoom, plus the plant filter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ViewportQuery {
    pub fuel: Option<String>,
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub zoom: Option<f64>,
}

impl ViewportQuery {
    pub fn filter(&self) -> PlantQuery {
        PlantQuery {
            fuel: self.fuel.clone(),
            from: self.from,
            to: self.to,
        }
    }

    /// Every bound is required; zoom defaults to the whole world.
    pub fn viewport(&self) -> Result<Viewport, ApiError> {
        Ok(Viewport {
            lon_min: required(self.lon_min, "lon_min")?,
            lon_max: required(self.lon_max, "lon_max")?,
            lat_min: required(self.lat_min, "lat_min")?,
            lat_max: required(self.lat_max, "lat_max")?,
            zoom: self.zoom.map_or(Ok(1.0), |zoom| finite(zoom, "zoom"))?,
        })
    }
}

fn finite(value: f64, field: &str) -> Result<f64, ApiError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!("{field} must be a finite number")))
    }
}

fn required(value: Option<f64>, field: &str) -> Result<f64, ApiError> {
    let value = value.ok_or_else(|| ApiError::BadRequest(format!("missing query parameter '{field}'")))?;
    finite(value, field)
}

/// Decodes a URL query string into `T`; malformed values are a bad request.
pub fn parse_params<T: DeserializeOwned>(query: &str) -> Result<T, ApiError> {
    serde_urlencoded::from_str(query).map_err(|err| ApiError::BadRequest(format!("invalid query: {err}")))
}

pub fn plants_payload(state: &AppState, query: &str) -> Result<String, ApiError> {
    let dataset = plants(state)?;
    let params: PlantQuery = parse_params(query)?;
    to_payload(&dataset.on_filter_changed(&plant_filter(dataset, &params)))
}

pub fn plants_viewport_payload(state: &AppState, query: &str) -> Result<String, ApiError> {
    let dataset = plants(state)?;
    let params: ViewportQuery = parse_params(query)?;
    let viewport = params.viewport()?;
    let filter = plant_filter(dataset, &params.filter());
    to_payload(&dataset.map_layer(&filter, &viewport))
}

/// Missing bounds default to the dataset's year extent; `fuel=ALL` or an
/// empty fuel selects every fuel.
pub fn plant_filter(dataset: &PlantDataset, params: &PlantQuery) -> FilterState {
    let extent = dataset.year_extent();
    let fuel = params
        .fuel
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("all"))
        .map(str::to_string);
    dataset
        .default_filter()
        .with_fuel(fuel)
        .with_years(params.from.unwrap_or(extent.from), params.to.unwrap_or(extent.to))
}

pub fn parse_year(raw: &str, field: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::BadRequest(format!("{field} must be a whole year, got '{raw}'")))
}
