use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::data::index::FeatureIndex;
use crate::plants::aggregate::{capacity_by_country, CountryCapacity};
use crate::plants::record::PowerPlant;

/// Visible map box in degrees plus the current zoom factor (1 = whole world).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    pub zoom: f64,
}

impl Viewport {
    pub fn world(zoom: f64) -> Self {
        Self {
            lon_min: -180.0,
            lon_max: 180.0,
            lat_min: -90.0,
            lat_max: 90.0,
            zoom,
        }
    }

    /// Whether `(lon, lat)` lies in the box grown by `buffer` degrees.
    pub fn contains(&self, lon: f64, lat: f64, buffer: f64) -> bool {
        let (lon_lo, lon_hi) = ordered(self.lon_min, self.lon_max);
        let (lat_lo, lat_hi) = ordered(self.lat_min, self.lat_max);
        lon >= lon_lo - buffer && lon <= lon_hi + buffer && lat >= lat_lo - buffer && lat <= lat_hi + buffer
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSettings {
    pub zoom_threshold: f64,
    pub render_cap: usize,
    pub buffer_deg: f64,
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for LayerSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            zoom_threshold: config.zoom_threshold,
            render_cap: config.plant_render_cap,
            buffer_deg: config.viewport_buffer_deg,
        }
    }
}

/// What the map draws at the current zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MapLayer {
    Countries {
        countries: Vec<CountryCapacity>,
    },
    Plants {
        plants: Vec<PowerPlant>,
        /// Plants in view before the render cap was applied.
        in_view: usize,
        truncated: bool,
    },
}

/// Country bubbles below the zoom threshold; individual plants inside the
/// buffered viewport at or above it, in input order up to the render cap.
pub fn map_layer(
    plants: &[&PowerPlant],
    viewport: &Viewport,
    settings: LayerSettings,
    features: &FeatureIndex,
) -> MapLayer {
    if viewport.zoom < settings.zoom_threshold {
        return MapLayer::Countries {
            countries: capacity_by_country(plants, features),
        };
    }

    let visible: Vec<&PowerPlant> = plants
        .iter()
        .copied()
        .filter(|p| viewport.contains(p.lon, p.lat, settings.buffer_deg))
        .collect();
    let in_view = visible.len();
    MapLayer::Plants {
        plants: visible
            .into_iter()
            .take(settings.render_cap)
            .cloned()
            .collect(),
        in_view,
        truncated: in_view > settings.render_cap,
    }
}
