use serde::Serialize;

use crate::data::codes::CountryCode;
use crate::data::resolver::{CountryResolver, IdentifierCandidates};
use crate::data::series::SeriesTable;
use crate::data::topology::GeoFeature;

/// A map feature paired with the code it resolved to, if any. Resolved once
/// at load so per-year shading is a plain lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFeature {
    pub id: Option<String>,
    pub name: Option<String>,
    pub code: Option<CountryCode>,
}

impl ResolvedFeature {
    pub fn resolve(feature: &GeoFeature, resolver: &CountryResolver) -> Self {
        Self {
            id: feature.id.clone(),
            name: feature.name().map(str::to_string),
            code: resolver
                .resolve(&IdentifierCandidates::from_feature(feature))
                .into_code(),
        }
    }
}

pub fn resolve_features(features: &[GeoFeature], resolver: &CountryResolver) -> Vec<ResolvedFeature> {
    features
        .iter()
        .map(|f| ResolvedFeature::resolve(f, resolver))
        .collect()
}

/// Fill value for one feature; `None` renders as the no-data colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapShade {
    pub id: Option<String>,
    pub name: Option<String>,
    pub code: Option<CountryCode>,
    pub life_expectancy: Option<f64>,
}

pub fn shade_features(
    features: &[ResolvedFeature],
    life_expectancy: &SeriesTable,
    year: i32,
) -> Vec<MapShade> {
    features
        .iter()
        .map(|feature| MapShade {
            id: feature.id.clone(),
            name: feature.name.clone(),
            code: feature.code.clone(),
            life_expectancy: feature
                .code
                .as_ref()
                .and_then(|code| life_expectancy.value(code.as_str(), year)),
        })
        .collect()
}
