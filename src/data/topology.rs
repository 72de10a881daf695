//! TopoJSON decoding into GeoJSON features, then each country feature's id,
//! properties and a representative point for bubble placement.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeometryValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LoadError;

pub const DEFAULT_COUNTRIES_OBJECT: &str = "countries";

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    pub objects: HashMap<String, GeometryObject>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeometryObject {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    pub arcs: Option<Value>,
    #[serde(default)]
    pub geometries: Vec<GeometryObject>,
}

/// One decoded map feature. Numeric ids and properties are kept as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoFeature {
    pub id: Option<String>,
    pub properties: BTreeMap<String, String>,
    /// `[longitude, latitude]`.
    pub centroid: Option<[f64; 2]>,
}

impl GeoFeature {
    /// Trimmed, non-blank property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.property("name").or_else(|| self.property("NAME"))
    }
}

impl Topology {
    pub fn parse(raw: &str, path: &Path) -> Result<Self, LoadError> {
        serde_json::from_str(raw).map_err(|err| LoadError::json(path, err))
    }

    /// The named object as GeoJSON features; a bare geometry yields a single
    /// feature.
    pub fn to_geojson(&self, object: &str) -> Option<FeatureCollection> {
        let root = self.objects.get(object)?;
        let features = if root.kind.as_deref() == Some("GeometryCollection") {
            root.geometries.iter().map(|g| self.to_feature(g)).collect()
        } else {
            vec![self.to_feature(root)]
        };
        Some(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }

    pub fn features(&self, object: &str) -> Option<Vec<GeoFeature>> {
        let collection = self.to_geojson(object)?;
        Some(collection.features.iter().map(GeoFeature::from_geojson).collect())
    }

    fn to_feature(&self, geometry: &GeometryObject) -> Feature {
        let id = match &geometry.id {
            Some(Value::String(s)) => Some(Id::String(s.clone())),
            Some(Value::Number(n)) => Some(Id::Number(n.clone())),
            _ => None,
        };
        Feature {
            bbox: None,
            geometry: self.geometry(geometry),
            id,
            properties: geometry.properties.clone(),
            foreign_members: None,
        }
    }

    fn geometry(&self, geometry: &GeometryObject) -> Option<Geometry> {
        let arcs = geometry.arcs.clone()?;
        let value = match geometry.kind.as_deref()? {
            "Polygon" => {
                let rings: Vec<Vec<i64>> = serde_json::from_value(arcs).ok()?;
                GeometryValue::Polygon(self.rings(&rings))
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<i64>>> = serde_json::from_value(arcs).ok()?;
                GeometryValue::MultiPolygon(polygons.iter().map(|rings| self.rings(rings)).collect())
            }
            _ => return None,
        };
        Some(Geometry::new(value))
    }

    fn rings(&self, rings: &[Vec<i64>]) -> Vec<Vec<Vec<f64>>> {
        rings
            .iter()
            .map(|ring| self.stitch_ring(ring))
            .filter(|ring| ring.len() >= 3)
            .collect()
    }

    /// Joins arcs into one ring. A negative index `!i` walks arc `i` backwards;
    /// consecutive arcs share an endpoint, which is kept once.
    fn stitch_ring(&self, arc_indices: &[i64]) -> Vec<Vec<f64>> {
        let mut ring: Vec<Vec<f64>> = Vec::new();
        for &index in arc_indices {
            let (arc_id, reversed) = if index < 0 {
                ((!index) as usize, true)
            } else {
                (index as usize, false)
            };
            let mut points = self.decode_arc(arc_id);
            if reversed {
                points.reverse();
            }
            let skip = usize::from(!ring.is_empty());
            ring.extend(points.into_iter().skip(skip));
        }
        ring
    }

    fn decode_arc(&self, arc_id: usize) -> Vec<Vec<f64>> {
        let Some(arc) = self.arcs.get(arc_id) else {
            return Vec::new();
        };
        match self.transform {
            Some(Transform { scale, translate }) => {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| {
                        x += p[0];
                        y += p[1];
                        vec![x * scale[0] + translate[0], y * scale[1] + translate[1]]
                    })
                    .collect()
            }
            None => arc
                .iter()
                .filter(|p| p.len() >= 2)
                .map(|p| vec![p[0], p[1]])
                .collect(),
        }
    }
}

impl GeoFeature {
    /// Keeps the id and scalar properties as strings and reduces the
    /// geometry to its centroid.
    pub fn from_geojson(feature: &Feature) -> Self {
        let id = feature.id.as_ref().map(|id| match id {
            Id::String(s) => s.clone(),
            Id::Number(n) => n.to_string(),
        });
        let properties = feature
            .properties
            .iter()
            .flatten()
            .filter_map(|(k, v)| value_to_string(v).map(|s| (k.clone(), s)))
            .collect();
        Self {
            id,
            properties,
            centroid: feature.geometry.as_ref().and_then(centroid),
        }
    }
}

pub fn load_topology(path: &Path) -> Result<Topology, LoadError> {
    let raw = fs::read_to_string(path).map_err(|err| LoadError::read(path, err))?;
    Topology::parse(&raw, path)
}

/// Loads the named object's features; a missing object is a load failure.
pub fn load_features(path: &Path, object: &str) -> Result<Vec<GeoFeature>, LoadError> {
    load_topology(path)?
        .features(object)
        .ok_or_else(|| LoadError::MissingObject {
            path: path.to_path_buf(),
            object: object.to_string(),
        })
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn collect_rings<'a>(geometry: &'a Geometry, rings: &mut Vec<&'a [Vec<f64>]>) {
    match &geometry.value {
        GeometryValue::Polygon(polygon) => rings.extend(polygon.iter().map(Vec::as_slice)),
        GeometryValue::MultiPolygon(polygons) => {
            for polygon in polygons {
                rings.extend(polygon.iter().map(Vec::as_slice));
            }
        }
        GeometryValue::GeometryCollection(geometries) => {
            for g in geometries {
                collect_rings(g, rings);
            }
        }
        _ => {}
    }
}

/// Area-weighted planar centroid over all rings, holes subtracting through
/// their opposite winding. Degenerate shapes fall back to the vertex mean.
fn centroid(geometry: &Geometry) -> Option<[f64; 2]> {
    let mut rings = Vec::new();
    collect_rings(geometry, &mut rings);
    let (mut area, mut cx, mut cy) = (0.0, 0.0, 0.0);
    let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0usize);
    for ring in rings {
        for (i, a) in ring.iter().enumerate() {
            let b = &ring[(i + 1) % ring.len()];
            let cross = a[0] * b[1] - b[0] * a[1];
            area += cross;
            cx += (a[0] + b[0]) * cross;
            cy += (a[1] + b[1]) * cross;
            sum_x += a[0];
            sum_y += a[1];
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    if area.abs() < 1e-12 {
        return Some([sum_x / count as f64, sum_y / count as f64]);
    }
    Some([cx / (3.0 * area), cy / (3.0 * area)])
}
