// crates/regionmap-core/src/model.rs

//! # Boundary Data Model
//!
//! Boundary payloads are read with the [`geojson`] crate, one feature at a
//! time: a feature that fails to parse is dropped on its own instead of
//! failing the whole document. Parsed geometry is reduced to the shapes the
//! engine labels and fits, in `[lng, lat]` order.

use crate::error::{MapError, Result};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Property mapping of a feature, kept exactly as it appeared in the source.
pub type Properties = Map<String, Value>;

/// A GeoJSON position in source order: `[lng, lat]`.
pub type Position = [f64; 2];

/// A closed (or not) ring of positions.
pub type Ring = Vec<Position>;

/// Geometry of a feature.
///
/// Only the kinds the engine understands carry coordinates; everything else
/// is kept as [`Geometry::Unsupported`] so the polygon layer can still decide
/// what to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    /// Rings; the first ring is the outer boundary, the rest are holes.
    Polygon(Vec<Ring>),
    /// Polygons, each a list of rings.
    MultiPolygon(Vec<Vec<Ring>>),
    /// Any other geometry type (LineString, GeometryCollection, ...).
    Unsupported(String),
}

impl Geometry {
    /// Converts a parsed GeoJSON geometry. Positions with fewer than two
    /// ordinates are dropped; a point without a usable position is `None`.
    pub fn from_geojson(value: &geojson::Value) -> Option<Self> {
        use geojson::Value as G;

        let geometry = match value {
            G::Point(p) => Geometry::Point(position(p)?),
            G::Polygon(r) => Geometry::Polygon(rings(r)),
            G::MultiPolygon(parts) => Geometry::MultiPolygon(parts.iter().map(|p| rings(p)).collect()),
            G::MultiPoint(_) => Geometry::Unsupported("MultiPoint".into()),
            G::LineString(_) => Geometry::Unsupported("LineString".into()),
            G::MultiLineString(_) => Geometry::Unsupported("MultiLineString".into()),
            G::GeometryCollection(_) => Geometry::Unsupported("GeometryCollection".into()),
        };
        Some(geometry)
    }

    pub fn kind(&self) -> &str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Unsupported(kind) => kind,
        }
    }

    /// GeoJSON form, for surfaces that hand geometry to a drawing library.
    /// Unsupported geometries serialize to `null`.
    pub fn to_value(&self) -> Value {
        match self {
            Geometry::Point(p) => json!({ "type": "Point", "coordinates": p }),
            Geometry::Polygon(rings) => json!({ "type": "Polygon", "coordinates": rings }),
            Geometry::MultiPolygon(parts) => {
                json!({ "type": "MultiPolygon", "coordinates": parts })
            }
            Geometry::Unsupported(_) => Value::Null,
        }
    }

    /// Iterates over every position of the geometry, holes included.
    pub fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            Geometry::Point(p) => Box::new(std::iter::once(p)),
            Geometry::Polygon(rings) => Box::new(rings.iter().flatten()),
            Geometry::MultiPolygon(parts) => Box::new(parts.iter().flatten().flatten()),
            Geometry::Unsupported(_) => Box::new(std::iter::empty()),
        }
    }
}

fn position(p: &[f64]) -> Option<Position> {
    match p {
        [lng, lat, ..] => Some([*lng, *lat]),
        _ => None,
    }
}

fn rings(rings: &[Vec<Vec<f64>>]) -> Vec<Ring> {
    rings
        .iter()
        .map(|ring| ring.iter().filter_map(|p| position(p)).collect())
        .collect()
}

/// One boundary record.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Option<Geometry>, properties: Properties) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    pub fn from_geojson(feature: geojson::Feature) -> Self {
        let geometry = feature
            .geometry
            .as_ref()
            .and_then(|g| Geometry::from_geojson(&g.value));
        Self::new(geometry, feature.properties.unwrap_or_default())
    }

    /// Parses one GeoJSON feature object.
    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(Self::from_geojson(geojson::Feature::from_json_value(value)?))
    }

    /// Display name under `label_field`, if it is a non-empty scalar.
    ///
    /// Strings are used as-is; numbers and booleans are rendered to text.
    pub fn name(&self, label_field: &str) -> Option<String> {
        let name = match self.properties.get(label_field)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!name.is_empty()).then_some(name)
    }

    pub fn to_value(&self) -> Value {
        json!({
            "type": "Feature",
            "geometry": self.geometry.as_ref().map_or(Value::Null, Geometry::to_value),
            "properties": self.properties,
        })
    }
}

/// Ordered sequence of features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Parses a boundary payload.
    ///
    /// A `FeatureCollection` is read as-is. A bare `Feature` (or a bare
    /// geometry) becomes a one-element collection, so callers always see a
    /// collection.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(bytes)?;
        Self::from_json_value(raw)
    }

    pub fn from_json_value(raw: Value) -> Result<Self> {
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| MapError::InvalidData("payload has no `type` member".into()))?
            .to_owned();

        match kind.as_str() {
            "FeatureCollection" => {
                let items = match raw {
                    Value::Object(mut obj) => match obj.remove("features") {
                        Some(Value::Array(items)) => items,
                        _ => Vec::new(),
                    },
                    _ => Vec::new(),
                };

                let mut features = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    match geojson::Feature::from_json_value(item) {
                        Ok(f) => features.push(Feature::from_geojson(f)),
                        Err(e) => debug!(index, error = %e, "skipping malformed feature"),
                    }
                }
                Ok(Self { features })
            }
            "Feature" => Ok(Self {
                features: vec![Feature::from_json_value(raw)?],
            }),
            _ => {
                let geometry = geojson::Geometry::from_json_value(raw)
                    .map_err(|e| MapError::InvalidData(format!("unsupported GeoJSON payload `{kind}`: {e}")))?;
                match Geometry::from_geojson(&geometry.value) {
                    Some(Geometry::Unsupported(other)) => Err(MapError::InvalidData(format!(
                        "unsupported GeoJSON type `{other}`"
                    ))),
                    geometry => Ok(Self {
                        features: vec![Feature::new(geometry, Properties::new())],
                    }),
                }
            }
        }
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_feature_becomes_collection() {
        let raw = json!({
            "type": "Feature",
            "properties": { "NAMOBJ": "X" },
            "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]] }
        });
        let fc = FeatureCollection::from_json_value(raw).unwrap();
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.features[0].name("NAMOBJ").as_deref(), Some("X"));
    }

    #[test]
    fn collection_without_features_is_empty() {
        let fc = FeatureCollection::from_json_value(json!({ "type": "FeatureCollection" })).unwrap();
        assert!(fc.is_empty());
    }

    #[test]
    fn malformed_features_are_skipped_one_by_one() {
        let raw = json!({
            "type": "FeatureCollection",
            "features": [
                42,
                { "type": "Feature", "geometry": null, "properties": null },
                { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": "oops" } },
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] } },
                { "type": "Feature", "properties": { "NAMOBJ": "Lumban" },
                  "geometry": { "type": "MultiPolygon", "coordinates": [[[[0, 0], [1, 0], [1, 1]]]] } }
            ]
        });
        let fc = FeatureCollection::from_json_value(raw).unwrap();
        assert_eq!(fc.len(), 3);
        assert_eq!(fc.features[0].geometry, None);
        assert!(fc.features[0].properties.is_empty());
        assert_eq!(
            fc.features[1].geometry,
            Some(Geometry::Unsupported("LineString".into()))
        );
        assert_eq!(
            fc.features[2].geometry,
            Some(Geometry::MultiPolygon(vec![vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]]))
        );
        assert_eq!(fc.features[2].name("NAMOBJ").as_deref(), Some("Lumban"));
    }

    #[test]
    fn bare_geometries_are_wrapped_or_rejected() {
        let point = FeatureCollection::from_json_value(json!({ "type": "Point", "coordinates": [99.0, 2.0] })).unwrap();
        assert_eq!(point.features[0].geometry, Some(Geometry::Point([99.0, 2.0])));

        let line = json!({ "type": "LineString", "coordinates": [[0, 0], [1, 1]] });
        assert!(matches!(FeatureCollection::from_json_value(line), Err(MapError::InvalidData(_))));
        let unknown = json!({ "type": "Topology", "objects": {} });
        assert!(matches!(FeatureCollection::from_json_value(unknown), Err(MapError::InvalidData(_))));
    }

    #[test]
    fn payload_without_type_is_rejected() {
        let err = FeatureCollection::from_json_value(json!({ "features": [] })).unwrap_err();
        assert!(matches!(err, MapError::InvalidData(_)));
        assert!(FeatureCollection::from_slice(b"not json").is_err());
    }

    #[test]
    fn names_must_be_non_empty_scalars() {
        let mut props = Properties::new();
        props.insert("A".into(), json!(""));
        props.insert("B".into(), json!(12));
        props.insert("C".into(), json!(null));
        let f = Feature::new(None, props);
        assert_eq!(f.name("A"), None);
        assert_eq!(f.name("B").as_deref(), Some("12"));
        assert_eq!(f.name("C"), None);
        assert_eq!(f.name("missing"), None);
    }
}
