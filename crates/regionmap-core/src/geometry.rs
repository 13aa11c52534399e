// crates/regionmap-core/src/geometry.rs

//! # Geometry Utilities
//!
//! Representative points for label anchoring and bounding boxes for viewport
//! fitting. Everything here is pure and works in plain coordinate degrees;
//! there is no projection and no geodesic math.

use crate::model::{Feature, Geometry, Position, Ring};
use serde::{Deserialize, Serialize};

/// A geographic coordinate in `(lat, lng)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Converts a GeoJSON `[lng, lat]` position.
    #[inline]
    pub fn from_position(p: &Position) -> Self {
        Self::new(p[1], p[0])
    }

    /// Euclidean distance in degree space.
    #[inline]
    pub fn distance(&self, other: &LatLng) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lng = self.lng - other.lng;
        (d_lat * d_lat + d_lng * d_lng).sqrt()
    }
}

/// Axis-aligned box in degree space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south_west: p,
            north_east: p,
        }
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn contains(&self, p: &LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Bounds over a set of points, `None` when there are no finite points.
    pub fn of_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Position>,
    {
        points
            .into_iter()
            .filter(|p| p[0].is_finite() && p[1].is_finite())
            .map(LatLng::from_position)
            .fold(None, |acc: Option<Bounds>, p| match acc {
                Some(mut b) => {
                    b.extend(p);
                    Some(b)
                }
                None => Some(Bounds::from_point(p)),
            })
    }

    /// Bounds over every geometry in `features`.
    pub fn of_features<'a, I>(features: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        Self::of_points(
            features
                .into_iter()
                .filter_map(|f| f.geometry.as_ref())
                .flat_map(|g| g.positions()),
        )
    }
}

/// The ring used to anchor a label: the outer ring of a polygon, or the
/// outer ring of the first part of a multipolygon.
fn label_ring(geometry: &Geometry) -> Option<&Ring> {
    match geometry {
        Geometry::Polygon(rings) => rings.first(),
        // Only the first part is considered; other parts never get a label.
        Geometry::MultiPolygon(parts) => parts.first()?.first(),
        Geometry::Point(_) | Geometry::Unsupported(_) => None,
    }
}

/// Representative point used to anchor a feature's label.
///
/// - `Point`: the point itself, converted to `(lat, lng)`.
/// - `Polygon`: arithmetic mean of the outer ring's vertices (holes ignored).
/// - `MultiPolygon`: same, over the first part's outer ring only.
///
/// The vertex mean is not an area centroid; it is good enough to place a
/// label at regional scale. Returns `None` for other geometry types, missing
/// geometry, or an empty ring.
pub fn representative_point(feature: &Feature) -> Option<LatLng> {
    let geometry = feature.geometry.as_ref()?;
    if let Geometry::Point(p) = geometry {
        return Some(LatLng::from_position(p));
    }

    let ring = label_ring(geometry)?;
    if ring.is_empty() {
        return None;
    }

    let (lng_sum, lat_sum) = ring
        .iter()
        .fold((0.0, 0.0), |(lng, lat), p| (lng + p[0], lat + p[1]));
    let n = ring.len() as f64;
    let point = LatLng::new(lat_sum / n, lng_sum / n);

    (point.lat.is_finite() && point.lng.is_finite()).then_some(point)
}
