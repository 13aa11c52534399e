// crates/regionmap-core/tests/support/mod.rs
#![allow(dead_code)]

use regionmap_core::geometry::{Bounds, LatLng};
use regionmap_core::model::Feature;
use regionmap_core::surface::{LabelStyle, MapSurface, RegionId, RegionStyle};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPolygon {
    pub region: RegionId,
    pub style: RegionStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnLabel {
    pub region: RegionId,
    pub text: String,
    pub at: LatLng,
    pub style: LabelStyle,
}

/// In-memory surface that records every call the engine makes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    pub polygons: BTreeMap<u64, DrawnPolygon>,
    pub labels: BTreeMap<u64, DrawnLabel>,
    pub fitted: Vec<(Bounds, [u32; 2])>,
    pub fronted: Vec<u64>,
    pub relayouts: usize,
    /// Chronological log of add/remove calls.
    pub log: Vec<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn polygon_style(&self, region: RegionId) -> Option<RegionStyle> {
        self.polygons
            .values()
            .find(|p| p.region == region)
            .map(|p| p.style)
    }

    pub fn label_style(&self, text: &str) -> Option<LabelStyle> {
        self.labels
            .values()
            .find(|l| l.text == text)
            .map(|l| l.style)
    }

    pub fn selected_count(&self) -> usize {
        self.polygons
            .values()
            .filter(|p| p.style == RegionStyle::SELECTED)
            .count()
    }

    pub fn label_texts(&self) -> Vec<&str> {
        self.labels.values().map(|l| l.text.as_str()).collect()
    }
}

impl MapSurface for RecordingSurface {
    type Polygon = u64;
    type Label = u64;

    fn add_polygon(&mut self, region: RegionId, _feature: &Feature) -> u64 {
        let h = self.handle();
        self.polygons.insert(
            h,
            DrawnPolygon {
                region,
                style: RegionStyle::NORMAL,
            },
        );
        self.log.push(format!("add polygon {}", region.0));
        h
    }

    fn set_polygon_style(&mut self, polygon: &u64, style: RegionStyle) {
        if let Some(p) = self.polygons.get_mut(polygon) {
            p.style = style;
        }
    }

    fn bring_to_front(&mut self, polygon: &u64) {
        self.fronted.push(*polygon);
    }

    fn remove_polygon(&mut self, polygon: u64) {
        if let Some(p) = self.polygons.remove(&polygon) {
            self.log.push(format!("remove polygon {}", p.region.0));
        }
    }

    fn add_label(&mut self, region: RegionId, at: LatLng, text: &str) -> u64 {
        let h = self.handle();
        self.labels.insert(
            h,
            DrawnLabel {
                region,
                text: text.to_string(),
                at,
                style: LabelStyle::NORMAL,
            },
        );
        self.log.push(format!("add label {text}"));
        h
    }

    fn set_label_style(&mut self, label: &u64, style: LabelStyle) {
        if let Some(l) = self.labels.get_mut(label) {
            l.style = style;
        }
    }

    fn remove_label(&mut self, label: u64) {
        if let Some(l) = self.labels.remove(&label) {
            self.log.push(format!("remove label {}", l.text));
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: [u32; 2]) {
        self.fitted.push((bounds, padding));
    }

    fn invalidate_size(&mut self) {
        self.relayouts += 1;
    }
}

/// Square ring `[lng, lat]` with its south-west corner at (`lat`, `lng`).
pub fn square(lng: f64, lat: f64, size: f64) -> serde_json::Value {
    serde_json::json!([[
        [lng, lat],
        [lng + size, lat],
        [lng + size, lat + size],
        [lng, lat + size]
    ]])
}

pub fn polygon_feature(name: Option<&str>, lng: f64, lat: f64, size: f64) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    properties.insert("KODE".into(), serde_json::json!(format!("{lng}:{lat}")));
    if let Some(name) = name {
        properties.insert("NAMOBJ".into(), serde_json::json!(name));
    }
    serde_json::json!({
        "type": "Feature",
        "properties": properties,
        "geometry": { "type": "Polygon", "coordinates": square(lng, lat, size) }
    })
}

pub fn collection(features: Vec<serde_json::Value>) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "type": "FeatureCollection",
        "features": features
    }))
    .unwrap()
}
