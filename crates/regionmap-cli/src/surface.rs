//! A map surface that keeps visuals in memory and narrates style changes.

use regionmap_core::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct TextLabel {
    pub region: RegionId,
    pub text: String,
    pub at: LatLng,
}

#[derive(Debug, Default)]
pub struct TextSurface {
    next: u32,
    polygons: BTreeMap<u32, RegionId>,
    labels: BTreeMap<u32, TextLabel>,
    pub viewport: Option<Bounds>,
    /// Style changes in the order they were applied.
    pub changes: Vec<String>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> impl Iterator<Item = &TextLabel> {
        self.labels.values()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    fn region_of(&self, polygon: &u32) -> String {
        self.polygons
            .get(polygon)
            .map_or_else(|| format!("#{polygon}"), |r| format!("region {}", r.0))
    }
}

impl MapSurface for TextSurface {
    type Polygon = u32;
    type Label = u32;

    fn add_polygon(&mut self, region: RegionId, _feature: &Feature) -> u32 {
        self.next += 1;
        self.polygons.insert(self.next, region);
        self.next
    }

    fn set_polygon_style(&mut self, polygon: &u32, style: RegionStyle) {
        let change = format!(
            "{}: stroke {} w{} fill {} @{}",
            self.region_of(polygon),
            style.color,
            style.weight,
            style.fill_color,
            style.fill_opacity
        );
        self.changes.push(change);
    }

    fn bring_to_front(&mut self, polygon: &u32) {
        let change = format!("{}: to front", self.region_of(polygon));
        self.changes.push(change);
    }

    fn remove_polygon(&mut self, polygon: u32) {
        self.polygons.remove(&polygon);
    }

    fn add_label(&mut self, region: RegionId, at: LatLng, text: &str) -> u32 {
        self.next += 1;
        self.labels.insert(
            self.next,
            TextLabel {
                region,
                text: text.to_string(),
                at,
            },
        );
        self.next
    }

    fn set_label_style(&mut self, label: &u32, style: LabelStyle) {
        let text = self.labels.get(label).map_or("?", |l| l.text.as_str());
        let change = format!(
            "label {text:?}: {}px, shadow {}",
            style.font_size_px, style.text_shadow
        );
        self.changes.push(change);
    }

    fn remove_label(&mut self, label: u32) {
        self.labels.remove(&label);
    }

    fn fit_bounds(&mut self, bounds: Bounds, _padding: [u32; 2]) {
        self.viewport = Some(bounds);
    }

    fn invalidate_size(&mut self) {}
}
