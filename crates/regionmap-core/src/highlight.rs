// crates/regionmap-core/src/highlight.rs

//! # Highlight Coordinator
//!
//! Keeps the polygon layer and the label layer visually in sync.
//!
//! - At most one polygon is selected at any time.
//! - Hover is transient: entering a region emphasises its polygon and its
//!   label, leaving it restores them. Nothing about hover is remembered.
//! - Leaving a selected region restores the selected style, never the
//!   normal one.

use crate::registry::FeatureRegistry;
use crate::surface::{LabelStyle, MapSurface, RegionId, RegionStyle, VisualState};

#[derive(Debug, Clone, PartialEq)]
struct Selection<P> {
    region: RegionId,
    name: Option<String>,
    handle: P,
}

#[derive(Debug, Clone)]
pub struct HighlightCoordinator<P> {
    selected: Option<Selection<P>>,
}

impl<P> Default for HighlightCoordinator<P> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<P: Clone + PartialEq> HighlightCoordinator<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the selected region, when it has one.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_ref()?.name.as_deref()
    }

    pub fn selected_region(&self) -> Option<RegionId> {
        self.selected.as_ref().map(|s| s.region)
    }

    pub fn is_selected(&self, handle: &P) -> bool {
        self.selected.as_ref().is_some_and(|s| &s.handle == handle)
    }

    /// Style state of a polygon as far as selection is concerned.
    pub fn resting_state(&self, handle: &P) -> VisualState {
        if self.is_selected(handle) {
            VisualState::Selected
        } else {
            VisualState::Normal
        }
    }

    /// Selects a polygon. The previously selected polygon, if any, goes back
    /// to the normal style first.
    ///
    /// Clicks on a label are resolved to their polygon by the caller and
    /// land here too, so both layers always agree on the selection.
    pub fn on_click<S>(&mut self, surface: &mut S, region: RegionId, handle: &P, name: Option<&str>)
    where
        S: MapSurface<Polygon = P>,
    {
        if let Some(previous) = self.selected.take() {
            surface.set_polygon_style(&previous.handle, RegionStyle::NORMAL);
        }
        surface.set_polygon_style(handle, RegionStyle::SELECTED);
        surface.bring_to_front(handle);
        self.selected = Some(Selection {
            region,
            name: name.map(str::to_owned),
            handle: handle.clone(),
        });
    }

    /// Emphasises the polygon and the label registered under `name`,
    /// whichever of the two exist.
    pub fn on_hover_enter<S>(
        &self,
        surface: &mut S,
        registry: &FeatureRegistry<P, S::Label>,
        name: &str,
    ) where
        S: MapSurface<Polygon = P>,
    {
        if let Some(polygon) = registry.lookup_polygon(name) {
            surface.set_polygon_style(&polygon.handle, RegionStyle::HOVERED);
            surface.bring_to_front(&polygon.handle);
        }
        if let Some(label) = registry.lookup_label(name) {
            surface.set_label_style(label, LabelStyle::HOVERED);
        }
    }

    /// Restores the polygon to its resting style (selected or normal) and
    /// the label to normal.
    pub fn on_hover_exit<S>(&self, surface: &mut S, registry: &FeatureRegistry<P, S::Label>, name: &str)
    where
        S: MapSurface<Polygon = P>,
    {
        if let Some(polygon) = registry.lookup_polygon(name) {
            let state = self.resting_state(&polygon.handle);
            surface.set_polygon_style(&polygon.handle, RegionStyle::for_state(state));
        }
        if let Some(label) = registry.lookup_label(name) {
            surface.set_label_style(label, LabelStyle::NORMAL);
        }
    }

    /// Forgets the selection without touching any visual.
    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bounds, LatLng};
    use crate::model::Feature;
    use std::collections::HashMap;

    /// Remembers the last style applied to every handle.
    #[derive(Default)]
    struct StyleBook {
        polygons: HashMap<u32, RegionStyle>,
        labels: HashMap<u32, LabelStyle>,
        fronted: Vec<u32>,
    }

    impl MapSurface for StyleBook {
        type Polygon = u32;
        type Label = u32;

        fn add_polygon(&mut self, region: RegionId, _: &Feature) -> u32 {
            region.0 as u32
        }
        fn set_polygon_style(&mut self, polygon: &u32, style: RegionStyle) {
            self.polygons.insert(*polygon, style);
        }
        fn bring_to_front(&mut self, polygon: &u32) {
            self.fronted.push(*polygon);
        }
        fn remove_polygon(&mut self, _: u32) {}
        fn add_label(&mut self, region: RegionId, _: LatLng, _: &str) -> u32 {
            region.0 as u32
        }
        fn set_label_style(&mut self, label: &u32, style: LabelStyle) {
            self.labels.insert(*label, style);
        }
        fn remove_label(&mut self, _: u32) {}
        fn fit_bounds(&mut self, _: Bounds, _: [u32; 2]) {}
        fn invalidate_size(&mut self) {}
    }

    fn registry() -> FeatureRegistry<u32, u32> {
        let mut reg = FeatureRegistry::new();
        reg.insert_polygon("A", RegionId(1), 1);
        reg.insert_polygon("B", RegionId(2), 2);
        reg.insert_label("A", 101);
        reg
    }

    #[test]
    fn second_click_moves_selection() {
        let mut surface = StyleBook::default();
        let mut hl = HighlightCoordinator::new();

        hl.on_click(&mut surface, RegionId(1), &1, Some("A"));
        hl.on_click(&mut surface, RegionId(2), &2, Some("B"));

        assert_eq!(surface.polygons[&1], RegionStyle::NORMAL);
        assert_eq!(surface.polygons[&2], RegionStyle::SELECTED);
        assert_eq!(hl.selected_name(), Some("B"));
        assert_eq!(surface.fronted, [1, 2]);
    }

    #[test]
    fn hover_exit_keeps_selection() {
        let mut surface = StyleBook::default();
        let reg = registry();
        let mut hl = HighlightCoordinator::new();

        hl.on_hover_enter(&mut surface, &reg, "A");
        assert_eq!(surface.polygons[&1], RegionStyle::HOVERED);
        assert_eq!(surface.labels[&101], LabelStyle::HOVERED);

        hl.on_click(&mut surface, RegionId(1), &1, Some("A"));
        hl.on_hover_exit(&mut surface, &reg, "A");

        assert_eq!(surface.polygons[&1], RegionStyle::SELECTED);
        assert_eq!(surface.labels[&101], LabelStyle::NORMAL);
    }

    #[test]
    fn hover_over_selected_then_exit_restores_selected() {
        let mut surface = StyleBook::default();
        let reg = registry();
        let mut hl = HighlightCoordinator::new();

        hl.on_click(&mut surface, RegionId(1), &1, Some("A"));
        hl.on_hover_enter(&mut surface, &reg, "A");
        assert_eq!(surface.polygons[&1], RegionStyle::HOVERED);
        hl.on_hover_exit(&mut surface, &reg, "A");
        assert_eq!(surface.polygons[&1], RegionStyle::SELECTED);
    }

    #[test]
    fn hover_does_not_clear_selection() {
        let mut surface = StyleBook::default();
        let reg = registry();
        let mut hl = HighlightCoordinator::new();

        hl.on_click(&mut surface, RegionId(1), &1, Some("A"));
        hl.on_hover_enter(&mut surface, &reg, "B");
        hl.on_hover_exit(&mut surface, &reg, "B");

        assert_eq!(surface.polygons[&1], RegionStyle::SELECTED);
        assert_eq!(surface.polygons[&2], RegionStyle::NORMAL);
        assert_eq!(hl.selected_region(), Some(RegionId(1)));
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut surface = StyleBook::default();
        let hl: HighlightCoordinator<u32> = HighlightCoordinator::new();
        hl.on_hover_enter(&mut surface, &registry(), "nowhere");
        assert!(surface.polygons.is_empty());
        assert!(surface.labels.is_empty());
    }

    #[test]
    fn unnamed_polygons_can_be_selected() {
        let mut surface = StyleBook::default();
        let mut hl = HighlightCoordinator::new();
        hl.on_click(&mut surface, RegionId(7), &7, None);
        assert_eq!(hl.selected_name(), None);
        assert!(hl.is_selected(&7));
        hl.clear();
        assert!(!hl.is_selected(&7));
    }
}
