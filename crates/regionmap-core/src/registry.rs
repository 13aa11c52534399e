// crates/regionmap-core/src/registry.rs

//! # Feature Registry
//!
//! Name-keyed lookup from a region's display name to the visuals that show
//! it. Polygons and labels never reference each other directly; anything
//! that needs "the label of this polygon" goes through the registry.
//!
//! Names are not unique in real boundary files. Inserting a name twice keeps
//! the later entry (last writer wins); this is accepted behaviour.

use crate::surface::RegionId;
use std::collections::HashMap;
use tracing::debug;

/// A polygon handle together with the feature it was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRef<P> {
    pub region: RegionId,
    pub handle: P,
}

/// Non-owning name lookup. Clearing the registry never destroys visuals.
#[derive(Debug, Clone)]
pub struct FeatureRegistry<P, L> {
    polygons: HashMap<String, PolygonRef<P>>,
    labels: HashMap<String, L>,
}

impl<P, L> Default for FeatureRegistry<P, L> {
    fn default() -> Self {
        Self {
            polygons: HashMap::new(),
            labels: HashMap::new(),
        }
    }
}

impl<P, L> FeatureRegistry<P, L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the polygon for `name`, replacing any earlier one.
    pub fn insert_polygon(&mut self, name: impl Into<String>, region: RegionId, handle: P) {
        let name = name.into();
        if let Some(previous) = self.polygons.insert(name, PolygonRef { region, handle }) {
            debug!(
                replaced = previous.region.0,
                by = region.0,
                "duplicate region name, keeping the later polygon"
            );
        }
    }

    /// Registers the label for `name`, replacing any earlier one.
    pub fn insert_label(&mut self, name: impl Into<String>, handle: L) {
        self.labels.insert(name.into(), handle);
    }

    pub fn lookup_polygon(&self, name: &str) -> Option<&PolygonRef<P>> {
        self.polygons.get(name)
    }

    pub fn lookup_label(&self, name: &str) -> Option<&L> {
        self.labels.get(name)
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.labels.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.polygons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn clear(&mut self) {
        self.polygons.clear();
        self.labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_duplicate_overwrites() {
        let mut reg: FeatureRegistry<u32, u32> = FeatureRegistry::new();
        reg.insert_polygon("MUARA", RegionId(0), 10);
        reg.insert_polygon("MUARA", RegionId(3), 13);
        assert_eq!(reg.polygon_count(), 1);
        assert_eq!(
            reg.lookup_polygon("MUARA"),
            Some(&PolygonRef {
                region: RegionId(3),
                handle: 13
            })
        );
    }

    #[test]
    fn labels_are_independent_of_polygons() {
        let mut reg: FeatureRegistry<u32, &str> = FeatureRegistry::new();
        reg.insert_polygon("A", RegionId(0), 1);
        reg.insert_polygon("B", RegionId(1), 2);
        reg.insert_label("A", "label-a");
        assert_eq!(reg.lookup_label("A"), Some(&"label-a"));
        assert_eq!(reg.lookup_label("B"), None);
        assert_eq!(reg.names(), ["A", "B"]);
    }

    #[test]
    fn clear_empties_both_maps() {
        let mut reg: FeatureRegistry<u32, u32> = FeatureRegistry::new();
        reg.insert_polygon("A", RegionId(0), 1);
        reg.insert_label("A", 2);
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.lookup_polygon("A").is_none());
    }
}
