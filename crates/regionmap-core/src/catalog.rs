// crates/regionmap-core/src/catalog.rs

//! # Layer Catalog
//!
//! The set of boundary datasets an application offers, and the routing rule
//! that turns a click on the top-level boundary map into the drill-down
//! dataset for that district.
//!
//! Alternate spellings of district names are never hard-coded here. They come
//! in through a [`NameResolver`], usually the catalog's own `aliases` table.

use crate::config::DatasetSpec;
use crate::error::{MapError, Result};
use crate::events::SelectionEvent;
use crate::text::{contains_folded, equals_folded};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Maps a region name as found in boundary data to a canonical layer label.
pub trait NameResolver {
    fn resolve(&self, name: &str) -> Option<String>;
}

/// Alias tables are keyed by upper-cased names.
impl NameResolver for HashMap<String, String> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(&name.to_uppercase())
            .or_else(|| self.get(name))
            .cloned()
    }
}

impl<F> NameResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// One selectable dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerOption {
    /// Dataset identifier handed to the transport.
    pub value: String,
    /// Human-readable name, also the target of alias resolution.
    pub label: String,
    /// Property holding each feature's display name.
    pub label_field: String,
    /// Top administrative level.
    #[serde(default)]
    pub boundary: bool,
}

impl LayerOption {
    pub fn dataset_spec(&self) -> DatasetSpec {
        DatasetSpec::new(&self.value, &self.label_field).boundary(self.boundary)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerCatalog {
    pub layers: Vec<LayerOption>,
    /// Upper-cased region name -> canonical layer label.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// Prefix stripped from layer labels to get the district name used by
    /// other data sources (e.g. `"Kecamatan "`).
    #[serde(default)]
    pub label_prefix: Option<String>,
}

impl LayerCatalog {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let catalog: LayerCatalog = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MapError::NotFound(format!("Catalog not found at {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Layers must exist, have unique identifiers and non-empty label fields.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(MapError::Catalog("no layers defined".into()));
        }
        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.value.as_str()) {
                return Err(MapError::Catalog(format!("duplicate layer `{}`", layer.value)));
            }
            if layer.label_field.is_empty() {
                return Err(MapError::Catalog(format!(
                    "layer `{}` has an empty label field",
                    layer.value
                )));
            }
        }
        Ok(())
    }

    /// The layer shown first: the boundary layer, or the first one listed.
    pub fn initial(&self) -> Option<&LayerOption> {
        self.boundary_layer().or_else(|| self.layers.first())
    }

    pub fn boundary_layer(&self) -> Option<&LayerOption> {
        self.layers.iter().find(|l| l.boundary)
    }

    pub fn find(&self, value: &str) -> Option<&LayerOption> {
        self.layers.iter().find(|l| l.value == value)
    }

    pub fn find_by_label(&self, label: &str) -> Option<&LayerOption> {
        self.layers
            .iter()
            .find(|l| l.label == label)
            .or_else(|| self.layers.iter().find(|l| equals_folded(&l.label, label)))
    }

    /// Layer label without the configured prefix.
    pub fn district_name<'a>(&self, layer: &'a LayerOption) -> &'a str {
        match &self.label_prefix {
            Some(prefix) => layer.label.strip_prefix(prefix.as_str()).unwrap_or(&layer.label),
            None => &layer.label,
        }
    }

    /// Drill-down target for a click, resolving names through `aliases`.
    pub fn drill_target(&self, event: &SelectionEvent) -> Option<&LayerOption> {
        self.drill_target_with(event, &self.aliases)
    }

    /// Drill-down target for a click on the boundary level.
    ///
    /// The clicked region's name (under the boundary layer's label field) is
    /// resolved first; a hit selects the layer with that label. Otherwise the
    /// first drill-down layer whose label contains the name is chosen.
    /// Clicks on drill-down levels never route anywhere.
    pub fn drill_target_with<R>(&self, event: &SelectionEvent, resolver: &R) -> Option<&LayerOption>
    where
        R: NameResolver + ?Sized,
    {
        if !event.is_boundary_level {
            return None;
        }
        let boundary = self.boundary_layer()?;
        let name = match event.properties.get(&boundary.label_field)? {
            Value::String(s) if !s.trim().is_empty() => s.trim(),
            _ => return None,
        };

        if let Some(label) = resolver.resolve(name) {
            return self.find_by_label(&label);
        }

        self.layers
            .iter()
            .filter(|l| !l.boundary)
            .find(|l| contains_folded(&l.label, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Properties;
    use serde_json::json;

    const CATALOG: &str = r#"{
        "labelPrefix": "Kecamatan ",
        "layers": [
            { "value": "Batas Kecamatan.geojson", "labelField": "WADMKC", "label": "Batas Kecamatan", "boundary": true },
            { "value": "KEL MUARA.geojson", "labelField": "NAMOBJ", "label": "Kecamatan Muara" },
            { "value": "KEL SIBORONG BORONG.geojson", "labelField": "NAMOBJ", "label": "Kecamatan Siborong-Borong" }
        ],
        "aliases": { "SIBORONG BORONG": "Kecamatan Siborong-Borong" }
    }"#;

    fn click(props: Value, boundary: bool) -> SelectionEvent {
        let properties: Properties = props.as_object().cloned().unwrap_or_default();
        SelectionEvent {
            properties,
            is_boundary_level: boundary,
        }
    }

    #[test]
    fn alias_hit_routes_to_labelled_layer() {
        let catalog = LayerCatalog::from_json_str(CATALOG).unwrap();
        let target = catalog
            .drill_target(&click(json!({ "WADMKC": "Siborong Borong" }), true))
            .unwrap();
        assert_eq!(target.value, "KEL SIBORONG BORONG.geojson");
    }

    #[test]
    fn substring_fallback_without_alias() {
        let catalog = LayerCatalog::from_json_str(CATALOG).unwrap();
        let target = catalog
            .drill_target(&click(json!({ "WADMKC": "MUARA" }), true))
            .unwrap();
        assert_eq!(target.value, "KEL MUARA.geojson");
        assert_eq!(catalog.district_name(target), "Muara");
    }

    #[test]
    fn drill_level_clicks_do_not_route() {
        let catalog = LayerCatalog::from_json_str(CATALOG).unwrap();
        assert!(catalog
            .drill_target(&click(json!({ "WADMKC": "MUARA" }), false))
            .is_none());
        assert!(catalog
            .drill_target(&click(json!({ "NAMOBJ": "MUARA" }), true))
            .is_none());
    }

    #[test]
    fn injected_resolver_wins_over_table() {
        let catalog = LayerCatalog::from_json_str(CATALOG).unwrap();
        let resolver = |_: &str| Some("Kecamatan Muara".to_string());
        let target = catalog
            .drill_target_with(&click(json!({ "WADMKC": "anything" }), true), &resolver)
            .unwrap();
        assert_eq!(target.value, "KEL MUARA.geojson");
    }

    #[test]
    fn invalid_catalogs_are_rejected() {
        assert!(matches!(
            LayerCatalog::from_json_str(r#"{ "layers": [] }"#),
            Err(MapError::Catalog(_))
        ));
        let dup = r#"{ "layers": [
            { "value": "a", "labelField": "N", "label": "A" },
            { "value": "a", "labelField": "N", "label": "B" }
        ] }"#;
        assert!(matches!(LayerCatalog::from_json_str(dup), Err(MapError::Catalog(_))));
    }

    #[test]
    fn initial_layer_is_the_boundary_layer() {
        let catalog = LayerCatalog::from_json_str(CATALOG).unwrap();
        let spec = catalog.initial().unwrap().dataset_spec();
        assert_eq!(spec.dataset, "Batas Kecamatan.geojson");
        assert_eq!(spec.label_field, "WADMKC");
        assert!(spec.boundary_level);
    }
}
