//! Basic usage example for regionmap-rs
//!
//! This example demonstrates how to:
//! - Implement a `MapSurface` (here: one that just prints)
//! - Load the bundled boundary map and drill down into a district
//! - Listen for selection and dataset-ready events

use regionmap_core::prelude::*;
use std::path::PathBuf;

/// Prints every drawing call instead of drawing.
#[derive(Default)]
struct PrintSurface {
    next: usize,
}

impl MapSurface for PrintSurface {
    type Polygon = usize;
    type Label = usize;

    fn add_polygon(&mut self, region: RegionId, feature: &Feature) -> usize {
        self.next += 1;
        let kind = feature.geometry.as_ref().map_or("none", |g| g.kind());
        println!("  + polygon #{} (region {}, {kind})", self.next, region.0);
        self.next
    }

    fn set_polygon_style(&mut self, polygon: &usize, style: RegionStyle) {
        println!("  ~ polygon #{polygon} -> {} / {}", style.color, style.fill_color);
    }

    fn bring_to_front(&mut self, _polygon: &usize) {}

    fn remove_polygon(&mut self, polygon: usize) {
        println!("  - polygon #{polygon}");
    }

    fn add_label(&mut self, _region: RegionId, at: LatLng, text: &str) -> usize {
        self.next += 1;
        println!("  + label #{} {text:?} at ({:.4}, {:.4})", self.next, at.lat, at.lng);
        self.next
    }

    fn set_label_style(&mut self, label: &usize, style: LabelStyle) {
        println!("  ~ label #{label} -> {}px", style.font_size_px);
    }

    fn remove_label(&mut self, label: usize) {
        println!("  - label #{label}");
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: [u32; 2]) {
        let c = bounds.center();
        println!("  fit to centre ({:.3}, {:.3}) with padding {padding:?}", c.lat, c.lng);
    }

    fn invalidate_size(&mut self) {
        println!("  relayout");
    }
}

fn main() -> Result<()> {
    println!("=== regionmap-rs Basic Usage Example ===\n");

    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("crates/regionmap-core/data");
    let catalog = LayerCatalog::load_from_path(data.join("catalog.json"))?;
    let source = FileSource::new(&data);

    let mut layer = BoundaryLayer::new(PrintSurface::default(), EngineConfig::default());
    let clicks = layer.bridge().subscribe_selection();
    let ready = layer.bridge().subscribe_ready();

    // 1. Top-level boundary map
    let Some(boundary) = catalog.initial() else {
        return Err(MapError::Catalog("catalog has no layers".into()));
    };
    println!("--- Loading {} ---", boundary.label);
    if let LoadOutcome::Ready(summary) = layer.load(boundary.dataset_spec(), &source)? {
        println!(
            "✓ {} regions, {} labels\n",
            summary.features, summary.labels
        );
    }

    // 2. Hover and click a district
    println!("--- Hover and click 'Sipoholon' ---");
    layer.hover_enter("Sipoholon");
    layer.click("Sipoholon");
    layer.hover_exit("Sipoholon");

    // 3. The application side: react to the selection
    while let Some(event) = clicks.try_next() {
        println!("selected: {}", serde_json::Value::Object(event.properties.clone()));
        if let Some(target) = catalog.drill_target(&event) {
            println!("\n--- Drilling into {} ---", catalog.district_name(target));
            layer.load(target.dataset_spec(), &source)?;
        }
    }

    for signal in ready.drain() {
        println!("dataset ready: {}", signal.dataset);
    }

    println!("\nVillages on screen: {:?}", layer.registry().names());
    Ok(())
}
