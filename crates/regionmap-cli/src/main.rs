//! regionmap: Command-line interface for regionmap-core
//!
//! Loads boundary datasets through the same engine a map view uses and
//! prints what would end up on screen: regions, placed labels, the
//! selection event of a click, or the style changes of a hover.
//!
//! Usage examples
//! --------------
//!
//! - List the catalog layers
//!   $ regionmap layers
//!
//! - Regions of a dataset (label field from the catalog, or --label-field)
//!   $ regionmap inspect "KEL TARUTUNG.geojson"
//!
//! - Which labels survive placement
//!   $ regionmap --min-separation 0.03 labels "KEL SIPOHOLON.geojson"
//!
//! - Click or hover a region by name
//!   $ regionmap click "Batas Kecamatan.geojson" Sipoholon
//!   $ regionmap hover "KEL TARUTUNG.geojson" Hapoltahan
//!
//! - Drill from the boundary layer into a district
//!   $ regionmap drill "Siborong Borong"
//!
//! Logging goes to stderr; `-v`/`-vv` or RUST_LOG control it.
mod args;
mod surface;

use crate::args::{CliArgs, Commands};
use crate::surface::TextSurface;
use anyhow::{bail, Context};
use clap::Parser;
use regionmap_core::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const BUNDLED_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../regionmap-core/data");

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let data_dir = PathBuf::from(args.data.clone().unwrap_or_else(|| BUNDLED_DATA.to_string()));
    let catalog_path = args
        .catalog
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("catalog.json"));
    let source = make_source(&args, &data_dir)?;

    let mut config = EngineConfig::default();
    if let Some(min) = args.min_separation {
        if !(min.is_finite() && min >= 0.0) {
            bail!("--min-separation must be a non-negative number, got {min}");
        }
        config.min_label_separation = min;
    }

    match args.command {
        Commands::Layers => {
            let catalog = load_catalog(&catalog_path)?;
            for layer in &catalog.layers {
                let marker = if layer.boundary { "*" } else { " " };
                println!(
                    "{marker} {:<32} {:<28} label field: {}",
                    layer.value, layer.label, layer.label_field
                );
            }
        }

        Commands::Inspect {
            dataset,
            label_field,
        } => {
            let spec = dataset_spec(&catalog_path, &dataset, label_field);
            let layer = open(spec, config, &*source)?;
            if let Some(bounds) = layer.surface().viewport {
                println!(
                    "bounds: ({:.4}, {:.4}) .. ({:.4}, {:.4})",
                    bounds.south_west.lat,
                    bounds.south_west.lng,
                    bounds.north_east.lat,
                    bounds.north_east.lng
                );
            }
            for (index, region) in layer.regions().iter().enumerate() {
                let name = region.name.as_deref().unwrap_or("<unnamed>");
                let kind = layer
                    .registry()
                    .lookup_label(name)
                    .map_or("", |_| " [label]");
                println!("{index:>4}  {name}{kind}");
            }
        }

        Commands::Labels {
            dataset,
            label_field,
        } => {
            let spec = dataset_spec(&catalog_path, &dataset, label_field);
            let layer = open(spec, config, &*source)?;
            let mut shown = 0;
            for label in layer.surface().labels() {
                println!(
                    "{:>4}  {:<32} ({:.5}, {:.5})",
                    label.region.0, label.text, label.at.lat, label.at.lng
                );
                shown += 1;
            }
            let named = layer.regions().iter().filter(|r| r.name.is_some()).count();
            println!("{shown} of {named} named regions labelled");
        }

        Commands::Click {
            dataset,
            name,
            label_field,
        } => {
            let spec = dataset_spec(&catalog_path, &dataset, label_field);
            let mut layer = open(spec, config, &*source)?;
            let event = layer
                .click(&name)
                .with_context(|| format!("no region named {name:?} in {dataset}"))?;
            println!("{}", serde_json::to_string_pretty(&event)?);

            if let Ok(catalog) = LayerCatalog::load_from_path(&catalog_path) {
                if let Some(target) = catalog.drill_target(&event) {
                    println!("drills down to: {} ({})", target.label, target.value);
                }
            }
        }

        Commands::Hover {
            dataset,
            name,
            label_field,
        } => {
            let spec = dataset_spec(&catalog_path, &dataset, label_field);
            let mut layer = open(spec, config, &*source)?;
            if layer.registry().lookup_polygon(&name).is_none() {
                bail!("no region named {name:?} in {dataset}");
            }
            layer.surface_mut().changes.clear();
            println!("enter:");
            layer.hover_enter(&name);
            print_changes(layer.surface_mut());
            println!("exit:");
            layer.hover_exit(&name);
            print_changes(layer.surface_mut());
        }

        Commands::Drill { district } => {
            let catalog = load_catalog(&catalog_path)?;
            let boundary = catalog
                .boundary_layer()
                .context("catalog has no boundary layer")?;
            let mut layer = open(boundary.dataset_spec(), config, &*source)?;
            let clicks = layer.bridge().subscribe_selection();

            if layer.click(&district).is_none() {
                bail!("no district named {district:?} on {}", boundary.label);
            }
            for event in clicks.drain() {
                let Some(target) = catalog.drill_target(&event) else {
                    bail!("{district:?} has no drill-down layer");
                };
                println!(
                    "{} -> {} ({})",
                    district,
                    catalog.district_name(target),
                    target.value
                );
                let summary = load(&mut layer, target.dataset_spec(), &*source)?;
                print_summary(&summary);
                for name in layer.registry().names() {
                    println!("  {name}");
                }
            }
        }
    }

    Ok(())
}

fn make_source(args: &CliArgs, data_dir: &Path) -> anyhow::Result<Box<dyn BoundarySource>> {
    #[cfg(feature = "http")]
    {
        if let Some(url) = &args.url {
            debug!(%url, "using HTTP transport");
            return Ok(Box::new(HttpSource::new(url)?));
        }
    }
    #[cfg(not(feature = "http"))]
    let _ = args;

    if !data_dir.is_dir() {
        bail!("data directory {} does not exist", data_dir.display());
    }
    debug!(dir = %data_dir.display(), "using file transport");
    Ok(Box::new(FileSource::new(data_dir)))
}

fn load_catalog(path: &Path) -> anyhow::Result<LayerCatalog> {
    LayerCatalog::load_from_path(path)
        .with_context(|| format!("failed to load catalog {}", path.display()))
}

/// Settings for `dataset`: an explicit label field wins, then the catalog
/// entry, then the default field.
fn dataset_spec(catalog_path: &Path, dataset: &str, label_field: Option<String>) -> DatasetSpec {
    let known = match LayerCatalog::load_from_path(catalog_path) {
        Ok(catalog) => catalog.find(dataset).map(LayerOption::dataset_spec),
        Err(e) => {
            debug!(error = %e, "no catalog, using defaults");
            None
        }
    };
    match (known, label_field) {
        (Some(spec), Some(field)) => DatasetSpec {
            label_field: field,
            ..spec
        },
        (Some(spec), None) => spec,
        (None, field) => DatasetSpec::new(
            dataset,
            field.unwrap_or_else(|| DEFAULT_LABEL_FIELD.to_string()),
        ),
    }
}

fn open(
    spec: DatasetSpec,
    config: EngineConfig,
    source: &dyn BoundarySource,
) -> anyhow::Result<BoundaryLayer<TextSurface>> {
    let mut layer = BoundaryLayer::new(TextSurface::new(), config);
    let summary = load(&mut layer, spec, source)?;
    print_summary(&summary);
    Ok(layer)
}

fn load(
    layer: &mut BoundaryLayer<TextSurface>,
    spec: DatasetSpec,
    source: &dyn BoundarySource,
) -> anyhow::Result<LoadSummary> {
    let dataset = spec.dataset.clone();
    match layer
        .load(spec, source)
        .with_context(|| format!("failed to load {dataset}"))?
    {
        LoadOutcome::Ready(summary) => Ok(summary),
        LoadOutcome::Stale => bail!("load of {dataset} was superseded"),
    }
}

fn print_summary(summary: &LoadSummary) {
    println!(
        "{}: {} features, {} named, {} labels{}",
        summary.dataset,
        summary.features,
        summary.named_regions,
        summary.labels,
        if summary.fitted { "" } else { " (no extent)" }
    );
}

fn print_changes(surface: &mut TextSurface) {
    for change in surface.changes.drain(..) {
        println!("  {change}");
    }
}
