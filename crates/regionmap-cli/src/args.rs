use clap::{Parser, Subcommand};

/// CLI arguments for regionmap
#[derive(Debug, Parser)]
#[command(
    name = "regionmap",
    version,
    about = "CLI for loading and inspecting interactive boundary maps"
)]
pub struct CliArgs {
    /// Directory holding the boundary datasets (default: bundled sample data)
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Option<String>,

    /// Layer catalog JSON (default: <data>/catalog.json)
    #[arg(short = 'c', long = "catalog", global = true)]
    pub catalog: Option<String>,

    /// Fetch datasets from this base URL instead of the data directory
    #[cfg(feature = "http")]
    #[arg(long = "url", global = true)]
    pub url: Option<String>,

    /// Minimum distance between label anchors, in degrees
    #[arg(long = "min-separation", global = true)]
    pub min_separation: Option<f64>,

    /// Log engine activity (repeat for more detail); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the layers of the catalog
    Layers,

    /// Load a dataset and list its regions
    Inspect {
        /// Dataset identifier (e.g. "KEL MUARA.geojson")
        dataset: String,

        /// Property holding region names (default: from the catalog, else NAMOBJ)
        #[arg(short = 'l', long = "label-field")]
        label_field: Option<String>,
    },

    /// Load a dataset and show where labels end up
    Labels {
        dataset: String,

        #[arg(short = 'l', long = "label-field")]
        label_field: Option<String>,
    },

    /// Click a region by name and print the selection event
    Click {
        dataset: String,

        /// Region name as shown on its label
        name: String,

        #[arg(short = 'l', long = "label-field")]
        label_field: Option<String>,
    },

    /// Hover a region by name and print the resulting style changes
    Hover {
        dataset: String,

        name: String,

        #[arg(short = 'l', long = "label-field")]
        label_field: Option<String>,
    },

    /// Click a district on the boundary layer and open its drill-down layer
    Drill {
        /// District name on the boundary layer (e.g. "Siborong Borong")
        district: String,
    },
}
