// crates/regionmap-core/src/lib.rs

//! # regionmap-core
//!
//! Engine behind an interactive administrative-boundary map: it loads a
//! GeoJSON dataset, draws one polygon per region through a [`MapSurface`],
//! places non-overlapping name labels, keeps hover and selection styling
//! consistent between polygons and labels, and publishes selection events.
//!
//! The engine never draws anything itself. Hosts (a browser binding, a
//! terminal renderer, a test double) implement [`MapSurface`] and feed
//! pointer input back through [`BoundaryLayer::dispatch`].
//!
//! ```
//! use regionmap_core::prelude::*;
//!
//! # fn run<S: MapSurface>(surface: S) -> regionmap_core::Result<()> {
//! let source = MemorySource::new().with(
//!     "villages.geojson",
//!     r#"{"type":"FeatureCollection","features":[]}"#,
//! );
//! let mut layer = BoundaryLayer::new(surface, EngineConfig::default());
//! let clicks = layer.bridge().subscribe_selection();
//! layer.load(DatasetSpec::new("villages.geojson", "NAMOBJ"), &source)?;
//! assert_eq!(layer.state(), LoadState::Ready);
//! assert!(clicks.try_next().is_none());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod highlight;
pub mod labels;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod registry;
pub mod resize;
pub mod surface;
pub mod text;

// Re-exports
pub use crate::catalog::{LayerCatalog, LayerOption, NameResolver};
pub use crate::config::{DatasetSpec, EngineConfig};
pub use crate::error::{MapError, Result};
pub use crate::events::{DatasetReady, EventBridge, SelectionEvent, Subscription, Topic};
pub use crate::geometry::{representative_point, Bounds, LatLng};
pub use crate::labels::{place_labels, LabelCandidate};
pub use crate::loader::{BoundaryLayer, BoundarySource, LoadOutcome, LoadState, LoadSummary, LoadToken};
pub use crate::model::{Feature, FeatureCollection, Geometry, Properties};
pub use crate::surface::{HitTarget, MapSurface, PointerEvent, PointerKind, RegionId};
