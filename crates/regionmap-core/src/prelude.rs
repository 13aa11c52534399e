//! regionmap-core prelude: common types and traits for hosts and demos.

pub use crate::catalog::{LayerCatalog, LayerOption, NameResolver};
pub use crate::config::{DatasetSpec, EngineConfig, DEFAULT_LABEL_FIELD};
pub use crate::error::{MapError, Result};
pub use crate::events::{DatasetReady, EventBridge, SelectionEvent, Subscription};
pub use crate::geometry::{representative_point, Bounds, LatLng};
pub use crate::labels::{place_labels, LabelCandidate, DEFAULT_MIN_SEPARATION};
#[cfg(feature = "http")]
pub use crate::loader::HttpSource;
pub use crate::loader::{
    BoundaryLayer, BoundarySource, FileSource, LoadOutcome, LoadState, LoadSummary, LoadToken,
    MemorySource, Region,
};
pub use crate::model::{Feature, FeatureCollection, Geometry, Properties};
pub use crate::surface::{
    HitTarget, LabelStyle, MapSurface, PointerEvent, PointerKind, RegionId, RegionStyle,
    VisualState,
};
