// crates/regionmap-core/src/loader/mod.rs

//! # Boundary Layer Loader
//!
//! Owns every visual of the dataset on screen and drives the load lifecycle:
//!
//! ```text
//! Idle -> Fetching -> Parsing -> Building -> Ready
//!            |           |
//!            +--> Error <+
//! (any) -> TornDown      when a new load begins or the layer is discarded
//! ```
//!
//! Loads are split in two halves so the fetch can happen anywhere (a
//! blocking client, a browser `fetch`, a test): [`BoundaryLayer::begin_load`]
//! tears down the current dataset and hands out a [`LoadToken`];
//! [`BoundaryLayer::complete_load`] applies a payload only if its token is
//! still the current one. A superseded load is dropped before it touches any
//! visual.

use crate::config::{DatasetSpec, EngineConfig};
use crate::error::Result;
use crate::events::{DatasetReady, EventBridge, SelectionEvent};
use crate::geometry::{representative_point, Bounds};
use crate::highlight::HighlightCoordinator;
use crate::labels::{place_labels, LabelCandidate};
use crate::model::{FeatureCollection, Properties};
use crate::registry::FeatureRegistry;
use crate::resize::ResizeDebounce;
use crate::surface::{HitTarget, MapSurface, PointerEvent, PointerKind, RegionId};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

pub mod common_io;
pub mod source;

pub use source::{BoundarySource, FileSource, MemorySource};
#[cfg(feature = "http")]
pub use source::HttpSource;

/// Lifecycle state of a [`BoundaryLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadState {
    Idle,
    Fetching,
    Parsing,
    Building,
    Ready,
    Error,
    TornDown,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadState::Idle => "idle",
            LoadState::Fetching => "fetching",
            LoadState::Parsing => "parsing",
            LoadState::Building => "building",
            LoadState::Ready => "ready",
            LoadState::Error => "error",
            LoadState::TornDown => "torn down",
        };
        f.write_str(s)
    }
}

/// Identifies one load. Only the most recently issued token is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(u64);

impl LoadToken {
    /// Rebuilds a token that crossed an FFI boundary as a plain number.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a finished load produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub dataset: String,
    pub features: usize,
    /// Distinct names registered for lookup.
    pub named_regions: usize,
    pub labels: usize,
    /// Whether the viewport was fitted to the data.
    pub fitted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready(LoadSummary),
    /// The payload belonged to a superseded load and was ignored.
    Stale,
}

/// One drawn feature.
#[derive(Debug, Clone)]
pub struct Region<P> {
    pub name: Option<String>,
    pub properties: Properties,
    pub polygon: P,
}

/// The interactive boundary layer of one map view.
pub struct BoundaryLayer<S: MapSurface> {
    surface: S,
    config: EngineConfig,
    bridge: EventBridge,
    state: LoadState,
    generation: u64,
    dataset: Option<DatasetSpec>,
    /// Id of `regions[0]`.
    region_base: usize,
    regions: Vec<Region<S::Polygon>>,
    labels: Vec<(RegionId, S::Label)>,
    registry: FeatureRegistry<S::Polygon, S::Label>,
    highlight: HighlightCoordinator<S::Polygon>,
    resize: ResizeDebounce,
    discarded: bool,
}

impl<S: MapSurface> BoundaryLayer<S> {
    pub fn new(surface: S, config: EngineConfig) -> Self {
        Self::with_bridge(surface, config, EventBridge::new())
    }

    /// Uses an existing bridge, so listeners can subscribe before the layer
    /// is created.
    pub fn with_bridge(surface: S, config: EngineConfig, bridge: EventBridge) -> Self {
        let resize = ResizeDebounce::new(config.resize_debounce_ms);
        Self {
            surface,
            config,
            bridge,
            state: LoadState::Idle,
            generation: 0,
            dataset: None,
            region_base: 0,
            regions: Vec::new(),
            labels: Vec::new(),
            registry: FeatureRegistry::new(),
            highlight: HighlightCoordinator::new(),
            resize,
            discarded: false,
        }
    }

    // -----------------------------------------------------------------------
    // ACCESSORS
    // -----------------------------------------------------------------------

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn dataset(&self) -> Option<&DatasetSpec> {
        self.dataset.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bridge(&self) -> &EventBridge {
        &self.bridge
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface for host-side concerns (panning,
    /// zooming). Visual objects owned by the layer must not be removed here.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn registry(&self) -> &FeatureRegistry<S::Polygon, S::Label> {
        &self.registry
    }

    pub fn regions(&self) -> &[Region<S::Polygon>] {
        &self.regions
    }

    /// The drawn region behind `id`, if it belongs to the current dataset.
    pub fn region(&self, id: RegionId) -> Option<&Region<S::Polygon>> {
        self.regions.get(id.0.checked_sub(self.region_base)?)
    }

    /// Rendered labels with the region each one belongs to.
    pub fn labels(&self) -> &[(RegionId, S::Label)] {
        &self.labels
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.highlight.selected_name()
    }

    pub fn selected_region(&self) -> Option<RegionId> {
        self.highlight.selected_region()
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    // -----------------------------------------------------------------------
    // LIFECYCLE
    // -----------------------------------------------------------------------

    /// Starts loading `spec`: tears the current dataset down, invalidates
    /// any in-flight load and enters `Fetching`.
    pub fn begin_load(&mut self, spec: DatasetSpec) -> LoadToken {
        if self.discarded {
            warn!(dataset = %spec.dataset, "load requested on a discarded layer");
            return LoadToken(self.generation);
        }

        self.teardown();
        self.generation += 1;
        debug!(dataset = %spec.dataset, generation = self.generation, "fetching");
        self.dataset = Some(spec);
        self.state = LoadState::Fetching;
        LoadToken(self.generation)
    }

    pub fn is_current(&self, token: LoadToken) -> bool {
        !self.discarded && token.0 == self.generation && self.state == LoadState::Fetching
    }

    /// Applies the fetched payload of the load identified by `token`.
    ///
    /// Stale tokens yield `Ok(LoadOutcome::Stale)` with no side effects.
    /// Fetch and payload errors move the layer to `Error`, are logged, and
    /// are returned so the host can decide whether to show anything.
    pub fn complete_load(&mut self, token: LoadToken, payload: Result<Vec<u8>>) -> Result<LoadOutcome> {
        if !self.is_current(token) {
            debug!(token = token.0, current = self.generation, "discarding stale load");
            return Ok(LoadOutcome::Stale);
        }

        let dataset = self
            .dataset
            .as_ref()
            .map(|d| d.dataset.clone())
            .unwrap_or_default();

        let bytes = match payload {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%dataset, error = %e, "failed to fetch boundary data");
                self.state = LoadState::Error;
                return Err(e);
            }
        };

        self.state = LoadState::Parsing;
        let collection = match FeatureCollection::from_slice(&bytes) {
            Ok(c) => c,
            Err(e) => {
                warn!(%dataset, error = %e, "failed to parse boundary data");
                self.state = LoadState::Error;
                return Err(e);
            }
        };

        Ok(LoadOutcome::Ready(self.build(collection)))
    }

    /// Fetches and applies a dataset in one go.
    pub fn load<B>(&mut self, spec: DatasetSpec, source: &B) -> Result<LoadOutcome>
    where
        B: BoundarySource + ?Sized,
    {
        let token = self.begin_load(spec);
        let Some(dataset) = self.dataset.as_ref().map(|d| d.dataset.clone()) else {
            return Ok(LoadOutcome::Stale);
        };
        let payload = source.fetch(&dataset);
        self.complete_load(token, payload)
    }

    /// Shows an already parsed collection, skipping the fetch.
    pub fn show(&mut self, spec: DatasetSpec, collection: FeatureCollection) -> LoadOutcome {
        let token = self.begin_load(spec);
        if !self.is_current(token) {
            return LoadOutcome::Stale;
        }
        self.state = LoadState::Parsing;
        LoadOutcome::Ready(self.build(collection))
    }

    fn build(&mut self, collection: FeatureCollection) -> LoadSummary {
        self.state = LoadState::Building;
        let spec = self.dataset.clone().unwrap_or_else(|| DatasetSpec::new("", ""));

        let mut candidates = Vec::new();
        for (index, feature) in collection.features.iter().enumerate() {
            let region = RegionId(self.region_base + index);
            let polygon = self.surface.add_polygon(region, feature);
            let name = feature.name(&spec.label_field);

            match &name {
                Some(name) => {
                    self.registry.insert_polygon(name.clone(), region, polygon.clone());
                    match representative_point(feature) {
                        Some(at) => candidates.push(LabelCandidate::new((region, name.clone()), at)),
                        None => debug!(region = index, %name, "no representative point, label skipped"),
                    }
                }
                None => debug!(region = index, field = %spec.label_field, "feature has no name"),
            }

            self.regions.push(Region {
                name,
                properties: feature.properties.clone(),
                polygon,
            });
        }

        for placed in place_labels(candidates, self.config.min_label_separation) {
            let (region, name) = placed.item;
            let label = self.surface.add_label(region, placed.at, &name);
            self.registry.insert_label(name, label.clone());
            self.labels.push((region, label));
        }

        let fitted = match Bounds::of_features(&collection.features) {
            Some(bounds) => {
                self.surface.fit_bounds(bounds, self.config.fit_padding);
                true
            }
            None => false,
        };

        self.state = LoadState::Ready;
        let summary = LoadSummary {
            dataset: spec.dataset.clone(),
            features: collection.len(),
            named_regions: self.registry.polygon_count(),
            labels: self.labels.len(),
            fitted,
        };
        info!(
            dataset = %summary.dataset,
            features = summary.features,
            labels = summary.labels,
            "boundary layer ready"
        );

        self.bridge.ready.publish(DatasetReady {
            dataset: spec.dataset,
        });
        summary
    }

    /// Removes every visual of the current dataset and forgets it.
    /// Any in-flight load becomes stale.
    pub fn teardown(&mut self) {
        for (_, label) in self.labels.drain(..) {
            self.surface.remove_label(label);
        }
        self.region_base += self.regions.len();
        for region in self.regions.drain(..) {
            self.surface.remove_polygon(region.polygon);
        }
        self.registry.clear();
        self.highlight.clear();
        self.generation += 1;
        if let Some(spec) = self.dataset.take() {
            info!(dataset = %spec.dataset, "boundary layer torn down");
        }
        self.state = LoadState::TornDown;
    }

    /// Tears down and stops reacting to anything, resize included.
    pub fn discard(&mut self) {
        self.teardown();
        self.resize.unregister();
        self.discarded = true;
    }

    // -----------------------------------------------------------------------
    // INTERACTION
    // -----------------------------------------------------------------------

    /// Routes pointer input from a visual. Returns the published selection
    /// event for clicks. Input for visuals that are no longer part of the
    /// current dataset is ignored.
    pub fn dispatch(&mut self, event: PointerEvent) -> Option<SelectionEvent> {
        if self.state != LoadState::Ready {
            return None;
        }

        let (HitTarget::Polygon(id) | HitTarget::Label(id)) = event.target;
        let Some(region) = self.region(id) else {
            debug!(region = id.0, "input for a removed visual ignored");
            return None;
        };
        let name = region.name.clone();

        match event.kind {
            PointerKind::Click => self.click_region(id),
            PointerKind::Enter => {
                self.hover_enter(name.as_deref()?);
                None
            }
            PointerKind::Exit => {
                self.hover_exit(name.as_deref()?);
                None
            }
        }
    }

    /// Selects the region registered under `name` and publishes the event.
    /// With duplicate names this is the last feature carrying the name; a
    /// click on a visual always selects that visual's own feature.
    pub fn click(&mut self, name: &str) -> Option<SelectionEvent> {
        let region = self.registry.lookup_polygon(name)?.region;
        self.click_region(region)
    }

    pub fn hover_enter(&mut self, name: &str) {
        self.highlight
            .on_hover_enter(&mut self.surface, &self.registry, name);
    }

    pub fn hover_exit(&mut self, name: &str) {
        self.highlight
            .on_hover_exit(&mut self.surface, &self.registry, name);
    }

    fn click_region(&mut self, id: RegionId) -> Option<SelectionEvent> {
        let region = self.regions.get(id.0.checked_sub(self.region_base)?)?;
        self.highlight
            .on_click(&mut self.surface, id, &region.polygon, region.name.as_deref());

        let event = SelectionEvent {
            properties: region.properties.clone(),
            is_boundary_level: self.dataset.as_ref().is_some_and(|d| d.boundary_level),
        };
        debug!(region = id.0, name = ?region.name, "region selected");
        self.bridge.selection.publish(event.clone());
        Some(event)
    }

    // -----------------------------------------------------------------------
    // RESIZE
    // -----------------------------------------------------------------------

    /// Records a viewport resize notification (host clock, milliseconds).
    pub fn notify_resize(&mut self, now_ms: u64) {
        self.resize.notify(now_ms);
    }

    /// Relayouts the surface once the resize burst has settled.
    /// Returns whether a relayout happened.
    pub fn poll_resize(&mut self, now_ms: u64) -> bool {
        if self.discarded || !self.resize.poll(now_ms) {
            return false;
        }
        self.surface.invalidate_size();
        true
    }
}

impl<S: MapSurface> fmt::Debug for BoundaryLayer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryLayer")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("dataset", &self.dataset)
            .field("regions", &self.regions.len())
            .field("labels", &self.labels.len())
            .field("selected", &self.highlight.selected_region())
            .finish()
    }
}
