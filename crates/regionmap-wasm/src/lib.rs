//! regionmap-wasm: WebAssembly bindings for regionmap-core
//!
//! This crate lets a browser map (Leaflet, MapLibre, plain SVG, ...) be
//! driven by the `regionmap-core` boundary-layer engine. The engine decides
//! what to draw and how to style it; the page supplies a `Renderer` object
//! that does the drawing and reports pointer input back.
//!
//! What it provides
//! ----------------
//! - `RegionMap`: one interactive boundary layer bound to a `Renderer`
//!   - loads in two halves, so the page owns the `fetch`:
//!     `beginLoad(dataset, labelField, boundaryLevel)` -> token,
//!     `completeLoad(token, text)` / `failLoad(token, message)`
//!   - pointer input: `pointer({ target: { kind, region }, kind })`,
//!     `clickPolygon(region)`, `clickLabel(region)`, `hoverEnter(name)`, ...
//!   - listeners: `onSelect(fn)`, `onReady(fn)`
//!   - resize debouncing: `notifyResize(now)`, `pollResize(now)`
//! - `RegionCatalog`: layer list plus drill-down routing for clicks on the
//!   boundary level
//! - `representativePoint(feature)`: label anchor of a GeoJSON feature
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { RegionMap } from 'regionmap-wasm';
//!
//! await init();
//! const map = new RegionMap(renderer);          // renderer: see `Renderer`
//! map.onSelect(e => console.log(e.properties, e.isBoundaryLevel));
//!
//! const token = map.beginLoad('KEL MUARA.geojson', 'NAMOBJ', false);
//! const res = await fetch('/data/KEL MUARA.geojson');
//! if (res.ok) map.completeLoad(token, await res.text());
//! else map.failLoad(token, `HTTP ${res.status}`);
//! ```
//!
//! Notes
//! -----
//! - Superseded loads are dropped: `completeLoad` returns `null` for a token
//!   that is no longer current, without touching the renderer.
//! - Renderer exceptions are logged to the console and otherwise ignored.

use regionmap_core::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use std::cell::RefCell;
use std::result::Result;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&format!("regionmap-wasm {} ready", version()).into());
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[wasm_bindgen(typescript_custom_section)]
const RENDERER_TS: &'static str = r#"
export interface Renderer {
  addPolygon(handle: number, region: number, feature: object): void;
  setPolygonStyle(handle: number, style: object): void;
  bringToFront(handle: number): void;
  removePolygon(handle: number): void;
  addLabel(handle: number, region: number, label: object): void;
  setLabelStyle(handle: number, style: object): void;
  removeLabel(handle: number): void;
  fitBounds(bounds: [[number, number], [number, number]], padding: [number, number]): void;
  invalidateSize(): void;
}
"#;

#[wasm_bindgen]
extern "C" {
    /// Drawing backend implemented by the page.
    #[wasm_bindgen(typescript_type = "Renderer")]
    pub type Renderer;

    #[wasm_bindgen(method, catch, js_name = addPolygon)]
    fn add_polygon(this: &Renderer, handle: u32, region: u32, feature: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setPolygonStyle)]
    fn set_polygon_style(this: &Renderer, handle: u32, style: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = bringToFront)]
    fn bring_to_front(this: &Renderer, handle: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = removePolygon)]
    fn remove_polygon(this: &Renderer, handle: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLabel)]
    fn add_label(this: &Renderer, handle: u32, region: u32, label: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setLabelStyle)]
    fn set_label_style(this: &Renderer, handle: u32, style: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = removeLabel)]
    fn remove_label(this: &Renderer, handle: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = fitBounds)]
    fn fit_bounds(this: &Renderer, bounds: &JsValue, padding: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = invalidateSize)]
    fn invalidate_size(this: &Renderer) -> Result<(), JsValue>;
}

/* --------------------------------------------------------------------------
   Helpers
-------------------------------------------------------------------------- */

/// Plain JS objects (not `Map`s) for everything serde produces.
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

fn report(result: Result<(), JsValue>, call: &str) {
    if let Err(e) = result {
        web_sys::console::warn_2(&format!("regionmap: renderer.{call} failed").into(), &e);
    }
}

fn token_from_js(token: f64) -> LoadToken {
    LoadToken::from_raw(token as u64)
}

/// What `addLabel` receives.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LabelMarker<'a> {
    text: &'a str,
    lat: f64,
    lng: f64,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
    style: LabelStyle,
}

/* --------------------------------------------------------------------------
   Surface
-------------------------------------------------------------------------- */

struct JsSurface {
    renderer: Renderer,
    next: u32,
}

impl JsSurface {
    fn handle(&mut self) -> u32 {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}

impl MapSurface for JsSurface {
    type Polygon = u32;
    type Label = u32;

    fn add_polygon(&mut self, region: RegionId, feature: &Feature) -> u32 {
        let handle = self.handle();
        let geojson = to_js(&feature.to_value());
        report(
            self.renderer.add_polygon(handle, region.0 as u32, &geojson),
            "addPolygon",
        );
        report(
            self.renderer
                .set_polygon_style(handle, &to_js(&RegionStyle::NORMAL)),
            "setPolygonStyle",
        );
        handle
    }

    fn set_polygon_style(&mut self, polygon: &u32, style: RegionStyle) {
        report(
            self.renderer.set_polygon_style(*polygon, &to_js(&style)),
            "setPolygonStyle",
        );
    }

    fn bring_to_front(&mut self, polygon: &u32) {
        report(self.renderer.bring_to_front(*polygon), "bringToFront");
    }

    fn remove_polygon(&mut self, polygon: u32) {
        report(self.renderer.remove_polygon(polygon), "removePolygon");
    }

    fn add_label(&mut self, region: RegionId, at: LatLng, text: &str) -> u32 {
        let handle = self.handle();
        let marker = LabelMarker {
            text,
            lat: at.lat,
            lng: at.lng,
            icon_size: regionmap_core::surface::LABEL_ICON_SIZE,
            icon_anchor: regionmap_core::surface::LABEL_ICON_ANCHOR,
            style: LabelStyle::NORMAL,
        };
        report(
            self.renderer.add_label(handle, region.0 as u32, &to_js(&marker)),
            "addLabel",
        );
        handle
    }

    fn set_label_style(&mut self, label: &u32, style: LabelStyle) {
        report(
            self.renderer.set_label_style(*label, &to_js(&style)),
            "setLabelStyle",
        );
    }

    fn remove_label(&mut self, label: u32) {
        report(self.renderer.remove_label(label), "removeLabel");
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: [u32; 2]) {
        let corners = [
            [bounds.south_west.lat, bounds.south_west.lng],
            [bounds.north_east.lat, bounds.north_east.lng],
        ];
        report(
            self.renderer.fit_bounds(&to_js(&corners), &to_js(&padding)),
            "fitBounds",
        );
    }

    fn invalidate_size(&mut self) {
        report(self.renderer.invalidate_size(), "invalidateSize");
    }
}

/* --------------------------------------------------------------------------
   RegionMap
-------------------------------------------------------------------------- */

/// One interactive boundary layer.
///
/// Listeners run after the layer has been released, so an `onSelect`
/// handler may call back into the map (for example `beginLoad` to drill
/// down). Renderer methods must not call back into the map.
#[wasm_bindgen]
pub struct RegionMap {
    layer: RefCell<BoundaryLayer<JsSurface>>,
    selections: Subscription<SelectionEvent>,
    readiness: Subscription<DatasetReady>,
    on_select: RefCell<Option<js_sys::Function>>,
    on_ready: RefCell<Option<js_sys::Function>>,
}

#[wasm_bindgen]
impl RegionMap {
    /// `config` is optional: `{ minLabelSeparation, fitPadding, resizeDebounceMs }`.
    #[wasm_bindgen(constructor)]
    pub fn new(renderer: Renderer, config: JsValue) -> Result<RegionMap, JsValue> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let layer = BoundaryLayer::new(JsSurface { renderer, next: 0 }, config);
        let selections = layer.bridge().subscribe_selection();
        let readiness = layer.bridge().subscribe_ready();
        Ok(RegionMap {
            layer: RefCell::new(layer),
            selections,
            readiness,
            on_select: RefCell::new(None),
            on_ready: RefCell::new(None),
        })
    }

    /// Called with `{ properties, isBoundaryLevel }` once per click.
    #[wasm_bindgen(js_name = onSelect)]
    pub fn on_select(&self, callback: js_sys::Function) {
        self.on_select.replace(Some(callback));
    }

    /// Called with `{ dataset }` once per completed load.
    #[wasm_bindgen(js_name = onReady)]
    pub fn on_ready(&self, callback: js_sys::Function) {
        self.on_ready.replace(Some(callback));
    }

    /// Tears the current dataset down and returns the token of the new load.
    #[wasm_bindgen(js_name = beginLoad)]
    pub fn begin_load(&self, dataset: String, label_field: String, boundary_level: bool) -> f64 {
        let spec = DatasetSpec::new(dataset, label_field).boundary(boundary_level);
        self.layer.borrow_mut().begin_load(spec).raw() as f64
    }

    /// Whether `token` still belongs to the load in progress.
    #[wasm_bindgen(js_name = isCurrent)]
    pub fn is_current(&self, token: f64) -> bool {
        self.layer.borrow().is_current(token_from_js(token))
    }

    /// Applies a fetched GeoJSON text. Returns the load summary, or `null`
    /// when the token is stale or the payload could not be used (see `state`).
    #[wasm_bindgen(js_name = completeLoad)]
    pub fn complete_load(&self, token: f64, payload: &str) -> JsValue {
        let outcome = self
            .layer
            .borrow_mut()
            .complete_load(token_from_js(token), Ok(payload.as_bytes().to_vec()));
        let result = match outcome {
            Ok(LoadOutcome::Ready(summary)) => to_js(&summary),
            Ok(LoadOutcome::Stale) => JsValue::NULL,
            Err(e) => {
                web_sys::console::warn_1(&format!("regionmap: {e}").into());
                JsValue::NULL
            }
        };
        self.flush();
        result
    }

    /// Reports a failed fetch. The map stays empty until the next load.
    #[wasm_bindgen(js_name = failLoad)]
    pub fn fail_load(&self, token: f64, message: String) {
        let failure = Err(MapError::Transport(message));
        let outcome = self.layer.borrow_mut().complete_load(token_from_js(token), failure);
        if let Err(e) = outcome {
            web_sys::console::warn_1(&format!("regionmap: {e}").into());
        }
    }

    /// Routes pointer input reported by the renderer, e.g.
    /// `{ target: { kind: "label", region: 3 }, kind: "enter" }`.
    /// Returns the selection event for clicks, `null` otherwise.
    pub fn pointer(&self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: PointerEvent = serde_wasm_bindgen::from_value(event)?;
        Ok(self.dispatch(event))
    }

    #[wasm_bindgen(js_name = clickPolygon)]
    pub fn click_polygon(&self, region: u32) -> JsValue {
        self.dispatch(PointerEvent::click(HitTarget::Polygon(RegionId(region as usize))))
    }

    #[wasm_bindgen(js_name = clickLabel)]
    pub fn click_label(&self, region: u32) -> JsValue {
        self.dispatch(PointerEvent::click(HitTarget::Label(RegionId(region as usize))))
    }

    /// Clicks the region registered under `name`.
    pub fn click(&self, name: &str) -> JsValue {
        let selected = self.layer.borrow_mut().click(name);
        self.flush();
        selected.map_or(JsValue::NULL, |e| to_js(&e))
    }

    #[wasm_bindgen(js_name = hoverEnter)]
    pub fn hover_enter(&self, name: &str) {
        self.layer.borrow_mut().hover_enter(name);
    }

    #[wasm_bindgen(js_name = hoverExit)]
    pub fn hover_exit(&self, name: &str) {
        self.layer.borrow_mut().hover_exit(name);
    }

    /// Records a window resize (`performance.now()` or similar).
    #[wasm_bindgen(js_name = notifyResize)]
    pub fn notify_resize(&self, now_ms: f64) {
        self.layer.borrow_mut().notify_resize(now_ms.max(0.0) as u64);
    }

    /// Relayouts once the resize burst has settled; call from a timer.
    #[wasm_bindgen(js_name = pollResize)]
    pub fn poll_resize(&self, now_ms: f64) -> bool {
        self.layer.borrow_mut().poll_resize(now_ms.max(0.0) as u64)
    }

    /// `"idle"`, `"fetching"`, `"ready"`, `"error"`, ...
    pub fn state(&self) -> String {
        self.layer.borrow().state().to_string()
    }

    #[wasm_bindgen(js_name = selectedName)]
    pub fn selected_name(&self) -> Option<String> {
        self.layer.borrow().selected_name().map(str::to_owned)
    }

    /// Registered region names, sorted.
    #[wasm_bindgen(js_name = regionNames)]
    pub fn region_names(&self) -> JsValue {
        to_js(&self.layer.borrow().registry().names())
    }

    /// Removes every visual and stops reacting to input and resizes.
    pub fn discard(&self) {
        self.layer.borrow_mut().discard();
        self.on_select.replace(None);
        self.on_ready.replace(None);
    }
}

impl RegionMap {
    fn dispatch(&self, event: PointerEvent) -> JsValue {
        let selected = self.layer.borrow_mut().dispatch(event);
        self.flush();
        selected.map_or(JsValue::NULL, |e| to_js(&e))
    }

    /// Hands queued events to the page listeners. No borrow of the layer is
    /// held while a listener runs.
    fn flush(&self) {
        let selections = self.selections.drain();
        let readiness = self.readiness.drain();

        let on_select = self.on_select.borrow().clone();
        if let Some(callback) = on_select {
            for event in &selections {
                report(callback.call1(&JsValue::NULL, &to_js(event)).map(drop), "onSelect");
            }
        }
        let on_ready = self.on_ready.borrow().clone();
        if let Some(callback) = on_ready {
            for event in &readiness {
                report(callback.call1(&JsValue::NULL, &to_js(event)).map(drop), "onReady");
            }
        }
    }
}

/* --------------------------------------------------------------------------
   Catalog
-------------------------------------------------------------------------- */

/// Layer catalog with drill-down routing.
#[wasm_bindgen]
pub struct RegionCatalog {
    inner: LayerCatalog,
}

#[wasm_bindgen]
impl RegionCatalog {
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str) -> Result<RegionCatalog, JsError> {
        let inner = LayerCatalog::from_json_str(json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(RegionCatalog { inner })
    }

    pub fn layers(&self) -> JsValue {
        to_js(&self.inner.layers)
    }

    /// The layer to show first.
    pub fn initial(&self) -> JsValue {
        self.inner.initial().map_or(JsValue::NULL, |l| to_js(l))
    }

    /// The drill-down layer for a selection event, or `null`.
    #[wasm_bindgen(js_name = drillTarget)]
    pub fn drill_target(&self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: SelectionEvent = serde_wasm_bindgen::from_value(event)?;
        Ok(self
            .inner
            .drill_target(&event)
            .map_or(JsValue::NULL, |l| to_js(l)))
    }

    /// Layer label without the catalog prefix, for the layer `value`.
    #[wasm_bindgen(js_name = districtName)]
    pub fn district_name(&self, value: &str) -> Option<String> {
        let layer = self.inner.find(value)?;
        Some(self.inner.district_name(layer).to_string())
    }
}

/* --------------------------------------------------------------------------
   Geometry
-------------------------------------------------------------------------- */

/// Label anchor `{ lat, lng }` of a GeoJSON feature, or `null`.
#[wasm_bindgen(js_name = representativePoint)]
pub fn representative_point_js(feature: JsValue) -> Result<JsValue, JsValue> {
    let raw: serde_json::Value = serde_wasm_bindgen::from_value(feature)?;
    let point = Feature::from_json_value(raw)
        .ok()
        .and_then(|f| representative_point(&f));
    Ok(point.map_or(JsValue::NULL, |p| to_js(&p)))
}
