// crates/regionmap-core/src/surface.rs

//! # Map Surface
//!
//! The drawing side of the engine. A [`MapSurface`] creates and destroys the
//! polygon and label visuals and applies styles to them; the engine decides
//! *which* style applies. Handles returned by a surface are opaque to the
//! engine and are only compared and handed back.

use crate::geometry::{Bounds, LatLng};
use crate::model::Feature;
use serde::{Deserialize, Serialize};

/// Identifies one drawn feature.
///
/// Ids are handed out in feature order and never reused by a later load of
/// the same layer, so input from a visual that has since been removed cannot
/// reach a region of the dataset now on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub usize);

/// Visual state of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    Normal,
    Hovered,
    Selected,
}

/// Path styling for a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStyle {
    pub color: &'static str,
    pub weight: u32,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
}

impl RegionStyle {
    pub const NORMAL: RegionStyle = RegionStyle {
        color: "#000",
        weight: 1,
        fill_color: "#fff",
        fill_opacity: 0.8,
    };

    pub const SELECTED: RegionStyle = RegionStyle {
        color: "#f00",
        weight: 2,
        fill_color: "#f99",
        fill_opacity: 0.7,
    };

    pub const HOVERED: RegionStyle = RegionStyle {
        color: "#f00",
        weight: 3,
        fill_color: "#f88",
        fill_opacity: 0.5,
    };

    pub fn for_state(state: VisualState) -> Self {
        match state {
            VisualState::Normal => Self::NORMAL,
            VisualState::Hovered => Self::HOVERED,
            VisualState::Selected => Self::SELECTED,
        }
    }
}

/// Text styling for a label marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub font_size_px: u32,
    pub color: &'static str,
    pub text_shadow: &'static str,
}

impl LabelStyle {
    pub const NORMAL: LabelStyle = LabelStyle {
        font_size_px: 14,
        color: "white",
        text_shadow: "0 2px 3px black",
    };

    pub const HOVERED: LabelStyle = LabelStyle {
        font_size_px: 16,
        color: "white",
        text_shadow: "0 0 6px red",
    };
}

/// Marker geometry for label icons, in pixels.
pub const LABEL_ICON_SIZE: [u32; 2] = [100, 100];
pub const LABEL_ICON_ANCHOR: [u32; 2] = [30, 40];

/// Rendering backend for one map view.
///
/// Implementations own the actual visual objects. The engine calls
/// `add_*`/`remove_*` only from its load and teardown transitions.
pub trait MapSurface {
    type Polygon: Clone + PartialEq + std::fmt::Debug;
    type Label: Clone + PartialEq + std::fmt::Debug;

    /// Draws `feature` in the normal style. Pointer input on the result must
    /// be reported back as [`HitTarget::Polygon`] with the same `region`.
    fn add_polygon(&mut self, region: RegionId, feature: &Feature) -> Self::Polygon;
    fn set_polygon_style(&mut self, polygon: &Self::Polygon, style: RegionStyle);
    fn bring_to_front(&mut self, polygon: &Self::Polygon);
    fn remove_polygon(&mut self, polygon: Self::Polygon);

    /// Places a text marker. Pointer input on it must be reported back as
    /// [`HitTarget::Label`] with the same `region`.
    fn add_label(&mut self, region: RegionId, at: LatLng, text: &str) -> Self::Label;
    fn set_label_style(&mut self, label: &Self::Label, style: LabelStyle);
    fn remove_label(&mut self, label: Self::Label);

    fn fit_bounds(&mut self, bounds: Bounds, padding: [u32; 2]);

    /// Recomputes layout after the host viewport changed size.
    fn invalidate_size(&mut self);
}

/// What the pointer interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "region", rename_all = "lowercase")]
pub enum HitTarget {
    Polygon(RegionId),
    Label(RegionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Click,
    Enter,
    Exit,
}

/// Pointer input dispatched from a visual back into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub target: HitTarget,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn click(target: HitTarget) -> Self {
        Self {
            target,
            kind: PointerKind::Click,
        }
    }

    pub fn enter(target: HitTarget) -> Self {
        Self {
            target,
            kind: PointerKind::Enter,
        }
    }

    pub fn exit(target: HitTarget) -> Self {
        Self {
            target,
            kind: PointerKind::Exit,
        }
    }
}
