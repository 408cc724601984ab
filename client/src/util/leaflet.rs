//! Leaflet bridge implementing the engine's `MapWidget` seam.
//!
//! ARCHITECTURE
//! ============
//! Leaflet itself is loaded by `index.html`; `map.js` wraps the handful of
//! calls the page needs (create, fit, focus, replace markers, destroy) and is
//! bound here with `wasm-bindgen`. Markers cross the boundary as JSON. Native
//! builds compile the calls out so the bookkeeping stays testable.

#[cfg(test)]
#[path = "leaflet_test.rs"]
mod leaflet_test;

use serde::Serialize;

use givemap::config::InitialView;
use givemap::model::Point;
use givemap::viewport::{MapWidget, ViewportTarget};

#[cfg(feature = "csr")]
use wasm_bindgen::prelude::*;

/// DOM id of the map container.
pub const MAP_ELEMENT_ID: &str = "givemap-map";

#[cfg(feature = "csr")]
#[wasm_bindgen(module = "/map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(element_id: &str, lat: f64, lng: f64, zoom: u8, on_select: &Closure<dyn Fn(String)>);
    #[wasm_bindgen(js_name = fitBounds)]
    fn fit_bounds(south: f64, west: f64, north: f64, east: f64);
    #[wasm_bindgen(js_name = focusPoint)]
    fn focus_point(lat: f64, lng: f64, zoom: u8, top: f64, right: f64, bottom: f64, left: f64);
    #[wasm_bindgen(js_name = setMarkers)]
    fn set_markers_js(markers: &str);
    #[wasm_bindgen(js_name = isAnimating)]
    fn is_animating() -> bool;
    #[wasm_bindgen(js_name = destroyMap)]
    fn destroy_map();
}

#[derive(Debug, PartialEq, Serialize)]
struct Marker<'a> {
    id: &'a str,
    name: &'a str,
    lat: f64,
    lng: f64,
}

/// Marker payload for `setMarkers`. Points without usable coordinates are skipped.
fn markers_json(points: &[Point]) -> Result<String, serde_json::Error> {
    let markers: Vec<Marker<'_>> = points
        .iter()
        .filter_map(|point| {
            point.position().map(|at| Marker { id: &point.id, name: &point.display_name, lat: at.lat, lng: at.lng })
        })
        .collect();
    serde_json::to_string(&markers)
}

/// A repeated target is dropped only while the camera is still flying to it.
/// Once it settles, the user may have panned away, so the command is re-sent.
fn is_redundant(last: Option<&ViewportTarget>, target: &ViewportTarget, animating: bool) -> bool {
    animating && last == Some(target)
}

#[cfg(feature = "csr")]
fn camera_animating() -> bool {
    is_animating()
}

#[cfg(not(feature = "csr"))]
fn camera_animating() -> bool {
    false
}

pub struct LeafletMap {
    last_target: Option<ViewportTarget>,
    last_markers: Option<String>,
    #[cfg(feature = "csr")]
    _on_select: Closure<dyn Fn(String)>,
}

impl LeafletMap {
    /// Create the map inside [`MAP_ELEMENT_ID`]; `on_select` receives clicked marker ids.
    #[cfg(feature = "csr")]
    pub fn mount(initial: InitialView, on_select: impl Fn(String) + 'static) -> Self {
        let on_select = Closure::<dyn Fn(String)>::new(on_select);
        init_map(MAP_ELEMENT_ID, initial.center.lat, initial.center.lng, initial.zoom, &on_select);
        Self { last_target: None, last_markers: None, _on_select: on_select }
    }

    #[cfg(not(feature = "csr"))]
    pub fn mount(initial: InitialView, on_select: impl Fn(String) + 'static) -> Self {
        let _ = (initial, on_select);
        Self { last_target: None, last_markers: None }
    }

    pub fn last_target(&self) -> Option<&ViewportTarget> {
        self.last_target.as_ref()
    }
}

/// Remove the map from the page.
pub fn destroy() {
    #[cfg(feature = "csr")]
    destroy_map();
}

impl MapWidget for LeafletMap {
    fn apply(&mut self, target: &ViewportTarget) {
        if is_redundant(self.last_target.as_ref(), target, camera_animating()) {
            return;
        }
        self.last_target = Some(*target);
        #[cfg(feature = "csr")]
        match target {
            ViewportTarget::FitBounds { .. } => {
                if let Some(bounds) = target.padded_bounds() {
                    fit_bounds(bounds.south_west.lat, bounds.south_west.lng, bounds.north_east.lat, bounds.north_east.lng);
                }
            }
            ViewportTarget::Center { center, zoom, insets } => {
                focus_point(center.lat, center.lng, *zoom, insets.top, insets.right, insets.bottom, insets.left);
            }
        }
    }

    fn set_markers(&mut self, points: &[Point]) {
        let json = match markers_json(points) {
            Ok(json) => json,
            Err(err) => {
                #[cfg(feature = "csr")]
                log::warn!("marker payload failed: {err}");
                #[cfg(not(feature = "csr"))]
                let _ = err;
                return;
            }
        };
        if self.last_markers.as_deref() == Some(json.as_str()) {
            return;
        }
        #[cfg(feature = "csr")]
        set_markers_js(&json);
        self.last_markers = Some(json);
    }
}
