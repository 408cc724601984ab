#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point(id: &str, lat: f64, lng: f64) -> Point {
    Point { id: id.into(), display_name: id.into(), coordinates: Some(LatLng::new(lat, lng)), categories: Vec::new() }
}

// --- Bounds ---

#[test]
fn bounds_cover_all_points() {
    let points = [point("a", 51.95, 7.61), point("b", 51.97, 7.62), point("c", 51.96, 7.64)];
    let bounds = Bounds::from_points(&points).unwrap();
    assert_eq!(bounds.south_west, LatLng::new(51.95, 7.61));
    assert_eq!(bounds.north_east, LatLng::new(51.97, 7.64));
}

#[test]
fn bounds_skip_unrenderable_points() {
    let mut broken = point("broken", 0.0, 0.0);
    broken.coordinates = Some(LatLng::new(f64::NAN, 7.0));
    let mut missing = point("missing", 0.0, 0.0);
    missing.coordinates = None;
    let points = [point("a", 51.95, 7.61), broken, missing];
    let bounds = Bounds::from_points(&points).unwrap();
    assert_eq!(bounds.south_west, bounds.north_east);
}

#[test]
fn bounds_of_nothing_is_none() {
    assert_eq!(Bounds::from_points(&[]), None);
    let mut missing = point("missing", 0.0, 0.0);
    missing.coordinates = None;
    assert_eq!(Bounds::from_points(&[missing]), None);
}

#[test]
fn pad_grows_each_side_by_ratio_of_span() {
    let bounds = Bounds { south_west: LatLng::new(50.0, 7.0), north_east: LatLng::new(52.0, 8.0) };
    let padded = bounds.pad(0.2);
    assert!(approx_eq(padded.south_west.lat, 49.6));
    assert!(approx_eq(padded.north_east.lat, 52.4));
    assert!(approx_eq(padded.south_west.lng, 6.8));
    assert!(approx_eq(padded.north_east.lng, 8.2));
}

#[test]
fn pad_of_single_point_is_unchanged() {
    let at = LatLng::new(51.95, 7.62);
    let bounds = Bounds { south_west: at, north_east: at };
    assert_eq!(bounds.pad(0.2), bounds);
}

// --- ViewportConfig ---

#[test]
fn default_config_values() {
    let config = ViewportConfig::default();
    assert_eq!(config.focus_zoom, 14);
    assert_eq!(config.fit_padding, 0.2);
    assert_eq!(config.focus_insets.top, 100.0);
    assert_eq!(config.focus_insets.bottom, 500.0);
}

#[test]
fn focus_centers_at_fixed_zoom() {
    let config = ViewportConfig::default();
    let target = config.focus(LatLng::new(51.95, 7.62));
    assert_eq!(
        target,
        ViewportTarget::Center { center: LatLng::new(51.95, 7.62), zoom: 14, insets: config.focus_insets }
    );
    assert_eq!(target.padded_bounds(), None);
}

#[test]
fn fit_uses_configured_padding() {
    let config = ViewportConfig::default();
    let points = [point("a", 51.95, 7.61), point("b", 51.97, 7.62)];
    let Some(ViewportTarget::FitBounds { bounds, padding }) = config.fit(&points) else {
        panic!("expected fit bounds");
    };
    assert_eq!(padding, 0.2);
    assert_eq!(bounds, Bounds::from_points(&points).unwrap());
}

#[test]
fn fit_without_renderable_points_is_none() {
    assert_eq!(ViewportConfig::default().fit(&[]), None);
}

// --- MapWidget ---

#[derive(Default)]
struct RecordingWidget {
    targets: Vec<ViewportTarget>,
    markers: Vec<String>,
}

impl MapWidget for RecordingWidget {
    fn apply(&mut self, target: &ViewportTarget) {
        if self.targets.last() != Some(target) {
            self.targets.push(*target);
        }
    }

    fn set_markers(&mut self, points: &[Point]) {
        self.markers = points.iter().map(|p| p.id.clone()).collect();
    }
}

#[test]
fn widget_receives_commands_through_trait() {
    let mut widget = RecordingWidget::default();
    let config = ViewportConfig::default();
    let points = [point("a", 51.95, 7.61)];
    let target = config.fit(&points).unwrap();
    widget.set_markers(&points);
    widget.apply(&target);
    widget.apply(&target);
    assert_eq!(widget.targets.len(), 1);
    assert_eq!(widget.markers, vec!["a".to_owned()]);
}
