//! Viewport commands for the map widget.
//!
//! The map widget owns the camera. The engine only computes a
//! [`ViewportTarget`] and hands it over through [`MapWidget::apply`]; it never
//! reads camera state back.

use crate::model::{LatLng, Point};

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

/// Zoom level used when centering on a selected point.
pub const FOCUS_ZOOM: u8 = 14;
/// Fractional margin added around fitted bounds.
pub const FIT_PADDING: f64 = 0.2;
/// Screen space reserved above a focused point (search bar and chips).
pub const FOCUS_INSET_TOP: f64 = 100.0;
/// Screen space reserved below a focused point (detail sheet).
pub const FOCUS_INSET_BOTTOM: f64 = 500.0;

/// Axis-aligned geographic bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Smallest bounds containing every finite coordinate.
    ///
    /// Returns `None` when no coordinate is finite.
    pub fn from_coordinates(coordinates: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        coordinates
            .into_iter()
            .filter(LatLng::is_finite)
            .fold(None, |acc: Option<Self>, at| {
                Some(match acc {
                    None => Self { south_west: at, north_east: at },
                    Some(b) => Self {
                        south_west: LatLng::new(b.south_west.lat.min(at.lat), b.south_west.lng.min(at.lng)),
                        north_east: LatLng::new(b.north_east.lat.max(at.lat), b.north_east.lng.max(at.lng)),
                    },
                })
            })
    }

    /// Bounds over the renderable points. Unrenderable points are skipped.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        Self::from_coordinates(points.iter().filter_map(Point::position))
    }

    /// Grow each side by `ratio` of the span along that axis.
    #[must_use]
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north_east.lat - self.south_west.lat).abs() * ratio;
        let lng_buffer = (self.north_east.lng - self.south_west.lng).abs() * ratio;
        Self {
            south_west: LatLng::new(self.south_west.lat - lat_buffer, self.south_west.lng - lng_buffer),
            north_east: LatLng::new(self.north_east.lat + lat_buffer, self.north_east.lng + lng_buffer),
        }
    }
}

/// Screen-space insets in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// A commanded camera state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportTarget {
    /// Show all of `bounds`, grown by the fractional `padding`.
    FitBounds { bounds: Bounds, padding: f64 },
    /// Center on one point at a fixed zoom, keeping `insets` clear.
    Center { center: LatLng, zoom: u8, insets: EdgeInsets },
}

impl ViewportTarget {
    /// Bounds after padding, for `FitBounds` targets.
    #[must_use]
    pub fn padded_bounds(&self) -> Option<Bounds> {
        match self {
            Self::FitBounds { bounds, padding } => Some(bounds.pad(*padding)),
            Self::Center { .. } => None,
        }
    }
}

/// How viewport targets are shaped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    pub focus_zoom: u8,
    pub fit_padding: f64,
    pub focus_insets: EdgeInsets,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            focus_zoom: FOCUS_ZOOM,
            fit_padding: FIT_PADDING,
            focus_insets: EdgeInsets { top: FOCUS_INSET_TOP, right: 0.0, bottom: FOCUS_INSET_BOTTOM, left: 0.0 },
        }
    }
}

impl ViewportConfig {
    #[must_use]
    pub fn focus(&self, center: LatLng) -> ViewportTarget {
        ViewportTarget::Center { center, zoom: self.focus_zoom, insets: self.focus_insets }
    }

    /// Fit over the renderable points, or `None` when there are none.
    #[must_use]
    pub fn fit(&self, points: &[Point]) -> Option<ViewportTarget> {
        Bounds::from_points(points).map(|bounds| ViewportTarget::FitBounds { bounds, padding: self.fit_padding })
    }
}

/// The map rendering widget as seen from the engine's host.
///
/// Implementations are expected to no-op when handed a target identical to
/// the one they are currently animating towards.
pub trait MapWidget {
    fn apply(&mut self, target: &ViewportTarget);
    fn set_markers(&mut self, points: &[Point]);
}
