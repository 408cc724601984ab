//! Pure view derivation.
//!
//! ARCHITECTURE
//! ============
//! `derive` maps `{point list, route, search session, detail}` to
//! `{visible points, selection, viewport target}`. It has no state of its
//! own, so feeding the same inputs twice yields identical outputs. The engine
//! calls it after every input change; tests call it directly.

use crate::detail::DetailSlot;
use crate::model::{Point, PointDetail, PointSummary};
use crate::route::Route;
use crate::search::SearchSession;
use crate::viewport::{ViewportConfig, ViewportTarget};

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

/// The inputs the view is derived from.
#[derive(Clone, Copy, Debug)]
pub struct ViewInputs<'a> {
    pub points: &'a [Point],
    pub route: &'a Route,
    pub search: &'a SearchSession,
    pub detail: Option<&'a DetailSlot>,
}

/// What the route's selected id currently resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    None,
    /// The id is not in the list and its detail has not arrived yet.
    Pending { id: String },
    Resolved(Point),
}

impl Selection {
    #[must_use]
    pub fn point(&self) -> Option<&Point> {
        match self {
            Self::Resolved(point) => Some(point),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Derived view state.
#[derive(Clone, Debug, PartialEq)]
pub struct Derived {
    pub visible_points: Vec<Point>,
    pub selection: Selection,
    /// `None` means "retain the current viewport".
    pub viewport: Option<ViewportTarget>,
    pub search_results: Vec<PointSummary>,
}

/// Points shown for `route`: the category's members, otherwise everything.
#[must_use]
pub fn visible_points(points: &[Point], route: &Route) -> Vec<Point> {
    match route.category() {
        Some(tag) => points.iter().filter(|p| p.has_category(tag)).cloned().collect(),
        None => points.to_vec(),
    }
}

/// Resolve the route's selected id against the list, then the detail record.
#[must_use]
pub fn selection(points: &[Point], route: &Route, detail: Option<&PointDetail>) -> Selection {
    let Some(id) = route.place_id() else {
        return Selection::None;
    };
    if let Some(point) = points.iter().find(|p| p.id == id) {
        return Selection::Resolved(point.clone());
    }
    match detail {
        Some(detail) if detail.id == id => Selection::Resolved(detail.as_point()),
        _ => Selection::Pending { id: id.to_owned() },
    }
}

/// Viewport command for the derived state.
///
/// A selected point is centered; a pending selection keeps the viewport;
/// otherwise the visible points are fitted.
#[must_use]
pub fn viewport_target(
    selection: &Selection,
    visible: &[Point],
    config: &ViewportConfig,
) -> Option<ViewportTarget> {
    match selection {
        Selection::Resolved(point) => match point.position() {
            Some(at) => Some(config.focus(at)),
            None => config.fit(visible),
        },
        Selection::Pending { .. } => None,
        Selection::None => config.fit(visible),
    }
}

#[must_use]
pub fn derive(inputs: &ViewInputs<'_>, config: &ViewportConfig) -> Derived {
    let visible_points = visible_points(inputs.points, inputs.route);
    let detail = inputs.detail.and_then(DetailSlot::detail);
    let selection = selection(inputs.points, inputs.route, detail);
    let viewport = viewport_target(&selection, &visible_points, config);
    Derived {
        visible_points,
        selection,
        viewport,
        search_results: inputs.search.results().to_vec(),
    }
}
