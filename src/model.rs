//! Point records produced by the data gateway.
//!
//! A [`Point`] is what the list endpoint returns and what the map plots. A
//! [`PointDetail`] is fetched lazily for the selected point and replaced
//! wholesale on every refresh. A [`PointSummary`] is one search hit.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

/// Base URL of the community wiki that hosts one page per givebox.
pub const WIKI_BASE_URL: &str = "https://www.muenster4you.de/wiki";

/// Detail panels start expanded when a point lists fewer items than this.
pub const COLLAPSE_CONTENTS_FROM: usize = 3;

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A map-plottable location record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: String,
    pub display_name: String,
    /// Absent when the backend row has no usable coordinates.
    pub coordinates: Option<LatLng>,
    /// Raw category tags. The set is open; unknown tags are kept verbatim.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Point {
    /// Coordinates usable for rendering and viewport fitting.
    ///
    /// Returns `None` for absent or non-finite coordinates.
    #[must_use]
    pub fn position(&self) -> Option<LatLng> {
        self.coordinates.filter(LatLng::is_finite)
    }

    #[must_use]
    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.iter().any(|c| c == tag)
    }
}

/// Opening hours of a givebox.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum OpeningHours {
    /// The backend sentinel for "open around the clock".
    Always,
    Text(String),
}

impl OpeningHours {
    /// Text shown in the detail panel.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Always => "Immer geöffnet",
            Self::Text(text) => text,
        }
    }
}

/// One entry of a givebox's current contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub label: String,
    pub description: String,
}

/// Full record of one point, fetched for the current selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDetail {
    pub id: String,
    pub display_name: String,
    pub address: String,
    pub description: String,
    pub coordinates: Option<LatLng>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Backend-specific kind, e.g. "Givebox" or "Bücherschrank".
    pub kind: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub preview_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub contents: Option<Vec<ContentItem>>,
}

impl PointDetail {
    /// Project the detail record down to a plottable point.
    #[must_use]
    pub fn as_point(&self) -> Point {
        Point {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            coordinates: self.coordinates,
            categories: self.categories.clone(),
        }
    }

    /// Preview image first, then the remaining photos in backend order.
    #[must_use]
    pub fn gallery(&self) -> Vec<&str> {
        let photos = self.images.as_deref().unwrap_or_default();
        self.preview_image
            .as_deref()
            .into_iter()
            .chain(photos.iter().map(String::as_str))
            .collect()
    }

    /// Whether the contents list starts expanded in the detail panel.
    #[must_use]
    pub fn contents_expanded_by_default(&self) -> bool {
        self.contents
            .as_ref()
            .is_none_or(|items| items.len() < COLLAPSE_CONTENTS_FROM)
    }
}

/// One search hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSummary {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    pub coordinates: Option<LatLng>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl From<&PointDetail> for PointSummary {
    fn from(detail: &PointDetail) -> Self {
        Self {
            id: detail.id.clone(),
            display_name: detail.display_name.clone(),
            address: detail.address.clone(),
            description: detail.description.clone(),
            coordinates: detail.coordinates,
            categories: detail.categories.clone(),
        }
    }
}

/// Wiki page for a point id.
#[must_use]
pub fn wiki_url(id: &str) -> String {
    format!("{WIKI_BASE_URL}/{id}")
}
