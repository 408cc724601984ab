//! Data gateway: the remote source of points, details and search hits.
//!
//! SYSTEM CONTEXT
//! ==============
//! The engine never calls a gateway itself. It emits requests; the host awaits
//! them against a [`Gateway`] implementation and feeds the outcome back. The
//! browser shell implements the trait over `gloo-net`, [`http::HttpGateway`]
//! implements it natively over `reqwest`, and [`fixture::FixtureGateway`]
//! serves built-in records.
//!
//! Every call is a single request: no retry, no caching. The trait has no
//! `Send` bounds because the engine runs on a single cooperative event loop.

pub mod fixture;
#[cfg(feature = "http")]
pub mod http;
pub mod wire;

use std::future::Future;

use crate::error::GatewayError;
use crate::model::{Point, PointDetail, PointSummary};

/// An image picked for upload, as raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Backend operations consumed by the view-state engine.
pub trait Gateway {
    /// The platform's file handle for image uploads.
    type ImageFile;

    /// Fetch the full point list.
    fn list_points(&self) -> impl Future<Output = Result<Vec<Point>, GatewayError>>;

    /// Fetch one point's detail record.
    ///
    /// Fails with [`GatewayError::NotFound`] when the backend has no record.
    fn point_detail(&self, id: &str) -> impl Future<Output = Result<PointDetail, GatewayError>>;

    /// Free-text search, optionally restricted to a category tag.
    ///
    /// Stateless; callers debounce and discard stale results.
    fn search_points(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> impl Future<Output = Result<Vec<PointSummary>, GatewayError>>;

    /// Upload a photo for a point and return the backend's confirmation token.
    fn upload_image(&self, file: Self::ImageFile, point_id: &str) -> impl Future<Output = Result<String, GatewayError>>;
}

/// Case-insensitive match of `query` against a summary's name, address and description.
///
/// An empty query matches everything.
#[must_use]
pub fn matches_query(summary: &PointSummary, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&summary.display_name, &summary.address, &summary.description]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
