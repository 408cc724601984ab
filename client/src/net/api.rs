//! Browser data gateway over `gloo-net`.
//!
//! Client-side (csr): real HTTP calls. Native builds get stubs that fail with
//! a network error, since the endpoints only exist behind the page's origin.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is returned as a `GatewayError` for the engine to classify;
//! nothing here panics or retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use givemap::error::GatewayError;
use givemap::gateway::Gateway;
#[cfg(feature = "csr")]
use givemap::gateway::wire;
use givemap::model::{Point, PointDetail, PointSummary};

/// File handle accepted by [`BrowserGateway::upload_image`].
#[cfg(feature = "csr")]
pub type ImageFile = web_sys::File;
#[cfg(not(feature = "csr"))]
pub type ImageFile = givemap::gateway::ImageUpload;

#[cfg(any(test, feature = "csr"))]
const NOT_FOUND: u16 = 404;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserGateway {
    base_url: String,
}

impl BrowserGateway {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(any(test, feature = "csr"))]
fn status_failed_message(status: u16) -> String {
    format!("unexpected status {status}")
}

/// Map a response status to the gateway's error taxonomy. `id` is the detail
/// id for detail requests, where 404 means the record does not exist.
#[cfg(any(test, feature = "csr"))]
fn check_status(status: u16, id: Option<&str>) -> Result<(), GatewayError> {
    match (status, id) {
        (200..=299, _) => Ok(()),
        (NOT_FOUND, Some(id)) => Err(GatewayError::NotFound { id: id.to_owned() }),
        _ => Err(GatewayError::Network(status_failed_message(status))),
    }
}

#[cfg(any(test, feature = "csr"))]
fn search_params<'a>(query: &'a str, category: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
    let mut params = vec![("q", query)];
    if let Some(tag) = category {
        params.push(("category", tag));
    }
    params
}

#[cfg(feature = "csr")]
fn network(err: impl std::fmt::Display) -> GatewayError {
    GatewayError::Network(err.to_string())
}

#[cfg(feature = "csr")]
fn js_failure(err: wasm_bindgen::JsValue) -> GatewayError {
    GatewayError::Network(format!("{err:?}"))
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> GatewayError {
    GatewayError::Network("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
async fn fetch_text(request: gloo_net::http::RequestBuilder) -> Result<(u16, String), GatewayError> {
    let resp = request.send().await.map_err(network)?;
    let status = resp.status();
    let body = resp.text().await.map_err(network)?;
    Ok((status, body))
}

impl Gateway for BrowserGateway {
    type ImageFile = ImageFile;

    fn list_points(&self) -> impl Future<Output = Result<Vec<Point>, GatewayError>> {
        let url = self.endpoint("/points");
        async move {
            #[cfg(feature = "csr")]
            {
                let (status, body) = fetch_text(gloo_net::http::Request::get(&url)).await?;
                check_status(status, None)?;
                wire::decode_point_list(&body)
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = url;
                Err(unavailable())
            }
        }
    }

    fn point_detail(&self, id: &str) -> impl Future<Output = Result<PointDetail, GatewayError>> {
        let url = self.endpoint("/points");
        let id = id.to_owned();
        async move {
            #[cfg(feature = "csr")]
            {
                let request = gloo_net::http::Request::get(&url).query([("detail", id.as_str())]);
                let (status, body) = fetch_text(request).await?;
                check_status(status, Some(&id))?;
                wire::decode_point_detail(&id, &body)
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = (url, id);
                Err(unavailable())
            }
        }
    }

    fn search_points(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> impl Future<Output = Result<Vec<PointSummary>, GatewayError>> {
        let url = self.endpoint("/points");
        let query = query.to_owned();
        let category = category.map(str::to_owned);
        async move {
            #[cfg(feature = "csr")]
            {
                let request = gloo_net::http::Request::get(&url).query(search_params(&query, category.as_deref()));
                let (status, body) = fetch_text(request).await?;
                check_status(status, None)?;
                wire::decode_search_results(&body)
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = (url, query, category);
                Err(unavailable())
            }
        }
    }

    fn upload_image(&self, file: ImageFile, point_id: &str) -> impl Future<Output = Result<String, GatewayError>> {
        let url = self.endpoint("/upload");
        let point_id = point_id.to_owned();
        async move {
            #[cfg(feature = "csr")]
            {
                let form = web_sys::FormData::new().map_err(js_failure)?;
                form.append_with_blob_and_filename("image", &file, &file.name())
                    .map_err(js_failure)?;
                form.append_with_str("locationId", &point_id).map_err(js_failure)?;
                let request = gloo_net::http::Request::post(&url).body(form).map_err(network)?;
                let resp = request.send().await.map_err(network)?;
                let status = resp.status();
                let body = resp.text().await.map_err(network)?;
                check_status(status, None)?;
                wire::decode_upload_token(&body)
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = (url, file, point_id);
                Err(unavailable())
            }
        }
    }
}
