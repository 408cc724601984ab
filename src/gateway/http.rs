//! Native HTTP gateway over `reqwest`.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list | `GET /points` |
//! | detail | `GET /points?detail=<id>` |
//! | search | `GET /points?q=<query>[&category=<tag>]` |
//! | upload | `POST /upload`, multipart `image` + `locationId` |

use std::future::Future;
use std::time::Duration;

use super::{Gateway, ImageUpload, wire};
use crate::error::GatewayError;
use crate::model::{Point, PointDetail, PointSummary};

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const CONNECT_TIMEOUT_SECS: u64 = 5;
const NOT_FOUND: u16 = 404;

pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway for `base_url`. A trailing `/` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok((status, body))
    }

    async fn get_ok(&self, query: &[(&str, &str)]) -> Result<String, GatewayError> {
        let request = self.http.get(self.endpoint("/points")).query(query);
        let (status, body) = self.send(request).await?;
        ensure_success(status)?;
        Ok(body)
    }
}

fn ensure_success(status: u16) -> Result<(), GatewayError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(GatewayError::Network(format!("unexpected status {status}")))
    }
}

/// Query pairs for a search request.
fn search_query<'a>(query: &'a str, category: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
    let mut pairs = vec![("q", query)];
    if let Some(tag) = category {
        pairs.push(("category", tag));
    }
    pairs
}

impl Gateway for HttpGateway {
    type ImageFile = ImageUpload;

    fn list_points(&self) -> impl Future<Output = Result<Vec<Point>, GatewayError>> {
        async move {
            let body = self.get_ok(&[]).await?;
            wire::decode_point_list(&body)
        }
    }

    fn point_detail(&self, id: &str) -> impl Future<Output = Result<PointDetail, GatewayError>> {
        async move {
            let request = self.http.get(self.endpoint("/points")).query(&[("detail", id)]);
            let (status, body) = self.send(request).await?;
            if status == NOT_FOUND {
                return Err(GatewayError::NotFound { id: id.to_owned() });
            }
            ensure_success(status)?;
            wire::decode_point_detail(id, &body)
        }
    }

    fn search_points(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> impl Future<Output = Result<Vec<PointSummary>, GatewayError>> {
        async move {
            let body = self.get_ok(&search_query(query, category)).await?;
            wire::decode_search_results(&body)
        }
    }

    fn upload_image(&self, file: ImageUpload, point_id: &str) -> impl Future<Output = Result<String, GatewayError>> {
        async move {
            let ImageUpload { file_name, content_type, bytes } = file;
            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(&content_type)
                .map_err(|e| GatewayError::Malformed(e.to_string()))?;
            let form = reqwest::multipart::Form::new()
                .part("image", part)
                .text("locationId", point_id.to_owned());
            let request = self.http.post(self.endpoint("/upload")).multipart(form);
            let (status, body) = self.send(request).await?;
            ensure_success(status)?;
            wire::decode_upload_token(&body)
        }
    }
}
