//! In-memory gateway over built-in records.
//!
//! Serves the demo data set and backs engine tests. Search matches name,
//! address and description case-insensitively, optionally within one category.

use std::future::{Future, ready};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Gateway, ImageUpload, matches_query};
use crate::error::GatewayError;
use crate::model::{LatLng, Point, PointDetail, PointSummary};

#[cfg(test)]
#[path = "fixture_test.rs"]
mod fixture_test;

#[derive(Debug, Default)]
pub struct FixtureGateway {
    records: Vec<PointDetail>,
    uploads: AtomicU64,
}

impl FixtureGateway {
    #[must_use]
    pub fn new(records: Vec<PointDetail>) -> Self {
        Self { records, uploads: AtomicU64::new(0) }
    }

    /// Three giveboxes around Münster's city center.
    #[must_use]
    pub fn muenster() -> Self {
        Self::new(vec![
            givebox(
                "givebox-1",
                "Givebox Aasee",
                "Aaseepark 5, 48151 Münster",
                "Bücher, Klamotten, Spielzeug und Haushaltswaren in gutem Zustand.",
                LatLng::new(51.9507, 7.6166),
                &["books", "clothes", "toys", "household_goods"],
            ),
            givebox(
                "givebox-2",
                "Givebox Kreuzviertel",
                "Nordstraße 12, 48149 Münster",
                "Viel Lesestoff, ein paar Spiele und saisonale Dekoration.",
                LatLng::new(51.9702, 7.6208),
                &["books", "games", "decorations"],
            ),
            givebox(
                "givebox-3",
                "Givebox Hansaviertel",
                "Hafenstraße 64, 48155 Münster",
                "Elektrogeräte, Werkzeuge und Küchenutensilien für den Haushalt.",
                LatLng::new(51.9588, 7.6392),
                &["electronics", "tools", "kitchen_items"],
            ),
        ])
    }

    /// Number of uploads accepted so far.
    #[must_use]
    pub fn upload_count(&self) -> u64 {
        self.uploads.load(Ordering::Relaxed)
    }

    fn find(&self, id: &str) -> Result<PointDetail, GatewayError> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound { id: id.to_owned() })
    }
}

fn givebox(
    id: &str,
    name: &str,
    address: &str,
    description: &str,
    coordinates: LatLng,
    categories: &[&str],
) -> PointDetail {
    let images: Vec<String> = ["a", "b", "c", "d"]
        .iter()
        .map(|suffix| format!("https://picsum.photos/seed/{id}-{suffix}/500/500"))
        .collect();
    PointDetail {
        id: id.to_owned(),
        display_name: name.to_owned(),
        address: address.to_owned(),
        description: description.to_owned(),
        coordinates: Some(coordinates),
        categories: categories.iter().map(|&tag| tag.to_owned()).collect(),
        kind: Some("Givebox".to_owned()),
        opening_hours: None,
        preview_image: images.first().cloned(),
        images: Some(images.into_iter().skip(1).collect()),
        contents: None,
    }
}

impl Gateway for FixtureGateway {
    type ImageFile = ImageUpload;

    fn list_points(&self) -> impl Future<Output = Result<Vec<Point>, GatewayError>> {
        ready(Ok(self.records.iter().map(PointDetail::as_point).collect()))
    }

    fn point_detail(&self, id: &str) -> impl Future<Output = Result<PointDetail, GatewayError>> {
        ready(self.find(id))
    }

    fn search_points(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> impl Future<Output = Result<Vec<PointSummary>, GatewayError>> {
        let hits = self
            .records
            .iter()
            .filter(|record| category.is_none_or(|tag| record.categories.iter().any(|c| c == tag)))
            .map(PointSummary::from)
            .filter(|summary| matches_query(summary, query))
            .collect();
        ready(Ok(hits))
    }

    fn upload_image(&self, file: ImageUpload, point_id: &str) -> impl Future<Output = Result<String, GatewayError>> {
        let result = self.find(point_id).and_then(|_| {
            if file.bytes.is_empty() {
                return Err(GatewayError::Malformed(format!("empty upload {}", file.file_name)));
            }
            let n = self.uploads.fetch_add(1, Ordering::Relaxed) + 1;
            Ok(format!("upload-{n}"))
        });
        ready(result)
    }
}
