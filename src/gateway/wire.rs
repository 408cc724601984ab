//! Backend record adapter.
//!
//! The backend exposes spreadsheet-style German column names. This module maps
//! them onto [`Point`], [`PointDetail`] and [`PointSummary`]; nothing outside
//! this file knows the backend's field names.
//!
//! Every response is wrapped as `{ "data": ... }`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::model::{ContentItem, LatLng, OpeningHours, Point, PointDetail, PointSummary};

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

/// Backend value of the opening-hours column meaning "always open".
pub const ALWAYS_OPEN: &str = "immer";

/// Separator between label and description in a contents entry.
const CONTENTS_SEPARATOR: &str = "||";

/// Contents entries this short (in characters) or shorter are placeholders.
const MIN_CONTENTS_ENTRY_CHARS: usize = 4;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// One row of the list and search endpoints.
#[derive(Deserialize)]
struct PointRow {
    #[serde(rename = "Bezeichnung / ID")]
    id: Value,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Adresse", default)]
    address: Option<String>,
    #[serde(rename = "Beschreibung", default)]
    description: Option<String>,
    #[serde(rename = "Latitude", default)]
    latitude: Option<Value>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<Value>,
    #[serde(rename = "Kategorie", default)]
    category: Option<String>,
}

#[derive(Deserialize)]
struct DetailRecord {
    #[serde(rename = "Allgemeine Infos", default)]
    general: GeneralInfo,
    #[serde(rename = "Weitere Infos", default)]
    further: FurtherInfo,
    #[serde(rename = "Vorschaubild", default)]
    preview: Vec<String>,
    #[serde(rename = "Weitere Fotos", default)]
    photos: Option<Vec<String>>,
    #[serde(rename = "Aktuelles Sortiment", default)]
    assortment: Option<Value>,
}

#[derive(Default, Deserialize)]
struct GeneralInfo {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Adresse", default)]
    address: Option<String>,
    #[serde(rename = "Kategorie", default)]
    category: Option<String>,
}

#[derive(Default, Deserialize)]
struct FurtherInfo {
    #[serde(rename = "Beschreibung", default)]
    description: Option<String>,
    #[serde(rename = "Latitude", default)]
    latitude: Option<Value>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<Value>,
    #[serde(rename = "Typ", default)]
    kind: Option<String>,
    #[serde(rename = "Öffnungszeiten", default)]
    opening_hours: Option<String>,
}

/// Decode the list endpoint body.
///
/// # Errors
///
/// Returns [`GatewayError::Malformed`] if the body is not a `{ data: [...] }`
/// envelope of rows with ids.
pub fn decode_point_list(body: &str) -> Result<Vec<Point>, GatewayError> {
    let envelope: Envelope<Vec<PointRow>> = serde_json::from_str(body)?;
    envelope.data.into_iter().map(point_from_row).collect()
}

/// Decode the search endpoint body. Rows have the list shape.
///
/// # Errors
///
/// Returns [`GatewayError::Malformed`] for an unexpected shape.
pub fn decode_search_results(body: &str) -> Result<Vec<PointSummary>, GatewayError> {
    let envelope: Envelope<Vec<PointRow>> = serde_json::from_str(body)?;
    envelope.data.into_iter().map(summary_from_row).collect()
}

/// Decode the detail endpoint body for `id`.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] when `data` is `null` and
/// [`GatewayError::Malformed`] for any other unexpected shape.
pub fn decode_point_detail(id: &str, body: &str) -> Result<PointDetail, GatewayError> {
    let envelope: Envelope<Option<DetailRecord>> = serde_json::from_str(body)?;
    let record = envelope.data.ok_or_else(|| GatewayError::NotFound { id: id.to_owned() })?;
    Ok(detail_from_record(id, record))
}

/// Decode the upload confirmation token.
///
/// # Errors
///
/// Returns [`GatewayError::Malformed`] unless `data` is a string.
pub fn decode_upload_token(body: &str) -> Result<String, GatewayError> {
    let envelope: Envelope<String> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

fn point_from_row(row: PointRow) -> Result<Point, GatewayError> {
    let id = scalar_text(&row.id).ok_or_else(|| GatewayError::Malformed(format!("point id {}", row.id)))?;
    Ok(Point {
        display_name: row.name.unwrap_or_else(|| id.clone()),
        coordinates: coordinates(row.latitude.as_ref(), row.longitude.as_ref()),
        categories: split_categories(row.category.as_deref()),
        id,
    })
}

fn summary_from_row(row: PointRow) -> Result<PointSummary, GatewayError> {
    let address = row.address.clone().unwrap_or_default();
    let description = row.description.clone().unwrap_or_default();
    let point = point_from_row(row)?;
    Ok(PointSummary {
        id: point.id,
        display_name: point.display_name,
        address,
        description,
        coordinates: point.coordinates,
        categories: point.categories,
    })
}

fn detail_from_record(id: &str, record: DetailRecord) -> PointDetail {
    let DetailRecord { general, further, preview, photos, assortment } = record;
    PointDetail {
        id: id.to_owned(),
        display_name: general.name.unwrap_or_else(|| id.to_owned()),
        address: general.address.unwrap_or_default(),
        description: further.description.unwrap_or_default(),
        coordinates: coordinates(further.latitude.as_ref(), further.longitude.as_ref()),
        categories: split_categories(general.category.as_deref()),
        kind: further.kind,
        opening_hours: further.opening_hours.map(opening_hours),
        preview_image: preview.into_iter().next(),
        images: photos,
        contents: assortment.as_ref().map(contents),
    }
}

fn opening_hours(raw: String) -> OpeningHours {
    if raw.trim() == ALWAYS_OPEN {
        OpeningHours::Always
    } else {
        OpeningHours::Text(raw)
    }
}

/// Flatten nested arrays of `"label||description"` strings.
fn contents(value: &Value) -> Vec<ContentItem> {
    let mut entries = Vec::new();
    collect_strings(value, &mut entries);
    entries
        .into_iter()
        .filter(|entry| entry.chars().count() > MIN_CONTENTS_ENTRY_CHARS)
        .map(|entry| match entry.split_once(CONTENTS_SEPARATOR) {
            Some((label, description)) => {
                ContentItem { label: label.trim().to_owned(), description: description.trim().to_owned() }
            }
            None => ContentItem { label: entry.trim().to_owned(), description: entry.trim().to_owned() },
        })
        .collect()
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(text) => out.push(text),
        Value::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        _ => {}
    }
}

fn split_categories(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

fn coordinates(lat: Option<&Value>, lng: Option<&Value>) -> Option<LatLng> {
    let at = LatLng::new(number(lat?)?, number(lng?)?);
    at.is_finite().then_some(at)
}

/// Numbers may arrive as JSON numbers or numeric strings, with a decimal comma.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
