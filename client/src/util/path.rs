//! Conversions between browser paths and engine routes.
//!
//! Point ids may contain spaces, umlauts, slashes, `?` or `#`. Paths handed to
//! the router are encoded segment by segment, so `/` stays a separator and
//! nothing can start a query or fragment. The location's pathname is parsed
//! as is and only the captured id or tag is decoded.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use givemap::route::Route;

/// Route for the router's current pathname.
pub fn route_from_pathname(pathname: &str) -> Route {
    parse_encoded(pathname, decode_component)
}

/// Parse while still encoded, so a decoded `?` or `#` inside an id cannot cut
/// the path, then decode the captured tag or id.
fn parse_encoded(pathname: &str, decode: impl Fn(&str) -> String) -> Route {
    match Route::parse(pathname) {
        Route::Category(tag) => Route::Category(map_segments(&tag, decode)),
        Route::Place(id) => Route::Place(map_segments(&id, decode)),
        route => route,
    }
}

/// Encoded href for an engine navigation target.
pub fn href_for(path: &str) -> String {
    map_segments(path, encode_component)
}

fn map_segments(path: &str, convert: impl Fn(&str) -> String) -> String {
    path.split('/').map(convert).collect::<Vec<_>>().join("/")
}

#[cfg(feature = "csr")]
fn decode_component(raw: &str) -> String {
    js_sys::decode_uri_component(raw).map_or_else(|_| raw.to_owned(), String::from)
}

#[cfg(feature = "csr")]
fn encode_component(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

#[cfg(not(feature = "csr"))]
fn decode_component(raw: &str) -> String {
    raw.to_owned()
}

#[cfg(not(feature = "csr"))]
fn encode_component(segment: &str) -> String {
    segment.to_owned()
}
