//! Navigable path surface.
//!
//! The route is the single externally observable view mode. Exactly four
//! paths are recognized; anything else is treated as `/`.

use std::fmt;

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

const CATEGORY_PREFIX: &str = "/category/";
const PLACE_PREFIX: &str = "/place/";
const SEARCH_PATH: &str = "/search";

/// The mutually exclusive view modes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Home,
    Category(String),
    /// May reference an id that is not (yet) in the point list.
    Place(String),
    Search,
}

impl Route {
    /// Parse a decoded path. Query strings and fragments are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        if path == SEARCH_PATH {
            return Self::Search;
        }
        if let Some(tag) = path.strip_prefix(CATEGORY_PREFIX) {
            if !tag.is_empty() && !tag.contains('/') {
                return Self::Category(tag.to_owned());
            }
            return Self::Home;
        }
        // Ids may contain slashes; everything after the prefix is the id.
        if let Some(id) = path.strip_prefix(PLACE_PREFIX) {
            if !id.is_empty() {
                return Self::Place(id.to_owned());
            }
        }
        Self::Home
    }

    #[must_use]
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Category(tag) => format!("{CATEGORY_PREFIX}{tag}"),
            Self::Place(id) => format!("{PLACE_PREFIX}{id}"),
            Self::Search => SEARCH_PATH.to_owned(),
        }
    }

    /// Active category filter, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Category(tag) => Some(tag),
            _ => None,
        }
    }

    /// Selected point id, if any.
    #[must_use]
    pub fn place_id(&self) -> Option<&str> {
        match self {
            Self::Place(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the search results sheet is shown for this route.
    #[must_use]
    pub fn shows_search_sheet(&self) -> bool {
        matches!(self, Self::Search | Self::Category(_))
    }

    /// Whether the detail sheet is shown for this route.
    #[must_use]
    pub fn shows_detail_sheet(&self) -> bool {
        matches!(self, Self::Place(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
