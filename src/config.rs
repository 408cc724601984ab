//! Runtime configuration.
//!
//! Defaults match the hosted map. The backend base URL is the only value read
//! from the environment: at runtime on native hosts, at compile time in the
//! browser build.

use std::time::Duration;

use crate::category::{DESCRIPTORS, validate_descriptors};
use crate::error::ConfigError;
use crate::model::LatLng;
use crate::poll;
use crate::upload;
use crate::viewport::ViewportConfig;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";
pub const API_BASE_VAR: &str = "GIVEMAP_API_BASE";

const MAX_ZOOM: u8 = 22;

/// Camera before the first fit: Münster's city center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialView {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for InitialView {
    fn default() -> Self {
        Self { center: LatLng::new(51.9607, 7.6261), zoom: 13 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Backend base URL, without trailing slash.
    pub api_base: String,
    pub poll_interval: Duration,
    /// How long an upload confirmation stays up.
    pub upload_success_hold: Duration,
    pub viewport: ViewportConfig,
    pub initial_view: InitialView,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            poll_interval: poll::DEFAULT_INTERVAL,
            upload_success_hold: upload::SUCCESS_HOLD,
            viewport: ViewportConfig::default(),
            initial_view: InitialView::default(),
        }
    }
}

impl Config {
    /// Build config from the environment.
    ///
    /// Optional:
    /// - `GIVEMAP_API_BASE`: default `/api`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for an empty base URL, or any
    /// [`Config::validate`] failure.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base) = lookup(API_BASE_VAR) {
            let base = base.trim().trim_end_matches('/');
            if base.is_empty() {
                return Err(ConfigError::InvalidEnv { var: API_BASE_VAR, value: base.to_owned() });
            }
            base.clone_into(&mut config.api_base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the config and the category descriptor table.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        let padding = self.viewport.fit_padding;
        if !padding.is_finite() || padding < 0.0 {
            return Err(ConfigError::InvalidPadding(padding.to_string()));
        }
        if self.viewport.focus_zoom > MAX_ZOOM {
            return Err(ConfigError::InvalidZoom(self.viewport.focus_zoom));
        }
        if self.initial_view.zoom > MAX_ZOOM {
            return Err(ConfigError::InvalidZoom(self.initial_view.zoom));
        }
        validate_descriptors(&DESCRIPTORS)
    }
}
