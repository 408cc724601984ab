//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::Router;

use givemap::config::{API_BASE_VAR, Config};
use givemap::error::ConfigError;

use crate::pages::map::MapPage;

/// Build-time overrides, read the way native hosts read their environment.
fn baked_env(var: &str) -> Option<String> {
    match var {
        API_BASE_VAR => option_env!("GIVEMAP_API_BASE").map(str::to_owned),
        _ => None,
    }
}

/// Resolve the config, falling back to defaults when the override is invalid.
fn resolve_config(lookup: impl Fn(&str) -> Option<String>) -> (Config, Option<ConfigError>) {
    match Config::from_lookup(lookup) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    }
}

/// Root application component.
///
/// Provides the config and hosts the map page under the router. The map page
/// reads the path itself, so there is no route table.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (config, error) = resolve_config(baked_env);
    if let Some(err) = error {
        #[cfg(feature = "csr")]
        log::error!("invalid build configuration, using defaults: {err}");
        #[cfg(not(feature = "csr"))]
        let _ = err;
    }
    provide_context(config);

    view! {
        <Title text="Givebox-Karte Münster"/>
        <Router>
            <MapPage/>
        </Router>
    }
}
