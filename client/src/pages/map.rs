//! The map page: one `MapSession` for the lifetime of the view.
//!
//! Route changes in the address bar become `RouteChanged` events; engine
//! navigations go back through the router, which closes the loop. Leaving the
//! page stops polling and turns every in-flight response into a no-op.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use givemap::config::Config;
use givemap::engine::{Event, ViewSnapshot};

use crate::components::details_sheet::DetailsSheet;
use crate::components::filter_chips::FilterChips;
use crate::components::map_host::MapHost;
use crate::components::search_bar::SearchBar;
use crate::components::search_sheet::SearchSheet;
use crate::state::session::MapSession;
use crate::util::path::{href_for, route_from_pathname};

/// Status line over the map while the point list is missing.
fn points_banner(snapshot: &ViewSnapshot) -> Option<&'static str> {
    if snapshot.points_error.is_some() {
        Some("Giveboxen konnten nicht geladen werden.")
    } else if snapshot.is_loading_points {
        Some("Giveboxen werden geladen...")
    } else {
        None
    }
}

#[component]
pub fn MapPage() -> impl IntoView {
    let config = expect_context::<Config>();
    let session = MapSession::new(&config);
    provide_context(session.clone());
    session.dispatch(Event::Mounted);
    let view = session.view();

    let location = use_location();
    {
        let session = session.clone();
        Effect::new(move || {
            let route = route_from_pathname(&location.pathname.get());
            session.dispatch(Event::RouteChanged(route));
        });
    }

    let navigate = use_navigate();
    let last_navigate_seq = RwSignal::new(0_u64);
    Effect::new(move || {
        let (seq, path) = view.with(|v| (v.navigate_seq, v.navigate_to.clone()));
        if seq == 0 || seq == last_navigate_seq.get_untracked() {
            return;
        }
        last_navigate_seq.set(seq);
        if let Some(path) = path {
            navigate(&href_for(&path), NavigateOptions::default());
        }
    });

    on_cleanup(move || session.teardown());

    let banner = move || view.with(|v| points_banner(&v.snapshot));
    let failed = move || view.with(|v| v.snapshot.points_error.is_some());

    view! {
        <main class="map-page">
            <MapHost/>
            <div class="overlay">
                <SearchBar/>
                <FilterChips/>
                {move || banner().map(|text| view! {
                    <div class="banner" class:banner-error=failed role="status">{text}</div>
                })}
            </div>
            <SearchSheet/>
            <DetailsSheet/>
        </main>
    }
}
