//! Search results sheet, open on `/search` and `/category/<tag>`.

#[cfg(test)]
#[path = "search_sheet_test.rs"]
mod search_sheet_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use givemap::engine::{Event, ViewSnapshot};
use givemap::model::PointSummary;

use crate::components::sheet::{Sheet, SheetHeader};
use crate::state::session::MapSession;
use crate::state::view::MapViewState;

/// Placeholder text replacing the result list, if any.
fn status_text(snapshot: &ViewSnapshot) -> Option<&'static str> {
    if snapshot.is_searching {
        Some("Suche läuft...")
    } else if snapshot.search_error.is_some() {
        Some("Suche fehlgeschlagen.")
    } else if snapshot.search_results.is_empty() {
        Some("Keine Ergebnisse gefunden.")
    } else {
        None
    }
}

#[component]
pub fn SearchSheet() -> impl IntoView {
    let session = expect_context::<MapSession>();
    let view = session.view();
    let open = Signal::derive(move || view.with(MapViewState::search_sheet_open));
    let close_session = session.clone();

    let body = move || {
        let (status, results) = view.with(|v| (status_text(&v.snapshot), v.snapshot.search_results.clone()));
        match status {
            Some(text) => view! { <div class="sheet-note">{text}</div> }.into_any(),
            None => view! {
                <div class="search-results">
                    {results
                        .into_iter()
                        .map(|hit| view! { <SearchResult hit=hit session=session.clone()/> })
                        .collect_view()}
                </div>
            }
            .into_any(),
        }
    };

    view! {
        <Sheet show=open>
            <SheetHeader title="Suchergebnisse".to_owned() on_close=move || close_session.dispatch(Event::ClearSelection)/>
            <div class="sheet-body">{body}</div>
        </Sheet>
    }
}

#[component]
fn SearchResult(hit: PointSummary, session: MapSession) -> impl IntoView {
    let PointSummary { id, display_name, address, description, .. } = hit;
    view! {
        <button type="button" class="search-result" on:click=move |_| session.dispatch(Event::ChooseResult(id.clone()))>
            <div class="search-result-head">
                <h2>{display_name}</h2>
                <p>"· "{address}</p>
            </div>
            <div class="search-result-description">{description}</div>
        </button>
    }
}
