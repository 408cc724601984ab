//! Search input. Focus opens the search sheet; typing updates the query.

use leptos::prelude::*;

use givemap::engine::Event;

use crate::state::session::MapSession;

#[component]
pub fn SearchBar() -> impl IntoView {
    let session = expect_context::<MapSession>();
    let view = session.view();
    let query = move || view.with(|v| v.snapshot.query.clone());

    let focus_session = session.clone();
    let on_focus = move |_: leptos::ev::FocusEvent| focus_session.dispatch(Event::FocusSearch);
    let on_input = move |ev: leptos::ev::Event| session.dispatch(Event::SetQuery(event_target_value(&ev)));

    view! {
        <div class="search-bar">
            <span class="icon icon-search" aria-hidden="true"></span>
            <input
                type="text"
                placeholder="Etwas suchen..."
                aria-label="Suche"
                prop:value=query
                on:focus=on_focus
                on:input=on_input
            />
        </div>
    }
}
