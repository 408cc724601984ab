//! Category filter chips, one per known category.

use leptos::prelude::*;

use givemap::category::{CategoryDescriptor, DESCRIPTORS};
use givemap::engine::Event;

use crate::state::session::MapSession;

#[component]
pub fn FilterChips() -> impl IntoView {
    let session = expect_context::<MapSession>();
    let view = session.view();
    let active = Memo::new(move |_| view.with(|v| v.snapshot.active_category.clone()));

    view! {
        <div class="filter-chips">
            {DESCRIPTORS
                .iter()
                .map(|descriptor| view! { <CategoryChip descriptor=descriptor active=active session=session.clone()/> })
                .collect_view()}
        </div>
    }
}

#[component]
fn CategoryChip(
    descriptor: &'static CategoryDescriptor,
    active: Memo<Option<String>>,
    session: MapSession,
) -> impl IntoView {
    let tag = descriptor.category.tag();
    let is_active = move || active.with(|current| current.as_deref() == Some(tag));
    view! {
        <button
            type="button"
            class="chip"
            class:chip-active=is_active
            aria-pressed=move || is_active().to_string()
            on:click=move |_| session.dispatch(Event::SetCategory(Some(tag.to_owned())))
        >
            <span class=format!("icon icon-{}", descriptor.icon) aria-hidden="true"></span>
            {descriptor.label}
        </button>
    }
}
