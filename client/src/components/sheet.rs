//! Bottom sheet container that slides in when `show` is set.

use leptos::prelude::*;

#[component]
pub fn Sheet(#[prop(into)] show: Signal<bool>, children: Children) -> impl IntoView {
    view! {
        <div class="sheet-frame">
            <div class="sheet" class:sheet-open=move || show.get() aria-hidden=move || (!show.get()).to_string()>
                {children()}
            </div>
        </div>
    }
}

/// Sticky sheet header with a title, an optional subtitle and a close button.
#[component]
pub fn SheetHeader(
    #[prop(into)] title: Signal<String>,
    #[prop(into, optional)] subtitle: Option<Signal<String>>,
    on_close: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <div class="sheet-header">
            <div class="sheet-heading">
                <h1>{move || title.get()}</h1>
                {subtitle.map(|subtitle| view! { <div class="sheet-subtitle">{move || subtitle.get()}</div> })}
            </div>
            <button type="button" class="sheet-close" aria-label="Schließen" on:click=move |_| on_close()>
                "✕"
            </button>
        </div>
    }
}
