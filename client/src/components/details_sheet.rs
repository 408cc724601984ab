//! Detail sheet for the selected point, open on `/place/<id>`.
//!
//! Renders whatever detail state the engine holds for the selection. The
//! contents list starts collapsed for three or more entries and is reset only
//! when another point is shown, not on every poll refresh.

#[cfg(test)]
#[path = "details_sheet_test.rs"]
mod details_sheet_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use givemap::detail::DetailState;
use givemap::engine::Event;
use givemap::model::{ContentItem, PointDetail, wiki_url};

use crate::components::sheet::{Sheet, SheetHeader};
use crate::components::upload_button::UploadButton;
use crate::state::session::MapSession;
use crate::state::view::MapViewState;

const PLACEHOLDER_TITLE: &str = "Givebox auswählen";
const PLACEHOLDER_SUBTITLE: &str = "Bitte eine Givebox auswählen.";

/// Header title and subtitle.
fn header(detail: Option<&PointDetail>) -> (String, String) {
    match detail {
        Some(detail) => (detail.display_name.clone(), detail.address.clone()),
        None => (PLACEHOLDER_TITLE.to_owned(), PLACEHOLDER_SUBTITLE.to_owned()),
    }
}

/// Alt text for the gallery image at `index`; the preview image comes first.
fn image_alt(name: &str, index: usize, has_preview: bool) -> String {
    match (index, has_preview) {
        (0, true) => format!("{name} Vorschaubild"),
        (i, true) => format!("{name} Bild {i}"),
        (i, false) => format!("{name} Bild {}", i + 1),
    }
}

/// Shown id and whether its contents start expanded.
fn expansion_key(view: &MapViewState) -> Option<(String, bool)> {
    let (id, _) = view.snapshot.detail.as_ref()?;
    let expanded = view.detail().is_none_or(PointDetail::contents_expanded_by_default);
    Some((id.clone(), expanded))
}

#[component]
pub fn DetailsSheet() -> impl IntoView {
    let session = expect_context::<MapSession>();
    let view = session.view();
    let open = Signal::derive(move || view.with(MapViewState::detail_sheet_open));
    let title = Signal::derive(move || view.with(|v| header(v.detail()).0));
    let subtitle = Signal::derive(move || view.with(|v| header(v.detail()).1));
    let wiki = move || view.with(|v| v.snapshot.route.place_id().map(wiki_url).unwrap_or_default());

    let expanded = RwSignal::new(true);
    let key = Memo::new(move |_| view.with(expansion_key));
    Effect::new(move || {
        if let Some((_, default_expanded)) = key.get() {
            expanded.set(default_expanded);
        }
    });

    let body = move || match view.with(|v| v.detail_state().cloned()) {
        None | Some(DetailState::Loading) => {
            view! { <div class="sheet-note"><span class="spinner" aria-label="Lädt"></span></div> }.into_any()
        }
        Some(DetailState::Failed(_)) => view! { <div class="sheet-note">"Fehler"</div> }.into_any(),
        Some(DetailState::Missing) => view! { <div class="sheet-note">"Nicht gefunden"</div> }.into_any(),
        Some(DetailState::Ready(detail)) => view! { <DetailBody detail=detail expanded=expanded/> }.into_any(),
    };

    view! {
        <Sheet show=open>
            <SheetHeader title=title subtitle=subtitle on_close=move || session.dispatch(Event::ClearSelection)/>
            <div class="sheet-body">
                <UploadButton/>
                <div class="detail-links">
                    <a class="pill" href=wiki target="_blank" rel="noopener noreferrer">
                        <span class="icon icon-link" aria-hidden="true"></span>
                        "Wiki-Eintrag"
                    </a>
                </div>
                {body}
            </div>
        </Sheet>
    }
}

#[component]
fn DetailBody(detail: PointDetail, expanded: RwSignal<bool>) -> impl IntoView {
    let contents = detail.contents.clone().filter(|items| !items.is_empty());
    let hours = detail.opening_hours.as_ref().map(|hours| hours.display_text().to_owned());
    let has_preview = detail.preview_image.is_some();
    let images: Vec<(String, String)> = detail
        .gallery()
        .into_iter()
        .enumerate()
        .map(|(index, url)| (url.to_owned(), image_alt(&detail.display_name, index, has_preview)))
        .collect();

    view! {
        {contents.map(|items| view! { <ContentsList items=items expanded=expanded/> })}
        {hours.map(|text| view! {
            <section>
                <h2>"Öffnungszeiten"</h2>
                <div>{text}</div>
            </section>
        })}
        {(!images.is_empty()).then(|| view! {
            <div class="gallery">
                {images.into_iter().map(|(src, alt)| view! { <img src=src alt=alt/> }).collect_view()}
            </div>
        })}
    }
}

#[component]
fn ContentsList(items: Vec<ContentItem>, expanded: RwSignal<bool>) -> impl IntoView {
    view! {
        <section>
            <h2>"Inhalt"</h2>
            <ul class="contents" class:contents-collapsed=move || !expanded.get()>
                {items.into_iter().map(|item| view! { <li>"- "{item.description}</li> }).collect_view()}
            </ul>
            <Show when=move || !expanded.get()>
                <button type="button" class="more" on:click=move |_| expanded.set(true)>
                    "Mehr anzeigen"
                </button>
            </Show>
        </section>
    }
}
