//! Photo upload control of the details sheet.
//!
//! The control state lives in a local `RwSignal<UploadControl>`, separate from
//! the engine: an upload never changes selection, search or viewport. After a
//! success the confirmation stays up for `Config::upload_success_hold`.

#[cfg(test)]
#[path = "upload_button_test.rs"]
mod upload_button_test;

use leptos::prelude::*;

use givemap::config::Config;
use givemap::upload::{UploadControl, UploadState};

use crate::state::session::MapSession;

const ACCEPTED_TYPES: &str = "image/jpeg,image/png";

fn upload_label(state: &UploadState) -> &'static str {
    match state {
        UploadState::Idle | UploadState::Failed { .. } => "Aktuelles Foto hochladen",
        UploadState::Uploading => "Wird hochgeladen...",
        UploadState::Succeeded { .. } => "Danke fürs Mithelfen!",
    }
}

fn failure_note(state: &UploadState) -> Option<String> {
    match state {
        UploadState::Failed { message } => Some(format!("Hochladen fehlgeschlagen: {message}")),
        _ => None,
    }
}

#[component]
pub fn UploadButton() -> impl IntoView {
    let session = expect_context::<MapSession>();
    let config = expect_context::<Config>();
    let control = RwSignal::new(UploadControl::default());

    let on_change = {
        #[cfg(feature = "csr")]
        {
            use givemap::gateway::Gateway;

            let hold = config.upload_success_hold;
            move |ev: leptos::ev::Event| {
                use wasm_bindgen::JsCast;

                let Some(input) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                else {
                    return;
                };
                let file = input.files().and_then(|files| files.get(0));
                input.set_value("");
                let Some(file) = file else {
                    return;
                };
                let Some(point_id) =
                    session.view().with_untracked(|v| v.snapshot.route.place_id().map(str::to_owned))
                else {
                    return;
                };
                let ticket = match control.try_update(UploadControl::begin) {
                    Some(Ok(ticket)) => ticket,
                    Some(Err(err)) => {
                        log::debug!("upload refused: {err}");
                        return;
                    }
                    None => return,
                };
                let gateway = session.gateway().clone();
                leptos::task::spawn_local(async move {
                    let result = gateway.upload_image(file, &point_id).await;
                    let succeeded = result.is_ok();
                    control.try_update(|c| c.finish(ticket, result));
                    if succeeded {
                        gloo_timers::future::sleep(hold).await;
                        control.try_update(|c| c.release(ticket));
                    }
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (session, config);
            move |_ev: leptos::ev::Event| {}
        }
    };

    let label = move || control.with(|c| upload_label(c.state()));
    let note = move || control.with(|c| failure_note(c.state()));

    view! {
        <div class="upload">
            <label class="pill upload-button" class:upload-locked=move || control.with(UploadControl::is_locked)>
                <span class="icon icon-camera" aria-hidden="true"></span>
                <span>{label}</span>
                <input
                    type="file"
                    class="visually-hidden"
                    accept=ACCEPTED_TYPES
                    capture="environment"
                    prop:disabled=move || control.with(UploadControl::is_locked)
                    on:change=on_change
                />
            </label>
            {move || note().map(|text| view! { <div class="upload-note">{text}</div> })}
        </div>
    }
}
