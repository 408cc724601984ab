//! Bridge between the session's view state and the imperative Leaflet map.
//!
//! ARCHITECTURE
//! ============
//! The map is created once the container is in the DOM. Marker updates follow
//! `visible_points`; camera moves follow `viewport_seq`, so each viewport
//! target the engine emits is applied exactly once.

use leptos::prelude::*;

use crate::state::session::MapSession;
use crate::util::leaflet::MAP_ELEMENT_ID;

#[cfg(feature = "csr")]
use givemap::config::Config;
#[cfg(feature = "csr")]
use givemap::engine::Event;
#[cfg(feature = "csr")]
use givemap::viewport::MapWidget;
#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use crate::util::leaflet::{self, LeafletMap};

#[component]
pub fn MapHost() -> impl IntoView {
    let session = expect_context::<MapSession>();
    let container = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "csr")]
    {
        let initial = expect_context::<Config>().initial_view;
        let view = session.view();
        let map = Rc::new(RefCell::new(None::<LeafletMap>));
        let map_ready = RwSignal::new(false);
        let last_viewport_seq = RwSignal::new(0_u64);

        {
            let map = Rc::clone(&map);
            Effect::new(move || {
                if container.get().is_none() || map.borrow().is_some() {
                    return;
                }
                let select = session.clone();
                let instance = LeafletMap::mount(initial, move |id| select.dispatch(Event::SelectPoint(id)));
                *map.borrow_mut() = Some(instance);
                map_ready.set(true);
            });
        }

        {
            let map = Rc::clone(&map);
            Effect::new(move || {
                if !map_ready.get() {
                    return;
                }
                view.with(|v| {
                    if let Some(map) = map.borrow_mut().as_mut() {
                        map.set_markers(&v.snapshot.visible_points);
                    }
                });
            });
        }

        {
            let map = Rc::clone(&map);
            Effect::new(move || {
                if !map_ready.get() {
                    return;
                }
                let (seq, target) = view.with(|v| (v.viewport_seq, v.viewport));
                if seq == 0 || seq == last_viewport_seq.get_untracked() {
                    return;
                }
                if let (Some(target), Some(map)) = (target, map.borrow_mut().as_mut()) {
                    map.apply(&target);
                }
                last_viewport_seq.set(seq);
            });
        }

        on_cleanup(leaflet::destroy);
    }
    #[cfg(not(feature = "csr"))]
    let _ = session;

    view! { <div id=MAP_ELEMENT_ID class="map" node_ref=container></div> }
}
