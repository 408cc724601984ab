//! Runs the view engine inside the Leptos runtime.
//!
//! ARCHITECTURE
//! ============
//! `MapSession` owns the engine in a `StoredValue` and mirrors it into a
//! `RwSignal<MapViewState>`. `dispatch` runs one event through the engine,
//! publishes the result, then starts what the effects ask for: gateway
//! fetches and the detail poll loop run as local tasks that dispatch their
//! outcome back. After the page's owner is disposed, `dispatch` is a no-op, so
//! late responses and ticks fall on the floor.

use leptos::prelude::*;

use givemap::config::Config;
use givemap::engine::{Event, Request, ViewEngine};
use givemap::poll::PollSupervisor;

use crate::net::api::BrowserGateway;
use crate::state::view::{HostTask, MapViewState};

#[derive(Clone)]
pub struct MapSession {
    engine: StoredValue<ViewEngine>,
    view: RwSignal<MapViewState>,
    gateway: BrowserGateway,
    polls: PollSupervisor,
}

impl MapSession {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: StoredValue::new(ViewEngine::new(config)),
            view: RwSignal::new(MapViewState::default()),
            gateway: BrowserGateway::new(&config.api_base),
            polls: PollSupervisor::new(),
        }
    }

    pub fn view(&self) -> RwSignal<MapViewState> {
        self.view
    }

    pub fn gateway(&self) -> &BrowserGateway {
        &self.gateway
    }

    /// Run `event` through the engine and carry out its effects.
    pub fn dispatch(&self, event: Event) {
        let Some((snapshot, effects)) = self.engine.try_update_value(|engine| {
            let effects = engine.handle(event);
            (engine.snapshot(), effects)
        }) else {
            return;
        };
        let Some(tasks) = self.view.try_update(|view| view.apply(snapshot, effects)) else {
            return;
        };
        for task in tasks {
            self.run(task);
        }
    }

    /// Stop the poll loop and tell the engine the view is gone.
    pub fn teardown(&self) {
        self.polls.stop();
        self.dispatch(Event::Unmounted);
    }

    fn run(&self, task: HostTask) {
        match task {
            HostTask::Fetch(request) => self.fetch(request),
            HostTask::StartPolling { id, every } => self.start_polling(id, every),
            HostTask::StopPolling => self.polls.stop(),
        }
    }

    #[cfg(feature = "csr")]
    fn fetch(&self, request: Request) {
        let session = self.clone();
        leptos::task::spawn_local(async move {
            let event = request.resolve(&session.gateway).await;
            session.dispatch(event);
        });
    }

    #[cfg(not(feature = "csr"))]
    fn fetch(&self, request: Request) {
        let _ = request;
    }

    #[cfg(feature = "csr")]
    fn start_polling(&self, id: String, every: std::time::Duration) {
        let lease = self.polls.start(id);
        let session = self.clone();
        leptos::task::spawn_local(givemap::poll::run(lease, every, gloo_timers::future::sleep, move |id| {
            session.dispatch(Event::PollTick { id: id.to_owned() });
        }));
    }

    #[cfg(not(feature = "csr"))]
    fn start_polling(&self, id: String, every: std::time::Duration) {
        let _ = (self.polls.start(id), every);
    }
}
