//! View synchronizer: the event reducer at the center of the map view.
//!
//! ARCHITECTURE
//! ============
//! The host feeds [`Event`]s (route changes, user intents, resolved requests,
//! poll ticks, mount/teardown) into [`ViewEngine::handle`] and carries out the
//! returned [`Effect`]s: navigate, fetch, command the map, start or stop
//! polling. The engine never awaits anything. Each request carries a
//! generation ticket for its slot (points, detail, search); a resolution whose
//! ticket is no longer current is swallowed as superseded.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route is owned by the router. Intents that change what is shown become
//! `Effect::Navigate`; the engine only updates its route when the router
//! reports the change back as `Event::RouteChanged`.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::detail::{DetailRequest, DetailSlot, DetailState};
use crate::error::{ErrorKind, GatewayError};
use crate::gateway::Gateway;
use crate::generation::{Applied, Generations, Slot, Ticket};
use crate::model::{Point, PointDetail, PointSummary};
use crate::route::Route;
use crate::search::{SearchRequest, SearchSession, SearchStatus};
use crate::sync::{self, Derived, Selection, ViewInputs};
use crate::viewport::{ViewportConfig, ViewportTarget};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Inputs to the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The view was mounted; loads the point list.
    Mounted,
    /// The view was torn down; every pending result becomes stale.
    Unmounted,
    RouteChanged(Route),
    PointsResolved { ticket: Ticket, result: Result<Vec<Point>, GatewayError> },
    DetailResolved { ticket: Ticket, id: String, result: Result<PointDetail, GatewayError> },
    SearchResolved { ticket: Ticket, result: Result<Vec<PointSummary>, GatewayError> },
    /// The poll loop for `id` fired.
    PollTick { id: String },
    SelectPoint(String),
    ClearSelection,
    SetQuery(String),
    /// Choose a category chip, or `None` to clear the filter.
    SetCategory(Option<String>),
    FocusSearch,
    /// A search result was picked.
    ChooseResult(String),
}

/// A request for the host to await against a [`Gateway`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Points { ticket: Ticket },
    Detail(DetailRequest),
    Search(SearchRequest),
}

impl Request {
    /// Await the request against `gateway` and wrap the outcome as an [`Event`].
    pub async fn resolve<G: Gateway>(self, gateway: &G) -> Event {
        match self {
            Self::Points { ticket } => Event::PointsResolved { ticket, result: gateway.list_points().await },
            Self::Detail(DetailRequest { ticket, id }) => {
                let result = gateway.point_detail(&id).await;
                Event::DetailResolved { ticket, id, result }
            }
            Self::Search(SearchRequest { ticket, query, category }) => {
                let result = gateway.search_points(&query, category.as_deref()).await;
                Event::SearchResolved { ticket, result }
            }
        }
    }
}

/// Commands for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Push a path to the router.
    Navigate(String),
    Request(Request),
    /// Move the map camera.
    Viewport(ViewportTarget),
    /// Start refreshing `id`'s detail every `every`, replacing any running loop.
    StartPolling { id: String, every: Duration },
    StopPolling,
}

/// Loading state of the point list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(ErrorKind),
}

/// Everything the presentation shell renders.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSnapshot {
    pub route: Route,
    pub visible_points: Vec<Point>,
    pub selection: Selection,
    /// Detail panel state for the selected id.
    pub detail: Option<(String, DetailState)>,
    pub query: String,
    pub search_results: Vec<PointSummary>,
    pub search_error: Option<ErrorKind>,
    pub is_loading_points: bool,
    pub points_error: Option<ErrorKind>,
    pub is_searching: bool,
    pub active_category: Option<String>,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            route: Route::Home,
            visible_points: Vec::new(),
            selection: Selection::None,
            detail: None,
            query: String::new(),
            search_results: Vec::new(),
            search_error: None,
            is_loading_points: false,
            points_error: None,
            is_searching: false,
            active_category: None,
        }
    }
}

pub struct ViewEngine {
    viewport: ViewportConfig,
    poll_interval: Duration,
    /// Replaced wholesale on every successful list fetch.
    points: Arc<[Point]>,
    points_status: LoadStatus,
    route: Route,
    search: SearchSession,
    detail: Option<DetailSlot>,
    generations: Generations,
    mounted: bool,
}

impl Default for ViewEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl ViewEngine {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            viewport: config.viewport,
            poll_interval: config.poll_interval,
            points: Arc::from(Vec::new()),
            points_status: LoadStatus::Idle,
            route: Route::Home,
            search: SearchSession::default(),
            detail: None,
            generations: Generations::new(),
            mounted: false,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn points_status(&self) -> LoadStatus {
        self.points_status
    }

    #[must_use]
    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    #[must_use]
    pub fn detail(&self) -> Option<&DetailSlot> {
        self.detail.as_ref()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Derive the current view. Pure in the engine's inputs.
    #[must_use]
    pub fn derived(&self) -> Derived {
        let inputs = ViewInputs {
            points: &self.points,
            route: &self.route,
            search: &self.search,
            detail: self.detail.as_ref(),
        };
        sync::derive(&inputs, &self.viewport)
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        let Derived { visible_points, selection, search_results, .. } = self.derived();
        ViewSnapshot {
            route: self.route.clone(),
            visible_points,
            selection,
            detail: self
                .detail
                .as_ref()
                .map(|slot| (slot.id().to_owned(), slot.state().clone())),
            query: self.search.query().to_owned(),
            search_results,
            search_error: self.search.error(),
            is_loading_points: self.points_status == LoadStatus::Loading,
            points_error: match self.points_status {
                LoadStatus::Failed(kind) => Some(kind),
                _ => None,
            },
            is_searching: self.search.status() == SearchStatus::Loading,
            active_category: self.route.category().map(str::to_owned),
        }
    }

    // --- Events ---

    /// Apply one event and return the effects the host must carry out.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if !self.mounted && !matches!(event, Event::Mounted) {
            tracing::debug!(?event, "event ignored while unmounted");
            return Vec::new();
        }
        match event {
            Event::Mounted => self.mount(),
            Event::Unmounted => self.unmount(),
            Event::RouteChanged(route) => self.change_route(route),
            Event::PointsResolved { ticket, result } => self.resolve_points(ticket, result),
            Event::DetailResolved { ticket, id, result } => self.resolve_detail(ticket, &id, result),
            Event::SearchResolved { ticket, result } => {
                if self.search.resolve(ticket, result, &self.generations) == Applied::Superseded {
                    tracing::debug!(generation = ticket.generation(), "search result superseded");
                }
                Vec::new()
            }
            Event::PollTick { id } => self.poll(&id),
            Event::SelectPoint(id) => vec![navigate(&Route::Place(id))],
            Event::ClearSelection | Event::SetCategory(None) => vec![navigate(&Route::Home)],
            Event::SetCategory(Some(tag)) => {
                if self.route.category() == Some(tag.as_str()) {
                    vec![navigate(&Route::Home)]
                } else {
                    vec![navigate(&Route::Category(tag))]
                }
            }
            Event::FocusSearch => vec![navigate(&Route::Search)],
            Event::SetQuery(query) => {
                let step = self.search.set_query(query, &mut self.generations);
                let mut effects = Vec::new();
                if step.entered {
                    effects.push(navigate(&Route::Search));
                }
                effects.extend(step.request.map(|r| Effect::Request(Request::Search(r))));
                effects
            }
            Event::ChooseResult(id) => self.choose_result(id),
        }
    }

    fn mount(&mut self) -> Vec<Effect> {
        self.mounted = true;
        self.points = Arc::from(Vec::new());
        self.points_status = LoadStatus::Loading;
        let ticket = self.generations.issue(Slot::Points);
        tracing::debug!(generation = ticket.generation(), "loading points");
        vec![Effect::Request(Request::Points { ticket })]
    }

    fn unmount(&mut self) -> Vec<Effect> {
        self.mounted = false;
        self.generations.invalidate_all();
        self.search.cancel(&mut self.generations);
        if self.points_status == LoadStatus::Loading {
            self.points_status = LoadStatus::Idle;
        }
        self.route = Route::Home;
        match self.detail.take() {
            Some(_) => vec![Effect::StopPolling],
            None => Vec::new(),
        }
    }

    fn change_route(&mut self, route: Route) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.route = route;

        let scope = match &self.route {
            Route::Category(tag) => Some(Some(tag.clone())),
            Route::Home | Route::Search => Some(None),
            Route::Place(_) => None,
        };
        if let Some(scope) = scope {
            if let Some(request) = self.search.set_scope(scope, &mut self.generations) {
                effects.push(Effect::Request(Request::Search(request)));
            }
        }

        let next_place = self.route.place_id().map(str::to_owned);
        let current_place = self.detail.as_ref().map(|slot| slot.id().to_owned());
        if next_place != current_place {
            if self.detail.take().is_some() {
                self.generations.invalidate(Slot::Detail);
                effects.push(Effect::StopPolling);
            }
            if let Some(id) = next_place {
                let (slot, request) = DetailSlot::open(id.clone(), &mut self.generations);
                self.detail = Some(slot);
                effects.push(Effect::Request(Request::Detail(request)));
                effects.push(Effect::StartPolling { id, every: self.poll_interval });
            }
        }

        effects.extend(self.derived().viewport.map(Effect::Viewport));
        effects
    }

    fn resolve_points(&mut self, ticket: Ticket, result: Result<Vec<Point>, GatewayError>) -> Vec<Effect> {
        if !self.generations.is_current(ticket) {
            tracing::debug!(generation = ticket.generation(), "point list superseded");
            return Vec::new();
        }
        match result {
            Ok(points) => {
                tracing::debug!(count = points.len(), "points loaded");
                self.points = Arc::from(points);
                self.points_status = LoadStatus::Loaded;
                self.derived().viewport.map(Effect::Viewport).into_iter().collect()
            }
            Err(err) => {
                tracing::warn!(error = %err, "point list fetch failed");
                self.points_status = LoadStatus::Failed(err.kind());
                Vec::new()
            }
        }
    }

    fn resolve_detail(&mut self, ticket: Ticket, id: &str, result: Result<PointDetail, GatewayError>) -> Vec<Effect> {
        let was_pending = self.derived().selection.is_pending();
        let applied = match self.detail.as_mut() {
            Some(slot) => slot.resolve(ticket, id, result, &self.generations),
            None => Applied::Superseded,
        };
        if applied == Applied::Superseded {
            tracing::debug!(%id, generation = ticket.generation(), "detail result superseded");
            return Vec::new();
        }
        // Only a selection that just resolved through its detail moves the camera;
        // routine refreshes leave it alone.
        let derived = self.derived();
        if was_pending && !derived.selection.is_pending() {
            return derived.viewport.map(Effect::Viewport).into_iter().collect();
        }
        Vec::new()
    }

    fn poll(&mut self, id: &str) -> Vec<Effect> {
        let Some(slot) = self.detail.as_mut().filter(|slot| slot.id() == id) else {
            tracing::debug!(%id, "poll tick for abandoned selection");
            return Vec::new();
        };
        match slot.poll(&mut self.generations) {
            Some(request) => vec![Effect::Request(Request::Detail(request))],
            None => {
                tracing::debug!(%id, "poll tick skipped, previous refresh in flight");
                Vec::new()
            }
        }
    }

    fn choose_result(&mut self, id: String) -> Vec<Effect> {
        let label = self
            .points
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.display_name.clone())
            .or_else(|| {
                self.search
                    .results()
                    .iter()
                    .find(|hit| hit.id == id)
                    .map(|hit| hit.display_name.clone())
            });
        if let Some(label) = label {
            self.search.adopt(label, &mut self.generations);
        }
        vec![navigate(&Route::Place(id))]
    }
}

fn navigate(route: &Route) -> Effect {
    Effect::Navigate(route.to_path())
}
