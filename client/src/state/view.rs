//! Reactive mirror of the view engine.
//!
//! DESIGN
//! ======
//! The engine is the single source of truth. After every event the session
//! copies its snapshot here and records one-shot commands (navigate, move the
//! camera) behind sequence counters, so the effects watching them act once
//! per command instead of once per render.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::time::Duration;

use givemap::detail::DetailState;
use givemap::engine::{Effect, Request, ViewSnapshot};
use givemap::model::PointDetail;
use givemap::viewport::ViewportTarget;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapViewState {
    pub snapshot: ViewSnapshot,
    pub viewport: Option<ViewportTarget>,
    pub viewport_seq: u64,
    pub navigate_to: Option<String>,
    pub navigate_seq: u64,
}

/// Work the session runs outside the reactive state.
#[derive(Clone, Debug, PartialEq)]
pub enum HostTask {
    Fetch(Request),
    StartPolling { id: String, every: Duration },
    StopPolling,
}

impl MapViewState {
    /// Publish `snapshot` and record the effects of the event that produced it.
    pub fn apply(&mut self, snapshot: ViewSnapshot, effects: Vec<Effect>) -> Vec<HostTask> {
        self.snapshot = snapshot;
        let mut tasks = Vec::new();
        for effect in effects {
            match effect {
                Effect::Navigate(path) => {
                    self.navigate_to = Some(path);
                    self.navigate_seq = self.navigate_seq.saturating_add(1);
                }
                Effect::Viewport(target) => {
                    self.viewport = Some(target);
                    self.viewport_seq = self.viewport_seq.saturating_add(1);
                }
                Effect::Request(request) => tasks.push(HostTask::Fetch(request)),
                Effect::StartPolling { id, every } => tasks.push(HostTask::StartPolling { id, every }),
                Effect::StopPolling => tasks.push(HostTask::StopPolling),
            }
        }
        tasks
    }

    pub fn search_sheet_open(&self) -> bool {
        self.snapshot.route.shows_search_sheet()
    }

    pub fn detail_sheet_open(&self) -> bool {
        self.snapshot.route.shows_detail_sheet()
    }

    pub fn detail_state(&self) -> Option<&DetailState> {
        self.snapshot.detail.as_ref().map(|(_, state)| state)
    }

    pub fn detail(&self) -> Option<&PointDetail> {
        match self.detail_state() {
            Some(DetailState::Ready(detail)) => Some(detail),
            _ => None,
        }
    }
}
