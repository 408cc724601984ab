//! Detail slot for the selected point.
//!
//! The slot is opened when a point is selected and dropped when the selection
//! changes or clears. While open, the detail is re-fetched periodically; a
//! tick that finds a request still in flight is skipped rather than queued.

use crate::error::{ErrorKind, GatewayError};
use crate::generation::{Applied, Generations, Slot, Ticket};
use crate::model::PointDetail;

#[cfg(test)]
#[path = "detail_test.rs"]
mod detail_test;

/// What the detail panel shows.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(PointDetail),
    /// The backend has no record for the selected id.
    Missing,
    /// The first fetch failed; the next poll may recover.
    Failed(ErrorKind),
}

/// A detail request to hand to the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRequest {
    pub ticket: Ticket,
    pub id: String,
}

#[derive(Clone, Debug)]
pub struct DetailSlot {
    id: String,
    state: DetailState,
    pending: Option<Ticket>,
}

impl DetailSlot {
    /// Open a slot for `id` and issue its first fetch.
    pub fn open(id: String, gens: &mut Generations) -> (Self, DetailRequest) {
        let ticket = gens.issue(Slot::Detail);
        let request = DetailRequest { ticket, id: id.clone() };
        (Self { id, state: DetailState::Loading, pending: Some(ticket) }, request)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    #[must_use]
    pub fn detail(&self) -> Option<&PointDetail> {
        match &self.state {
            DetailState::Ready(detail) => Some(detail),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Issue a refresh unless a request for this id is still in flight.
    pub fn poll(&mut self, gens: &mut Generations) -> Option<DetailRequest> {
        if self.is_busy() {
            return None;
        }
        let ticket = gens.issue(Slot::Detail);
        self.pending = Some(ticket);
        Some(DetailRequest { ticket, id: self.id.clone() })
    }

    /// Apply a fetch outcome. Each successful fetch replaces the record wholesale.
    ///
    /// A transient failure keeps an already shown record; the next poll retries.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        id: &str,
        result: Result<PointDetail, GatewayError>,
        gens: &Generations,
    ) -> Applied {
        if id != self.id || self.pending != Some(ticket) || !gens.is_current(ticket) {
            return Applied::Superseded;
        }
        self.pending = None;
        match result {
            Ok(detail) => self.state = DetailState::Ready(detail),
            Err(GatewayError::NotFound { .. }) => self.state = DetailState::Missing,
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "detail fetch failed");
                if !matches!(self.state, DetailState::Ready(_)) {
                    self.state = DetailState::Failed(err.kind());
                }
            }
        }
        Applied::Committed
    }
}
