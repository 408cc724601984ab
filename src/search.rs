//! Search session state machine.
//!
//! ```text
//! Idle    --(query becomes non-empty)-----------------> Loading
//! Loading --(current result arrives)------------------> Done
//! Loading --(query changes / teardown)----------------> superseded, new session
//! Done|Idle --(query becomes empty)-------------------> Idle, results cleared
//! ```
//!
//! Every query change supersedes the previous session through its
//! [`Ticket`]. Only the most recent session's result is ever committed.

use crate::error::{ErrorKind, GatewayError};
use crate::generation::{Applied, Generations, Slot, Ticket};
use crate::model::PointSummary;

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Done,
}

/// A search request to hand to the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    /// Trimmed query text.
    pub query: String,
    pub category: Option<String>,
}

/// What a query change asks of the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStep {
    pub request: Option<SearchRequest>,
    /// The query went from empty to non-empty.
    pub entered: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SearchSession {
    query: String,
    results: Vec<PointSummary>,
    status: SearchStatus,
    scope: Option<String>,
    error: Option<ErrorKind>,
    ticket: Option<Ticket>,
}

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

impl SearchSession {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results of the most recent completed session.
    #[must_use]
    pub fn results(&self) -> &[PointSummary] {
        &self.results
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    /// Category the search is restricted to.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Failure of the most recent completed session.
    #[must_use]
    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    #[must_use]
    pub fn has_query(&self) -> bool {
        !is_blank(&self.query)
    }

    /// Apply a new query. An unchanged query is a no-op.
    pub fn set_query(&mut self, query: String, gens: &mut Generations) -> SearchStep {
        if query == self.query {
            return SearchStep::default();
        }
        let was_active = self.has_query();
        self.query = query;
        let request = self.restart(gens);
        SearchStep { entered: !was_active && request.is_some(), request }
    }

    /// Restrict subsequent sessions to `scope`. A change re-runs a non-empty query.
    pub fn set_scope(&mut self, scope: Option<String>, gens: &mut Generations) -> Option<SearchRequest> {
        if scope == self.scope {
            return None;
        }
        self.scope = scope;
        if self.has_query() { self.restart(gens) } else { None }
    }

    /// Show `label` in the search bar without starting a session.
    ///
    /// Used when a result is chosen: the query becomes the point's name and
    /// the results sheet is cleared.
    pub fn adopt(&mut self, label: String, gens: &mut Generations) {
        gens.invalidate(Slot::Search);
        self.query = label;
        self.results.clear();
        self.status = SearchStatus::Idle;
        self.error = None;
        self.ticket = None;
    }

    /// Commit a result if its session is still current.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<PointSummary>, GatewayError>,
        gens: &Generations,
    ) -> Applied {
        if self.ticket != Some(ticket) || !gens.is_current(ticket) {
            return Applied::Superseded;
        }
        self.ticket = None;
        self.status = SearchStatus::Done;
        match result {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(query = %self.query, error = %err, "search failed");
                self.results.clear();
                self.error = Some(err.kind());
            }
        }
        Applied::Committed
    }

    /// Drop the in-flight session, e.g. on teardown. The query is kept.
    pub fn cancel(&mut self, gens: &mut Generations) {
        gens.invalidate(Slot::Search);
        self.ticket = None;
        if self.status == SearchStatus::Loading {
            self.status = SearchStatus::Idle;
        }
    }

    fn restart(&mut self, gens: &mut Generations) -> Option<SearchRequest> {
        self.results.clear();
        self.error = None;
        if !self.has_query() {
            gens.invalidate(Slot::Search);
            self.ticket = None;
            self.status = SearchStatus::Idle;
            return None;
        }
        let ticket = gens.issue(Slot::Search);
        self.ticket = Some(ticket);
        self.status = SearchStatus::Loading;
        Some(SearchRequest { ticket, query: self.query.trim().to_owned(), category: self.scope.clone() })
    }
}
