//! Supervised periodic task bound to the selection lifetime.
//!
//! The host starts a lease when the engine emits `StartPolling` and drives
//! [`run`] with its own timer. Starting a new lease or stopping the supervisor
//! ends every older loop at its next wake-up. A tick only enqueues a refresh;
//! it never waits for the fetch, so a slow response cannot delay the schedule.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

/// Default refresh interval for the selected point's detail.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, Default)]
pub struct PollSupervisor {
    epoch: Arc<AtomicU64>,
}

/// Permission for one polling loop to keep running.
#[derive(Clone, Debug)]
pub struct PollLease {
    epoch: Arc<AtomicU64>,
    issued: u64,
    id: String,
}

impl PollSupervisor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke any running loop and lease a new one for `id`.
    pub fn start(&self, id: impl Into<String>) -> PollLease {
        let issued = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        PollLease { epoch: Arc::clone(&self.epoch), issued, id: id.into() }
    }

    /// Revoke any running loop.
    pub fn stop(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}

impl PollLease {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.epoch.load(Ordering::Acquire) == self.issued
    }
}

/// Call `tick` every `every` until the lease is revoked.
///
/// `sleep` is the host runtime's timer, e.g. `gloo_timers::future::sleep` in
/// the browser or `tokio::time::sleep` natively.
pub async fn run<S, F, T>(lease: PollLease, every: Duration, sleep: S, mut tick: T)
where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
    T: FnMut(&str),
{
    tracing::debug!(id = %lease.id, ?every, "poll loop started");
    loop {
        sleep(every).await;
        if !lease.is_live() {
            break;
        }
        tick(&lease.id);
    }
    tracing::debug!(id = %lease.id, "poll loop stopped");
}
