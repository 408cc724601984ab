//! Generation tickets for asynchronous slots.
//!
//! Every request the engine issues carries a [`Ticket`] for its logical slot.
//! Issuing a new ticket or invalidating the slot bumps the slot's generation,
//! so any completion holding an older ticket is recognized as stale and
//! dropped. No network cancellation is involved.

#[cfg(test)]
#[path = "generation_test.rs"]
mod generation_test;

/// A logical slot that holds at most one live request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Points,
    Detail,
    Search,
}

/// Identifies one request within its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    slot: Slot,
    generation: u64,
}

impl Ticket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of applying a resolved request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The result was written to view state.
    Committed,
    /// The originating context changed; the result was discarded.
    Superseded,
}

/// Current generation per slot.
#[derive(Clone, Debug, Default)]
pub struct Generations {
    points: u64,
    detail: u64,
    search: u64,
}

impl Generations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request in `slot`, superseding any request in flight there.
    pub fn issue(&mut self, slot: Slot) -> Ticket {
        let counter = self.counter_mut(slot);
        *counter += 1;
        Ticket { slot, generation: *counter }
    }

    /// Supersede whatever is in flight in `slot` without starting anything.
    pub fn invalidate(&mut self, slot: Slot) {
        *self.counter_mut(slot) += 1;
    }

    pub fn invalidate_all(&mut self) {
        self.invalidate(Slot::Points);
        self.invalidate(Slot::Detail);
        self.invalidate(Slot::Search);
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.counter(ticket.slot) == ticket.generation
    }

    fn counter(&self, slot: Slot) -> u64 {
        match slot {
            Slot::Points => self.points,
            Slot::Detail => self.detail,
            Slot::Search => self.search,
        }
    }

    fn counter_mut(&mut self, slot: Slot) -> &mut u64 {
        match slot {
            Slot::Points => &mut self.points,
            Slot::Detail => &mut self.detail,
            Slot::Search => &mut self.search,
        }
    }
}
