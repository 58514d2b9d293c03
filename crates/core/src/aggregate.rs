//! Aggregate root contract and the pending-event buffer.

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};

/// Aggregate root marker + minimal interface.
///
/// An aggregate root is the entry point for operations on its cluster of
/// associated objects, and the unit of consistency: every behavior method
/// validates the aggregate's invariants before mutating, and records a domain
/// event describing what changed. Recorded events accumulate in an ordered
/// buffer until the application layer, after persisting the new state, drains
/// the buffer and forwards the events to its notification mechanism.
///
/// Execution is single-threaded per instance: exactly one logical caller
/// mutates a given aggregate at a time. Serializing concurrent callers that
/// load the "same" aggregate from storage is the persistence layer's job
/// (see [`ExpectedVersion`]).
pub trait AggregateRoot: Entity {
    /// Domain event type recorded by this aggregate.
    type Event: Clone + core::fmt::Debug;

    /// Events recorded since construction or the last drain/clear, in the
    /// order they were recorded. Dispatch order must equal this order.
    fn pending_events(&self) -> &[Self::Event];

    /// Read and clear the pending events in one step.
    fn drain_events(&mut self) -> Vec<Self::Event>;

    /// Discard the pending events. Called after successful dispatch when the
    /// caller has already read the buffer.
    fn clear_events(&mut self);

    /// Monotonically increasing version of the aggregate's state: +1 per
    /// successful behavior call. Integrators use it for optimistic
    /// concurrency checks; the domain layer itself never branches on it.
    fn version(&self) -> u64;
}

/// Ordered buffer of domain events an aggregate has recorded but the
/// application layer has not yet dispatched.
///
/// Append-only from the aggregate's perspective: only the owning aggregate's
/// code path calls [`record`](EventBuffer::record); external callers read and
/// drain. `drain` reads and clears atomically so there is no window between
/// reading the events and forgetting them.
#[derive(Debug, Clone)]
pub struct EventBuffer<E> {
    events: Vec<E>,
}

impl<E> Default for EventBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBuffer<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event. Aggregate-internal.
    pub fn record(&mut self, event: E) {
        self.events.push(event);
    }

    /// Read-only view of the buffered events in record order.
    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    /// Read and clear in one step.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Optimistic concurrency expectation for an aggregate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (useful for idempotent operations, migrations, etc.).
    Any,
    /// Require the aggregate to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "optimistic concurrency check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
