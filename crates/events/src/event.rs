use fleetrent_core::EventId;

/// A domain event: an immutable record of something significant that happened
/// inside an aggregate.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - produced only by aggregate behavior methods, never by external callers
/// - identified by a unique [`EventId`] assigned at creation
///
/// Timestamps are deliberately absent from this contract: the domain core is
/// deterministic, so business time is attached at the dispatch boundary by the
/// integrator's clock.
pub trait DomainEvent: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Unique identifier of this event occurrence.
    fn event_id(&self) -> EventId;

    /// Stable event name/type identifier (e.g. "rentals.rental.checked_in").
    fn event_type(&self) -> &'static str;
}
