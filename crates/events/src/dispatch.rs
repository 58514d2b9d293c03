//! Dispatch boundary: forward an aggregate's buffered events after persistence.

use fleetrent_core::AggregateRoot;
use tracing::debug;

use crate::bus::EventBus;
use crate::event::DomainEvent;

/// Publish an aggregate's pending events and clear its buffer.
///
/// Call this after the aggregate's new state has been persisted. Events are
/// published in record order; the buffer is only cleared once every event has
/// been accepted by the bus, so a transport failure leaves the buffer intact
/// and the whole call can be retried (consumers must tolerate duplicates).
///
/// Returns the number of events published.
pub fn dispatch_pending<A, B>(aggregate: &mut A, bus: &B) -> Result<usize, B::Error>
where
    A: AggregateRoot,
    A::Event: DomainEvent,
    B: EventBus<A::Event>,
{
    for event in aggregate.pending_events() {
        debug!(event_type = event.event_type(), event_id = %event.event_id(), "dispatching domain event");
        bus.publish(event.clone())?;
    }

    let published = aggregate.pending_events().len();
    aggregate.clear_events();
    Ok(published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetrent_core::{Entity, EventBuffer, EventId, define_id};

    use crate::in_memory::InMemoryEventBus;

    define_id!(WidgetId);

    #[derive(Debug, Clone, PartialEq)]
    struct WidgetRenamed {
        event_id: EventId,
        name: String,
    }

    impl DomainEvent for WidgetRenamed {
        fn event_id(&self) -> EventId {
            self.event_id
        }

        fn event_type(&self) -> &'static str {
            "widgets.widget.renamed"
        }
    }

    struct Widget {
        id: WidgetId,
        name: String,
        version: u64,
        events: EventBuffer<WidgetRenamed>,
    }

    impl Widget {
        fn new(name: &str) -> Self {
            Self {
                id: WidgetId::new(),
                name: name.to_string(),
                version: 0,
                events: EventBuffer::new(),
            }
        }

        fn rename(&mut self, name: &str) {
            self.name = name.to_string();
            self.version += 1;
            self.events.record(WidgetRenamed {
                event_id: EventId::new(),
                name: self.name.clone(),
            });
        }
    }

    impl Entity for Widget {
        type Id = WidgetId;

        fn id(&self) -> Self::Id {
            self.id
        }
    }

    impl AggregateRoot for Widget {
        type Event = WidgetRenamed;

        fn pending_events(&self) -> &[Self::Event] {
            self.events.as_slice()
        }

        fn drain_events(&mut self) -> Vec<Self::Event> {
            self.events.drain()
        }

        fn clear_events(&mut self) {
            self.events.clear()
        }

        fn version(&self) -> u64 {
            self.version
        }
    }

    #[test]
    fn dispatch_preserves_record_order_and_clears_buffer() {
        let mut widget = Widget::new("one");
        widget.rename("two");
        widget.rename("three");

        let bus = InMemoryEventBus::new();
        let subscription = bus.subscribe();

        let published = dispatch_pending(&mut widget, &bus).unwrap();
        assert_eq!(published, 2);
        assert!(widget.pending_events().is_empty());

        assert_eq!(subscription.try_recv().unwrap().name, "two");
        assert_eq!(subscription.try_recv().unwrap().name, "three");
        assert!(subscription.try_recv().is_err());
    }

    #[test]
    fn dispatch_with_empty_buffer_is_a_no_op() {
        let mut widget = Widget::new("one");
        let bus = InMemoryEventBus::new();

        assert_eq!(dispatch_pending(&mut widget, &bus).unwrap(), 0);
    }
}
