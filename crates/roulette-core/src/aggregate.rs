//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An event-sourced aggregate.
///
/// Command methods validate against the current state and queue events;
/// state only changes through [`AggregateRoot::apply`].
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent + Clone;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of events applied so far.
    fn version(&self) -> i64;

    /// Mutates state from one event. Used both for replay and for commit.
    fn apply(&mut self, event: &Self::Event);

    /// Events produced by command methods and not yet applied.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drops the queued events.
    fn clear_uncommitted_events(&mut self);

    /// Applies every queued event in order, then clears the queue.
    ///
    /// Call this once the events have been persisted so the in-memory state
    /// matches what a later replay would produce.
    fn commit(&mut self) {
        let pending = self.uncommitted_events().to_vec();
        for event in &pending {
            self.apply(event);
        }
        self.clear_uncommitted_events();
    }
}
