//! Core entity and domain event traits.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns when the fact was recorded.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Trait for domain objects with an identity that outlives their attributes.
///
/// Two entities are the same when their IDs match, whatever their other
/// fields hold.
pub trait Entity {
    /// Identifier type.
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Debug;

    /// Returns the entity type name, used in logs.
    fn entity_type() -> &'static str;

    /// Returns the entity's identifier.
    fn id(&self) -> &Self::Id;

    /// Returns true if both values denote the same entity.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Trait for entities that record domain events as a side effect of their
/// operations.
///
/// Events accumulate until the owner drains them with
/// [`take_events`](EventSource::take_events); recording never delivers them.
pub trait EventSource {
    /// The type of events this source records.
    type Event: DomainEvent;

    /// Returns events recorded and not yet taken.
    fn pending_events(&self) -> &[Self::Event];

    /// Removes and returns all recorded events, oldest first.
    fn take_events(&mut self) -> Vec<Self::Event>;
}
