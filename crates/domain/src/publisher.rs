//! Event publisher port and in-process implementations.
//!
//! Entities only record events. Moving them to subscribers is the job of an
//! [`EventPublisher`] chosen by the caller; this crate ships a no-op sink and
//! an in-memory recorder, not a transport.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use crate::aggregate::{DomainEvent, EventSource};

/// Errors reported by an event sink.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The sink cannot accept events right now.
    #[error("Event sink unavailable: {0}")]
    Unavailable(String),

    /// The sink refused a specific event.
    #[error("Event {event_type} rejected: {reason}")]
    Rejected {
        event_type: &'static str,
        reason: String,
    },
}

/// Trait for delivering recorded domain events.
#[async_trait]
pub trait EventPublisher<E: DomainEvent>: Send + Sync {
    /// Hands a batch of events to the sink, preserving order.
    async fn publish(&self, events: Vec<E>) -> Result<(), PublishError>;
}

/// Drains the pending events of `source` into `publisher`.
///
/// Events are only removed from the source once the publisher accepted them,
/// so a failed publish can be retried. Returns the number of events published.
pub async fn publish_pending<S, P>(source: &mut S, publisher: &P) -> Result<usize, PublishError>
where
    S: EventSource,
    P: EventPublisher<S::Event> + ?Sized,
{
    let events = source.pending_events().to_vec();
    if events.is_empty() {
        return Ok(0);
    }

    let count = events.len();
    publisher.publish(events).await?;
    source.take_events();

    tracing::debug!(count, "published pending events");
    Ok(count)
}

/// Publisher that accepts and discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventPublisher;

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for NoopEventPublisher {
    async fn publish(&self, _events: Vec<E>) -> Result<(), PublishError> {
        Ok(())
    }
}

#[derive(Debug)]
struct InMemoryPublisherState<E> {
    published: Vec<E>,
    fail_on_publish: bool,
}

/// In-memory publisher that keeps everything it receives.
#[derive(Debug, Clone)]
pub struct InMemoryEventPublisher<E> {
    state: Arc<RwLock<InMemoryPublisherState<E>>>,
}

impl<E> Default for InMemoryEventPublisher<E> {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryPublisherState {
                published: Vec::new(),
                fail_on_publish: false,
            })),
        }
    }
}

impl<E: Clone> InMemoryEventPublisher<E> {
    /// Creates an empty publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the publisher to reject subsequent batches.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_on_publish = fail;
    }

    /// Returns a copy of every event received so far, in arrival order.
    pub fn published(&self) -> Vec<E> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .published
            .clone()
    }

    /// Returns the number of events received so far.
    pub fn published_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .published
            .len()
    }
}

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for InMemoryEventPublisher<E> {
    async fn publish(&self, events: Vec<E>) -> Result<(), PublishError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| PublishError::Unavailable("publisher state poisoned".to_string()))?;

        if state.fail_on_publish {
            return Err(PublishError::Unavailable("publishing disabled".to_string()));
        }

        state.published.extend(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Pinged {
        seq: u32,
        at: DateTime<Utc>,
    }

    impl DomainEvent for Pinged {
        fn event_type(&self) -> &'static str {
            "Pinged"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[derive(Default)]
    struct Pinger {
        events: Vec<Pinged>,
    }

    impl Pinger {
        fn ping(&mut self, seq: u32) {
            self.events.push(Pinged { seq, at: Utc::now() });
        }
    }

    impl EventSource for Pinger {
        type Event = Pinged;

        fn pending_events(&self) -> &[Pinged] {
            &self.events
        }

        fn take_events(&mut self) -> Vec<Pinged> {
            std::mem::take(&mut self.events)
        }
    }

    #[tokio::test]
    async fn test_publish_pending_drains_source() {
        let publisher = InMemoryEventPublisher::new();
        let mut source = Pinger::default();
        source.ping(1);
        source.ping(2);

        let count = publish_pending(&mut source, &publisher).await.unwrap();

        assert_eq!(count, 2);
        assert!(source.pending_events().is_empty());
        let seqs: Vec<u32> = publisher.published().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_publish_pending_with_nothing_recorded() {
        let publisher = InMemoryEventPublisher::<Pinged>::new();
        let mut source = Pinger::default();

        let count = publish_pending(&mut source, &publisher).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(publisher.published_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_publish_keeps_events() {
        let publisher = InMemoryEventPublisher::new();
        publisher.set_fail_on_publish(true);
        let mut source = Pinger::default();
        source.ping(1);

        let result = publish_pending(&mut source, &publisher).await;

        assert!(matches!(result, Err(PublishError::Unavailable(_))));
        assert_eq!(source.pending_events().len(), 1);

        publisher.set_fail_on_publish(false);
        publish_pending(&mut source, &publisher).await.unwrap();
        assert_eq!(publisher.published_count(), 1);
        assert!(source.pending_events().is_empty());
    }

    #[tokio::test]
    async fn test_noop_publisher_accepts_everything() {
        let mut source = Pinger::default();
        source.ping(7);

        let count = publish_pending(&mut source, &NoopEventPublisher).await.unwrap();

        assert_eq!(count, 1);
        assert!(source.pending_events().is_empty());
    }

    #[tokio::test]
    async fn test_publisher_as_trait_object() {
        let recorder = InMemoryEventPublisher::new();
        let publisher: Arc<dyn EventPublisher<Pinged>> = Arc::new(recorder.clone());
        let mut source = Pinger::default();
        source.ping(3);

        publish_pending(&mut source, publisher.as_ref()).await.unwrap();

        assert_eq!(recorder.published_count(), 1);
    }
}
