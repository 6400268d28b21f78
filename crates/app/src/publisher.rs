//! Event publisher that writes every event to the log.

use async_trait::async_trait;
use domain::{DomainEvent, EventPublisher, PublishError};

/// Publishes events by emitting one `info` line per event with its JSON payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventPublisher;

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for LoggingEventPublisher {
    async fn publish(&self, events: Vec<E>) -> Result<(), PublishError> {
        for event in events {
            let event_type = event.event_type();
            let payload =
                serde_json::to_string(&event).map_err(|err| PublishError::Rejected {
                    event_type,
                    reason: err.to_string(),
                })?;

            metrics::counter!("payment_events_published_total", "event_type" => event_type)
                .increment(1);
            tracing::info!(
                event_type,
                occurred_at = %event.occurred_at(),
                payload = %payload,
                "domain event published"
            );
        }
        Ok(())
    }
}
