//! Payment lifecycle runner with observability.
//!
//! Loads a [`Config`], drives a single payment from creation to settlement
//! and publishes the recorded events, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod publisher;

use chrono::{DateTime, Utc};
use common::{EntityId, IdGenerator};
use domain::{
    Entity, EventPublisher, Money, Payment, PaymentEvent, PaymentStatus, publish_pending,
};

pub use config::{Config, LogFormat, Outcome};
pub use error::AppError;
pub use publisher::LoggingEventPublisher;

/// Summary of a finished scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub payment_id: EntityId,
    pub status: PaymentStatus,
    pub transaction_code: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub events_published: usize,
}

/// Creates a payment from `config`, assigns its transaction code, settles it
/// according to the configured outcome and publishes what it recorded.
///
/// The first rejected step ends the run with [`AppError::Domain`].
pub async fn run_scenario<G, P>(
    config: &Config,
    ids: &G,
    publisher: &P,
) -> Result<ScenarioReport, AppError>
where
    G: IdGenerator + ?Sized,
    P: EventPublisher<PaymentEvent> + ?Sized,
{
    let mut payment = Payment::create_with(
        ids,
        config.order_id.as_str(),
        Money::from_cents(config.amount_cents),
        config.method,
    )?;
    tracing::info!(
        payment_id = %payment.id(),
        order_id = %payment.order_id(),
        amount = %payment.amount(),
        method = %payment.method(),
        "payment created"
    );

    match &config.transaction_code {
        Some(code) => payment.define_transaction_code(code.as_str())?,
        None => payment.define_local_transaction_code(ids)?,
    }

    match config.outcome {
        Outcome::Confirm => payment.confirm_payment()?,
        Outcome::Refuse => payment.refuse_payment()?,
    }

    let events_published = publish_pending(&mut payment, publisher).await?;

    tracing::info!(
        payment_id = %payment.id(),
        status = %payment.status(),
        events_published,
        "payment settled"
    );

    Ok(ScenarioReport {
        payment_id: payment.id().clone(),
        status: payment.status(),
        transaction_code: payment.transaction_code().map(str::to_string),
        paid_at: payment.paid_at(),
        events_published,
    })
}
