//! Payment domain events.

use chrono::{DateTime, Utc};
use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::{Money, OrderId};

/// Events recorded by a payment when it settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PaymentEvent {
    /// The gateway authorized the payment.
    PaymentApproved(PaymentApprovedData),

    /// The gateway declined the payment.
    PaymentRefused(PaymentRefusedData),
}

impl DomainEvent for PaymentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PaymentEvent::PaymentApproved(_) => "PaymentApproved",
            PaymentEvent::PaymentRefused(_) => "PaymentRefused",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PaymentEvent::PaymentApproved(data) => data.occurred_at,
            PaymentEvent::PaymentRefused(data) => data.occurred_at,
        }
    }
}

/// Data for PaymentApproved event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentApprovedData {
    /// The payment that was approved.
    pub payment_id: EntityId,

    /// The order the payment settles.
    pub order_id: OrderId,

    /// Amount authorized.
    pub amount: Money,

    /// Gateway transaction code.
    pub transaction_code: String,

    /// When the approval was recorded.
    pub occurred_at: DateTime<Utc>,
}

/// Data for PaymentRefused event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRefusedData {
    /// The payment that was refused.
    pub payment_id: EntityId,

    /// The order the payment was meant to settle.
    pub order_id: OrderId,

    /// Amount that was declined.
    pub amount: Money,

    /// Gateway transaction code.
    pub transaction_code: String,

    /// When the refusal was recorded.
    pub occurred_at: DateTime<Utc>,
}

// Convenience constructors for events
impl PaymentEvent {
    /// Creates a PaymentApproved event.
    pub fn payment_approved(
        payment_id: EntityId,
        order_id: OrderId,
        amount: Money,
        transaction_code: impl Into<String>,
    ) -> Self {
        PaymentEvent::PaymentApproved(PaymentApprovedData {
            payment_id,
            order_id,
            amount,
            transaction_code: transaction_code.into(),
            occurred_at: Utc::now(),
        })
    }

    /// Creates a PaymentRefused event.
    pub fn payment_refused(
        payment_id: EntityId,
        order_id: OrderId,
        amount: Money,
        transaction_code: impl Into<String>,
    ) -> Self {
        PaymentEvent::PaymentRefused(PaymentRefusedData {
            payment_id,
            order_id,
            amount,
            transaction_code: transaction_code.into(),
            occurred_at: Utc::now(),
        })
    }

    /// Returns the payment the event belongs to.
    pub fn payment_id(&self) -> &EntityId {
        match self {
            PaymentEvent::PaymentApproved(data) => &data.payment_id,
            PaymentEvent::PaymentRefused(data) => &data.payment_id,
        }
    }
}
