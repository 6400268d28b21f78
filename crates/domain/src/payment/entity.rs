//! Payment entity implementation.

use chrono::{DateTime, Utc};
use common::{EntityId, IdGenerator, UuidGenerator};
use serde::{Deserialize, Serialize};

use crate::aggregate::{DomainEvent, Entity, EventSource};
use crate::error::{DomainErrors, Result};
use crate::guard;

use super::errors::{
    INCONSISTENT_PAID_AT, INVALID_AMOUNT, INVALID_ORDER_ID, INVALID_TRANSACTION_CODE, NOT_PENDING,
    TRANSACTION_CODE_AFTER_COMPLETION, TRANSACTION_CODE_ALREADY_DEFINED,
    TRANSACTION_CODE_NOT_DEFINED,
};
use super::{Money, OrderId, PaymentEvent, PaymentMethod, PaymentStatus};

/// A payment transaction owned by the order aggregate.
///
/// Created pending, it receives a gateway transaction code and then settles
/// exactly once, either authorized via [`Payment::confirm_payment`] or refused
/// via [`Payment::refuse_payment`].
///
/// Every operation evaluates all of its preconditions and reports each
/// violation in a single [`DomainErrors`]; a rejected operation leaves the
/// payment untouched.
///
/// Deserialization goes through [`PaymentSnapshot`] and rejects field
/// combinations the operations above could never produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PaymentSnapshot")]
pub struct Payment {
    /// Unique payment identifier.
    id: EntityId,

    /// The order this payment settles.
    order_id: OrderId,

    /// Amount to charge, always positive.
    amount: Money,

    /// Channel used to pay.
    method: PaymentMethod,

    /// Current lifecycle state.
    status: PaymentStatus,

    /// When the payment was authorized.
    paid_at: Option<DateTime<Utc>>,

    /// When the payment last changed.
    updated_at: Option<DateTime<Utc>>,

    /// Code issued by the payment gateway.
    transaction_code: Option<String>,

    /// Events recorded and not yet taken.
    #[serde(skip)]
    events: Vec<PaymentEvent>,
}

/// Serialized form of a [`Payment`], checked before it becomes one.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSnapshot {
    pub id: EntityId,
    pub order_id: OrderId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub transaction_code: Option<String>,
}

impl TryFrom<PaymentSnapshot> for Payment {
    type Error = DomainErrors;

    /// Fails with every violated rule: blank order ID, non-positive amount,
    /// blank transaction code, a settled status without a code, or `paid_at`
    /// disagreeing with the `Authorized` status.
    fn try_from(snapshot: PaymentSnapshot) -> Result<Self> {
        let settled = !snapshot.status.accepts_transaction_code();
        let authorized = snapshot.status == PaymentStatus::Authorized;

        DomainErrors::join([
            guard::not_blank(snapshot.order_id.as_str(), &INVALID_ORDER_ID),
            guard::positive(&snapshot.amount, &INVALID_AMOUNT),
            snapshot
                .transaction_code
                .as_deref()
                .and_then(|code| guard::not_blank(code, &INVALID_TRANSACTION_CODE)),
            (settled && snapshot.transaction_code.is_none())
                .then(|| TRANSACTION_CODE_NOT_DEFINED.clone()),
            (snapshot.paid_at.is_some() != authorized).then(|| INCONSISTENT_PAID_AT.clone()),
        ])
        .inspect_err(|errors| log_rejection("restore", Some(&snapshot.id), errors))?;

        Ok(Self {
            id: snapshot.id,
            order_id: snapshot.order_id,
            amount: snapshot.amount,
            method: snapshot.method,
            status: snapshot.status,
            paid_at: snapshot.paid_at,
            updated_at: snapshot.updated_at,
            transaction_code: snapshot.transaction_code,
            events: Vec::new(),
        })
    }
}

impl Entity for Payment {
    type Id = EntityId;

    fn entity_type() -> &'static str {
        "Payment"
    }

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl EventSource for Payment {
    type Event = PaymentEvent;

    fn pending_events(&self) -> &[PaymentEvent] {
        &self.events
    }

    fn take_events(&mut self) -> Vec<PaymentEvent> {
        std::mem::take(&mut self.events)
    }
}

impl PartialEq for Payment {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Payment {}

// Query methods
impl Payment {
    /// Returns the order ID.
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Returns the amount.
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the payment method.
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Returns the current status.
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Returns when the payment was authorized.
    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    /// Returns when the payment last changed.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the gateway transaction code.
    pub fn transaction_code(&self) -> Option<&str> {
        self.transaction_code.as_deref()
    }

    /// Returns true if the payment has settled.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// Command methods
impl Payment {
    /// Creates a pending payment with a random UUID identifier.
    pub fn create(
        order_id: impl Into<String>,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Self> {
        Self::create_with(&UuidGenerator, order_id, amount, method)
    }

    /// Creates a pending payment whose identifier comes from `ids`.
    ///
    /// Fails with `INVALID_ORDER_ID` and/or `INVALID_AMOUNT`.
    pub fn create_with<G>(
        ids: &G,
        order_id: impl Into<String>,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Self>
    where
        G: IdGenerator + ?Sized,
    {
        let order_id = order_id.into();

        DomainErrors::join([
            guard::not_blank(&order_id, &INVALID_ORDER_ID),
            guard::positive(&amount, &INVALID_AMOUNT),
        ])
        .inspect_err(|errors| log_rejection("create", None, errors))?;

        let payment = Self {
            id: ids.generate(),
            order_id: OrderId::new(order_id),
            amount,
            method,
            status: PaymentStatus::Pending,
            paid_at: None,
            updated_at: None,
            transaction_code: None,
            events: Vec::new(),
        };

        metrics::counter!("payments_created_total").increment(1);
        tracing::debug!(
            payment_id = %payment.id,
            order_id = %payment.order_id,
            amount = %payment.amount,
            method = %method,
            "payment created"
        );

        Ok(payment)
    }

    /// Assigns the code returned by the payment gateway.
    ///
    /// Fails with `TRANSACTION_CODE_AFTER_COMPLETION` once settled,
    /// `INVALID_TRANSACTION_CODE` for a blank code and
    /// `TRANSACTION_CODE_ALREADY_DEFINED` when a code is already set.
    pub fn define_transaction_code(&mut self, code: impl Into<String>) -> Result<()> {
        let code = code.into();

        DomainErrors::join([
            (!self.status.accepts_transaction_code())
                .then(|| TRANSACTION_CODE_AFTER_COMPLETION.clone()),
            guard::not_blank(&code, &INVALID_TRANSACTION_CODE),
            guard::is_absent(self.transaction_code.as_ref(), &TRANSACTION_CODE_ALREADY_DEFINED),
        ])
        .inspect_err(|errors| log_rejection("define_transaction_code", Some(&self.id), errors))?;

        tracing::debug!(payment_id = %self.id, transaction_code = %code, "transaction code defined");

        self.transaction_code = Some(code);
        self.touch(Utc::now());
        Ok(())
    }

    /// Assigns a locally generated `LOCAL-<id>` code if none is set yet.
    ///
    /// Does nothing when a code is already present.
    pub fn define_local_transaction_code<G>(&mut self, ids: &G) -> Result<()>
    where
        G: IdGenerator + ?Sized,
    {
        if self.transaction_code.is_some() {
            return Ok(());
        }

        self.define_transaction_code(format!("LOCAL-{}", ids.generate()))
    }

    /// Authorizes the payment and records a `PaymentApproved` event.
    ///
    /// Fails with `NOT_PENDING` and/or `TRANSACTION_CODE_NOT_DEFINED`.
    pub fn confirm_payment(&mut self) -> Result<()> {
        let transaction_code = self.require_settleable("confirm_payment")?;

        let now = Utc::now();
        self.paid_at = Some(now);
        self.status = PaymentStatus::Authorized;
        self.touch(now);
        self.record(PaymentEvent::payment_approved(
            self.id.clone(),
            self.order_id.clone(),
            self.amount,
            transaction_code,
        ));

        Ok(())
    }

    /// Declines the payment and records a `PaymentRefused` event.
    ///
    /// Fails with `NOT_PENDING` and/or `TRANSACTION_CODE_NOT_DEFINED`.
    pub fn refuse_payment(&mut self) -> Result<()> {
        let transaction_code = self.require_settleable("refuse_payment")?;

        self.status = PaymentStatus::Refused;
        self.touch(Utc::now());
        self.record(PaymentEvent::payment_refused(
            self.id.clone(),
            self.order_id.clone(),
            self.amount,
            transaction_code,
        ));

        Ok(())
    }
}

// Internal helpers
impl Payment {
    /// Checks the settlement preconditions and returns the transaction code.
    fn require_settleable(&self, operation: &'static str) -> Result<String> {
        DomainErrors::join([
            (!self.status.can_settle()).then(|| NOT_PENDING.clone()),
            guard::not_absent(self.transaction_code.as_ref(), &TRANSACTION_CODE_NOT_DEFINED),
        ])
        .and_then(|()| {
            self.transaction_code
                .clone()
                .ok_or_else(|| TRANSACTION_CODE_NOT_DEFINED.clone().into())
        })
        .inspect_err(|errors| log_rejection(operation, Some(&self.id), errors))
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    fn record(&mut self, event: PaymentEvent) {
        metrics::counter!("payment_transitions_total", "status" => self.status.as_str())
            .increment(1);
        tracing::debug!(
            payment_id = %self.id,
            status = %self.status,
            event_type = event.event_type(),
            "payment settled"
        );
        self.events.push(event);
    }
}

fn log_rejection(operation: &'static str, payment_id: Option<&EntityId>, errors: &DomainErrors) {
    metrics::counter!("payment_operations_rejected_total", "operation" => operation).increment(1);
    tracing::warn!(
        operation,
        payment_id = payment_id.map(EntityId::as_str),
        errors = %errors,
        "payment operation rejected"
    );
}
