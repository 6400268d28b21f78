//! Domain layer for the sales context.
//!
//! This crate provides:
//! - Code-addressable domain errors and their joined form
//! - Guard functions for composing validation rules
//! - Entity, DomainEvent and EventSource traits
//! - An EventPublisher port with in-process implementations
//! - The Payment entity with its state machine

pub mod aggregate;
pub mod error;
pub mod guard;
pub mod payment;
pub mod publisher;

pub use aggregate::{DomainEvent, Entity, EventSource};
pub use error::{DomainError, DomainErrors, Result, must};
pub use payment::{
    Money, OrderId, Payment, PaymentApprovedData, PaymentEvent, PaymentMethod,
    PaymentRefusedData, PaymentSnapshot, PaymentStatus,
};
pub use publisher::{
    EventPublisher, InMemoryEventPublisher, NoopEventPublisher, PublishError, publish_pending,
};
