//! Payment status state machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::errors::INVALID_STATUS;

/// The lifecycle state of a payment.
///
/// State transitions:
/// ```text
/// Pending ──┬──► Authorized
///           └──► Refused
/// ```
///
/// `Refunded` and `Cancelled` are part of the vocabulary but no operation
/// moves a payment into them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting a gateway decision.
    Pending,

    /// Confirmed by the gateway (terminal state).
    Authorized,

    /// Declined by the gateway (terminal state).
    Refused,

    /// A previously authorized payment was returned.
    Refunded,

    /// Abandoned before completion.
    Cancelled,
}

impl PaymentStatus {
    /// Every status, in code order.
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Pending,
        PaymentStatus::Authorized,
        PaymentStatus::Refused,
        PaymentStatus::Refunded,
        PaymentStatus::Cancelled,
    ];

    /// Returns true if a transaction code may be assigned in this state.
    pub fn accepts_transaction_code(&self) -> bool {
        matches!(self, PaymentStatus::Pending)
    }

    /// Returns true if the payment can be confirmed or refused in this state.
    pub fn can_settle(&self) -> bool {
        matches!(self, PaymentStatus::Pending)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }

    /// Returns the stable numeric code (1-based).
    pub fn code(&self) -> i32 {
        match self {
            PaymentStatus::Pending => 1,
            PaymentStatus::Authorized => 2,
            PaymentStatus::Refused => 3,
            PaymentStatus::Refunded => 4,
            PaymentStatus::Cancelled => 5,
        }
    }

    /// Parses a numeric code produced by [`PaymentStatus::code`].
    pub fn parse(code: i32) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| INVALID_STATUS.clone())
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Authorized => "authorized",
            PaymentStatus::Refused => "refused",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| INVALID_STATUS.clone())
    }
}
