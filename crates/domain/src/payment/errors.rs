//! Failure kinds raised by the payment entity.
//!
//! Match them with [`DomainError::matches_code`] or
//! [`DomainErrors::contains`](crate::error::DomainErrors::contains).

use crate::error::DomainError;

/// The order reference is empty or whitespace.
pub static INVALID_ORDER_ID: DomainError = DomainError::new(
    "PAYMENT.INVALID_ORDER_ID",
    "order ID cannot be null or whitespace",
);

/// The amount is zero or negative.
pub static INVALID_AMOUNT: DomainError = DomainError::new(
    "PAYMENT.INVALID_AMOUNT",
    "payment amount must be greater than zero",
);

/// The supplied transaction code is empty or whitespace.
pub static INVALID_TRANSACTION_CODE: DomainError = DomainError::new(
    "PAYMENT.INVALID_TRANSACTION_CODE",
    "transaction code cannot be null or whitespace",
);

/// A transaction code was already assigned.
pub static TRANSACTION_CODE_ALREADY_DEFINED: DomainError = DomainError::new(
    "PAYMENT.TRANSACTION_CODE_ALREADY_DEFINED",
    "transaction code has already been defined",
);

/// The payment already reached a terminal status.
pub static TRANSACTION_CODE_AFTER_COMPLETION: DomainError = DomainError::new(
    "PAYMENT.TRANSACTION_CODE_AFTER_COMPLETION",
    "transaction code cannot be defined after payment has been confirmed or refused",
);

/// The payment is not pending.
pub static NOT_PENDING: DomainError =
    DomainError::new("PAYMENT.NOT_PENDING", "payment is not in pending status");

/// Settlement was attempted before a transaction code was assigned.
pub static TRANSACTION_CODE_NOT_DEFINED: DomainError = DomainError::new(
    "PAYMENT.TRANSACTION_CODE_NOT_DEFINED",
    "transaction code has not been defined yet",
);

/// Unrecognized payment method code or name.
pub static INVALID_METHOD: DomainError =
    DomainError::new("PAYMENT.INVALID_METHOD", "invalid payment method");

/// Unrecognized payment status code or name.
pub static INVALID_STATUS: DomainError =
    DomainError::new("PAYMENT.INVALID_STATUS", "invalid payment status");

/// The payment time does not match the status: only authorized payments have one.
pub static INCONSISTENT_PAID_AT: DomainError = DomainError::new(
    "PAYMENT.INCONSISTENT_PAID_AT",
    "paid at must be set if and only if the payment is authorized",
);
