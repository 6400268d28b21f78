//! Payment channels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::errors::INVALID_METHOD;

/// The channel a customer pays through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Cash,
    /// Pix instant transfer.
    Pix,
    /// Wire transfer (TED/DOC).
    BankTransfer,
    /// Bank slip (boleto bancário).
    BankSlip,
}

impl PaymentMethod {
    /// Every method, in code order.
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Cash,
        PaymentMethod::Pix,
        PaymentMethod::BankTransfer,
        PaymentMethod::BankSlip,
    ];

    /// Returns the stable numeric code (1-based).
    pub fn code(&self) -> i32 {
        match self {
            PaymentMethod::CreditCard => 1,
            PaymentMethod::DebitCard => 2,
            PaymentMethod::Cash => 3,
            PaymentMethod::Pix => 4,
            PaymentMethod::BankTransfer => 5,
            PaymentMethod::BankSlip => 6,
        }
    }

    /// Parses a numeric code produced by [`PaymentMethod::code`].
    pub fn parse(code: i32) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|method| method.code() == code)
            .ok_or_else(|| INVALID_METHOD.clone())
    }

    /// Returns the method name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Pix => "pix",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::BankSlip => "bank_slip",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| INVALID_METHOD.clone())
    }
}
