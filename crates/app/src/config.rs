//! Application configuration loaded from environment variables.

use std::str::FromStr;

use domain::PaymentMethod;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, one line per event.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// How the gateway answers the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Confirm,
    Refuse,
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirm" => Ok(Outcome::Confirm),
            "refuse" => Ok(Outcome::Refuse),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

/// Scenario configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `PAYMENT_ORDER_ID`: order being paid (default: `"order-123"`)
/// - `PAYMENT_AMOUNT_CENTS`: amount in minor units (default: `10000`)
/// - `PAYMENT_METHOD`: snake_case method name (default: `credit_card`)
/// - `PAYMENT_TRANSACTION_CODE`: gateway code (default: `"TXN-123"`); an empty
///   value asks for a locally generated code
/// - `PAYMENT_OUTCOME`: `confirm` or `refuse` (default: `confirm`)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub order_id: String,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub transaction_code: Option<String>,
    pub outcome: Outcome,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Missing or unparseable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: parsed(&lookup, "LOG_FORMAT").unwrap_or(defaults.log_format),
            order_id: lookup("PAYMENT_ORDER_ID").unwrap_or(defaults.order_id),
            amount_cents: parsed(&lookup, "PAYMENT_AMOUNT_CENTS").unwrap_or(defaults.amount_cents),
            method: parsed(&lookup, "PAYMENT_METHOD").unwrap_or(defaults.method),
            transaction_code: match lookup("PAYMENT_TRANSACTION_CODE") {
                Some(code) if code.trim().is_empty() => None,
                Some(code) => Some(code),
                None => defaults.transaction_code,
            },
            outcome: parsed(&lookup, "PAYMENT_OUTCOME").unwrap_or(defaults.outcome),
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|value| value.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            order_id: "order-123".to_string(),
            amount_cents: 10_000,
            method: PaymentMethod::CreditCard,
            transaction_code: Some("TXN-123".to_string()),
            outcome: Outcome::Confirm,
        }
    }
}
