//! Application error type.

use domain::{DomainErrors, PublishError};
use thiserror::Error;

/// Errors that stop the payment scenario.
#[derive(Debug, Error)]
pub enum AppError {
    /// The payment rejected an operation.
    #[error("Payment operation rejected:\n{0}")]
    Domain(#[from] DomainErrors),

    /// Recorded events could not be delivered.
    #[error("Event publishing failed: {0}")]
    Publish(#[from] PublishError),

    /// The log subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    /// The metrics recorder could not be installed.
    #[error("Metrics setup failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Domain(_) => 2,
            AppError::Publish(_) => 3,
            AppError::Logging(_) | AppError::Metrics(_) => 1,
        }
    }
}
