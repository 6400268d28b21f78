//! Payment scenario entry point.

use std::process::ExitCode;

use app::{AppError, Config, LogFormat, LoggingEventPublisher, run_scenario};
use common::UuidGenerator;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }
    Ok(())
}

fn init_metrics() -> Result<PrometheusHandle, AppError> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Load configuration
    let config = Config::from_env();

    // 2. Initialize tracing and the Prometheus recorder
    let metrics_handle = match init_tracing(&config).and_then(|()| init_metrics()) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    tracing::info!(
        order_id = %config.order_id,
        amount_cents = config.amount_cents,
        method = %config.method,
        outcome = ?config.outcome,
        "starting payment scenario"
    );

    // 3. Drive the payment and publish its events
    let result = run_scenario(&config, &UuidGenerator, &LoggingEventPublisher).await;

    // 4. Dump metrics collected during the run
    tracing::info!(metrics = %metrics_handle.render(), "metrics snapshot");

    match result {
        Ok(report) => {
            tracing::info!(
                payment_id = %report.payment_id,
                status = %report.status,
                transaction_code = report.transaction_code.as_deref().unwrap_or_default(),
                "scenario finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "scenario failed");
            ExitCode::from(err.exit_code())
        }
    }
}
