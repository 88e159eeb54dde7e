//! Structured logging, trace export, request middleware and metrics.

use thiserror::Error;

mod init;
mod metrics;
mod otel;
mod request;

pub(crate) use init::Observability;
pub(crate) use metrics::{metrics_handler, record_order_placed};
pub(crate) use request::RequestLogger;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to build OTLP exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
