//! Log output and trace export settings for the miam server.

use clap::Args;

/// How log lines are written to stdout.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// One short line per event, for terminals.
    Compact,

    /// One JSON object per event, for log collectors.
    Json,
}

#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `miam_app=debug,info`
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Output style of log lines
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Where request spans go and when a request counts as slow.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Ship request spans to an OTLP collector.
    #[arg(long, env = "OTEL_ENABLED", default_value_t = true)]
    pub otel_enabled: bool,

    /// Continue the caller's trace when a `traceparent` header is sent.
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// Collector address, reached over gRPC.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// Seconds to wait on the collector before dropping a batch.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3u64
    )]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// Name the spans are reported under.
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "miam-json")]
    pub otel_service_name: String,

    /// Build version attached to every span.
    #[arg(
        long,
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub otel_service_version: String,

    /// Deployment label, e.g. `staging` or `production`.
    #[arg(
        long,
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub otel_deployment_environment: String,

    /// Share of root spans kept, from 0.0 (none) to 1.0 (all).
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub otel_trace_sample_ratio: f64,

    /// Latency in milliseconds above which a finished request is logged at warn.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}
