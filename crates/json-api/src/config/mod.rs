//! Server configuration

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Miam JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "miam-json", about = "Miam food delivery JSON API", long_about = None)]
pub struct ServerConfig {
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Span export and slow-request settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from `.env`, the environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env is fine
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_flags_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "miam-json",
            "--database-url",
            "postgres://miam@localhost/miam",
            "--port",
            "9000",
            "--run-migrations",
        ])?;

        assert_eq!(config.server.socket_addr(), "0.0.0.0:9000");
        assert!(config.database.run_migrations, "expected migrations flag");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);

        Ok(())
    }

    #[test]
    fn help_describes_observability_flags() {
        let help = ServerConfig::command().render_long_help().to_string();

        assert!(help.contains("--otel-trace-sample-ratio"), "{help}");
        assert!(help.contains("Ship request spans to an OTLP collector"), "{help}");
        assert!(help.contains("--slow-request-threshold-ms"), "{help}");
    }
}
