//! Per-request span, request id, completion logging and metrics.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::config::observability::ObservabilityConfig;

use super::metrics;

/// Depot key holding the request id for downstream handlers.
pub(crate) const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Wraps every request in an `http.request` span.
///
/// Requests slower than `slow_request_threshold` are logged as warnings.
/// An incoming `traceparent` header is honoured only when
/// `propagate_parent` is set.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogger {
    slow_request_threshold: Duration,
    propagate_parent: bool,
}

impl RequestLogger {
    pub(crate) fn from_config(config: &ObservabilityConfig) -> Self {
        Self {
            slow_request_threshold: Duration::from_millis(config.slow_request_threshold_ms),
            propagate_parent: config.otel_enabled && config.otel_parent_propagation_enabled,
        }
    }
}

#[handler]
impl RequestLogger {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if req.uri().path() == "/metrics" {
            ctrl.call_next(req, depot, res).await;
            return;
        }

        let started = Instant::now();
        let _in_flight = metrics::InFlight::start();

        let request_id =
            request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
        request_ids::set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();
        let route = spans::route_template(&path);

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %format!("{method} {route}"),
            otel.kind = "server",
            request_id = %request_id,
            method = %method,
            path = %path,
            remote_addr = %req.remote_addr(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        if self.propagate_parent
            && let Some(parent) = parent_context::extract_parent_context(req.headers())
            && let Err(source) = span.set_parent(parent)
        {
            warn!("failed to attach parent trace context: {source}");
        }

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let elapsed = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let duration_ms = elapsed.as_millis();

        metrics::observe_request(&method, &route, status, elapsed.as_secs_f64());

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request completed");

            if status.is_server_error() {
                error!(status = status.as_u16(), %method, %path, "server error response");
            } else if status.is_client_error() {
                warn!(status = status.as_u16(), %method, %path, "client error response");
            }

            if elapsed > self.slow_request_threshold {
                warn!(
                    %method,
                    %path,
                    duration_ms,
                    threshold_ms = self.slow_request_threshold.as_millis(),
                    "slow request"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn echo_request_id(depot: &mut Depot) -> String {
        depot
            .get::<String>(REQUEST_ID_DEPOT_KEY)
            .cloned()
            .unwrap_or_default()
    }

    fn make_service() -> Service {
        let logger = RequestLogger {
            slow_request_threshold: Duration::from_secs(1),
            propagate_parent: false,
        };

        Service::new(
            Router::new()
                .hoop(logger)
                .push(Router::with_path("ping").get(echo_request_id)),
        )
    }

    #[tokio::test]
    async fn supplied_request_id_is_echoed() -> TestResult {
        let mut res = TestClient::get("http://example.com/ping")
            .add_header(request_ids::REQUEST_ID_HEADER, "abc-123", true)
            .send(&make_service())
            .await;

        let body = res.take_string().await?;

        assert_eq!(body, "abc-123");
        assert_eq!(
            res.headers()
                .get(request_ids::REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("abc-123")
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() -> TestResult {
        let mut res = TestClient::get("http://example.com/ping")
            .send(&make_service())
            .await;

        let body = res.take_string().await?;

        assert!(
            uuid::Uuid::parse_str(&body).is_ok(),
            "expected a generated uuid, got {body:?}"
        );

        Ok(())
    }
}
