//! API error responses.

use salvo::{
    catcher::Catcher,
    http::ResBody,
    oapi::{self, Components, Content, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ErrorKind {
    /// Malformed or missing input.
    InvalidArgument,

    /// A referenced resource does not exist.
    NotFound,

    /// The caller does not own the resource.
    PermissionDenied,

    /// The request breaks a business rule in the resource's current state.
    InvalidState,

    /// The resource already exists.
    Conflict,

    /// Unexpected failure.
    Internal,
}

impl ErrorKind {
    fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidArgument | Self::InvalidState => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn from_status_code(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::BAD_REQUEST => Some(Self::InvalidArgument),
            StatusCode::NOT_FOUND => Some(Self::NotFound),
            StatusCode::FORBIDDEN => Some(Self::PermissionDenied),
            StatusCode::CONFLICT => Some(Self::Conflict),
            StatusCode::INTERNAL_SERVER_ERROR => Some(Self::Internal),
            _ => None,
        }
    }
}

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human-readable description of the failure
    pub message: String,

    /// Error category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

/// A failed request, rendered as an [`ErrorResponse`] body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub(crate) fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Internal causes are logged by the caller; the body stays generic.
    pub(crate) fn internal() -> Self {
        Self::new(ErrorKind::Internal, "Internal server error")
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.kind.status_code());
        res.render(Json(ErrorResponse {
            message: self.message,
            error: Some(self.kind),
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Invalid argument or invalid state"),
            (StatusCode::FORBIDDEN, "Permission denied"),
            (StatusCode::NOT_FOUND, "Not found"),
            (StatusCode::CONFLICT, "Conflict"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content(
                    "application/json",
                    Content::new(ErrorResponse::to_schema(components)),
                ),
            );
        }
    }
}

/// Renders failures raised by salvo itself, like extractor parse errors or
/// unmatched routes, with the same body as [`ApiError`].
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(status_error_body)
}

#[handler]
async fn status_error_body(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    let kind = ErrorKind::from_status_code(status);

    let message = match (res.take_body(), kind) {
        (_, Some(ErrorKind::Internal)) => "Internal server error".to_string(),
        (ResBody::Error(error), Some(ErrorKind::InvalidArgument)) => error
            .cause
            .map_or(error.brief, |cause| cause.to_string()),
        (ResBody::Error(error), _) => error.brief,
        _ => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    res.render(Json(ErrorResponse {
        message,
        error: kind,
    }));
    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn forbidden() -> Result<&'static str, ApiError> {
        Err(ApiError::permission_denied("Not your order"))
    }

    #[tokio::test]
    async fn api_error_renders_message_and_kind() -> TestResult {
        let service = Service::new(Router::with_path("forbidden").get(forbidden));

        let mut res = TestClient::get("http://example.com/forbidden")
            .send(&service)
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(body.message, "Not your order");
        assert_eq!(body.error, Some(ErrorKind::PermissionDenied));

        Ok(())
    }

    #[test]
    fn invalid_state_shares_bad_request_with_invalid_argument() {
        assert_eq!(
            ErrorKind::InvalidState.status_code(),
            ErrorKind::InvalidArgument.status_code()
        );
        assert_eq!(
            ApiError::invalid_state("Cart is empty").kind,
            ErrorKind::InvalidState
        );
    }
}
