//! Conversion of operation outcomes into the response envelope

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ecare_core::{Envelope, GatewayError, Payload};

/// Handler result rendered as a `{success, ...}` envelope.
///
/// Operation failures are reported in the body; the status stays 200 so
/// callers only need to inspect `success`.
pub struct ApiResponse<T>(pub Envelope<T>);

impl<T: Payload> ApiResponse<T> {
    /// Wrap `result`, logging the failure for `operation` if there is one
    pub fn from_result(operation: &'static str, result: Result<T, GatewayError>) -> Self {
        if let Err(e) = &result {
            tracing::error!(operation, error = %e, "Operation failed");
        }
        Self(result.into())
    }
}

impl<T: Payload> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Map an axum extractor rejection to a validation error
pub fn rejection(err: impl std::fmt::Display) -> GatewayError {
    GatewayError::Validation(err.to_string())
}
