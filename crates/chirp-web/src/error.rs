//! HTTP mapping for dispatch failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chirp_core::{DispatchError, TransportError};
use serde_json::json;

/// A [`DispatchError`] rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub DispatchError);

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DispatchError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DispatchError::Transport(TransportError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            DispatchError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.0 {
            DispatchError::Validation(errors) => (status, Json(errors.to_body())).into_response(),
            DispatchError::Transport(e) => {
                tracing::error!(error = %e, "Event not delivered");
                (
                    status,
                    Json(json!({ "message": e.to_string(), "error": "transport" })),
                )
                    .into_response()
            }
        }
    }
}
