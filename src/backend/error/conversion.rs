/**
 * Error Conversion
 *
 * Backend errors implement `IntoResponse` so handlers can return them
 * directly. The body is JSON:
 *
 * ```json
 * {
 *   "error": "reply target 'msg_1' does not exist",
 *   "status": 422
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Rejection for request bodies that are not valid JSON for the endpoint
pub fn bad_body(rejection: axum::extract::rejection::JsonRejection) -> BackendError {
    BackendError::handler(StatusCode::BAD_REQUEST, rejection.body_text())
}
