//! HTTP boundary error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domains::auth::AuthError;

/// Wraps `AuthError` so route handlers can use `?`.
///
/// Domain failures become a 400 with the error's own message; database and
/// internal failures are logged and collapsed into a generic 500 so storage
/// detail never reaches clients.
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Database error in auth flow");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::Internal(e) => {
                tracing::error!(error = %e, "Internal error in auth flow");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            other => (StatusCode::BAD_REQUEST, other.to_string()),
        };

        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
