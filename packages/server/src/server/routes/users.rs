//! Authenticated user endpoints

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domains::user::{User, UserProfile};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

/// GET /api/users/me
///
/// Returns the caller's own profile. The JWT middleware attaches `AuthUser`
/// when a valid bearer token is presented; without it this is a 401.
pub async fn me_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Response, ApiError> {
    let Some(Extension(auth)) = auth else {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Authentication required" })),
        )
            .into_response());
    };

    let user = User::find_by_id(auth.user_id, &state.db_pool)
        .await
        .map_err(crate::domains::auth::AuthError::Internal)?;

    match user {
        Some(user) => {
            let profile: UserProfile = user.into();
            Ok(Json(json!({ "success": true, "user": profile })).into_response())
        }
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "User not found" })),
        )
            .into_response()),
    }
}
