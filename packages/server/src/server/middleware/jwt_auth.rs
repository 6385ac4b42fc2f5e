use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domains::auth::JwtService;
use crate::domains::user::UserRole;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// JWT authentication middleware
///
/// Extracts the bearer token from the Authorization header, verifies it, and
/// adds AuthUser to request extensions. With no token or an invalid token the
/// request continues without AuthUser; protected handlers decide themselves.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!("Authenticated user: {}", user.user_id);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the JWT token from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Handle both "Bearer <token>" and raw tokens
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;
    let user_id = Uuid::parse_str(&claims.sub).ok()?;

    Some(AuthUser {
        user_id,
        role: claims.role,
    })
}
