//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use twilio::TwilioService;

use crate::config::Config;
use crate::domains::auth::otp::{LocalOtpStore, OtpGateway, RemoteOtpProvider};
use crate::domains::auth::JwtService;
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    check_location_handler, health_handler, login_password_handler, me_handler,
    register_password_handler, send_otp_handler, verify_otp_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

/// Resolve the OTP strategy from configuration, once, at startup.
fn build_otp_gateway(pool: &PgPool, config: &Config) -> Arc<dyn OtpGateway> {
    match config.twilio_options() {
        Some(options) => {
            tracing::info!("OTP strategy: Twilio Verify (service {})", options.service_id);
            Arc::new(RemoteOtpProvider::new(Arc::new(TwilioService::new(options))))
        }
        None => {
            tracing::warn!(
                "OTP strategy: local dev fallback (Twilio not configured, codes go to the log)"
            );
            Arc::new(LocalOtpStore::new(pool.clone()))
        }
    }
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        config.jwt_expires_hours,
    ));

    let otp = build_otp_gateway(&pool, config);
    let deps = Arc::new(ServerDeps::new(pool.clone(), otp, jwt_service.clone()));

    let app_state = AppState {
        db_pool: pool,
        deps,
    };

    // CORS configuration - allow any origin for the mobile client
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting on the auth endpoints: 10/sec base with bursts of 20
    // per IP. OTP send/verify are the abuse targets here.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );
    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    let auth_routes = Router::new()
        .route("/send-otp", post(send_otp_handler))
        .route("/verify-otp", post(verify_otp_handler))
        .route("/check-location", post(check_location_handler))
        .route("/register-password", post(register_password_handler))
        .route("/login-password", post(login_password_handler))
        .layer(rate_limit_layer);

    let jwt_service_for_middleware = jwt_service.clone();

    Router::new()
        .nest("/api/auth", auth_routes)
        .route("/api/users/me", get(me_handler))
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
