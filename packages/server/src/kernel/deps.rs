//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to domain actions. The OTP gateway is
//! a trait object so tests can substitute a fake provider, and so the
//! provider-backed vs local-fallback choice is made once at startup rather
//! than re-evaluated per call.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::otp::OtpGateway;
use crate::domains::auth::JwtService;

/// Server dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// OTP issuance/verification strategy, selected at startup
    pub otp: Arc<dyn OtpGateway>,
    /// JWT service for session token creation
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, otp: Arc<dyn OtpGateway>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            db_pool,
            otp,
            jwt_service,
        }
    }
}
