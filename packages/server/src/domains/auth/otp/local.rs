//! Local dev-mode OTP strategy

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::PgPool;
use tracing::warn;

use crate::domains::auth::models::PendingOtp;
use crate::domains::auth::otp::OtpGateway;
use crate::domains::auth::types::OtpSent;
use crate::domains::auth::AuthError;

/// Code lifetime for locally issued OTPs
const OTP_TTL_MINUTES: i64 = 5;

/// Stores codes in the `pending_otps` table when no Twilio credentials are
/// configured. Delivery is simulated: the code is written to the server log
/// so an operator (or a developer's terminal) can read it. Not a production
/// delivery mechanism.
pub struct LocalOtpStore {
    pool: PgPool,
}

impl LocalOtpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpGateway for LocalOtpStore {
    async fn send_code(&self, phone: &str) -> Result<OtpSent, AuthError> {
        let code = generate_code();
        let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINUTES);

        // Overwrites any unconsumed prior code for this phone
        PendingOtp::upsert(phone, &code, expires_at, &self.pool).await?;

        warn!("[DEV MODE] Generated OTP for {}: {}", phone, code);

        Ok(OtpSent {
            message: "[DEV MODE] Twilio is not configured. The OTP is visible in the backend log."
                .to_string(),
        })
    }

    async fn check_code(&self, phone: &str, code: &str) -> Result<(), AuthError> {
        let pending = PendingOtp::find_by_phone(phone, &self.pool)
            .await?
            .ok_or(AuthError::OtpNotRequested)?;

        if pending.code != code {
            return Err(AuthError::OtpMismatch);
        }
        if pending.expires_at < Utc::now() {
            // Row intentionally left in place; the next send overwrites it
            return Err(AuthError::OtpExpired);
        }

        // Atomic conditional delete: under concurrent verification only one
        // request deletes the row, the loser sees it as already consumed.
        let consumed = PendingOtp::consume(phone, code, &self.pool).await?;
        if !consumed {
            return Err(AuthError::OtpNotRequested);
        }

        Ok(())
    }
}

/// Uniform random 6-digit code
fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}
