//! Verify OTP action

use tracing::info;

use crate::domains::auth::types::AuthSession;
use crate::domains::auth::AuthError;
use crate::domains::user::User;
use crate::kernel::ServerDeps;

/// Verify a submitted code, then resolve the user and mint a session token.
///
/// The format gate runs before any storage or provider call. A user record is
/// created lazily on the first successful verification for a phone; later
/// logins reuse it (the unique phone index keeps this idempotent).
pub async fn verify_otp(phone: &str, code: &str, deps: &ServerDeps) -> Result<AuthSession, AuthError> {
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(AuthError::InvalidOtpFormat);
    }

    deps.otp.check_code(phone, code).await?;

    let user = match User::find_by_phone(phone, &deps.db_pool).await? {
        Some(user) => user,
        None => {
            let user = User::create(phone, "New User", &deps.db_pool).await?;
            info!(phone, user_id = %user.id, "Created user on first OTP login");
            user
        }
    };

    let token = deps.jwt_service.create_token(user.id, user.role)?;
    info!(user_id = %user.id, "OTP verified");

    Ok(AuthSession {
        message: "Verification & Login successful".to_string(),
        user: user.into(),
        token,
    })
}
