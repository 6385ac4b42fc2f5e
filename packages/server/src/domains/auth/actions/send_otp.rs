//! Send OTP action

use tracing::info;

use crate::domains::auth::types::OtpSent;
use crate::domains::auth::AuthError;
use crate::kernel::ServerDeps;

/// Issue a one-time passcode for the phone number.
///
/// Delegates to whichever gateway was selected at startup (Twilio Verify or
/// the local dev store). No user record is touched here; identity resolution
/// happens only at verification.
pub async fn send_otp(phone: &str, deps: &ServerDeps) -> Result<OtpSent, AuthError> {
    if phone.trim().is_empty() {
        return Err(AuthError::InvalidInput(
            "Phone number is required.".to_string(),
        ));
    }

    let sent = deps.otp.send_code(phone).await?;
    info!(phone, "OTP issued");
    Ok(sent)
}
