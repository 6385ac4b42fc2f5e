//! Twilio Verify backed OTP strategy

use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;
use twilio::TwilioService;

use crate::domains::auth::otp::OtpGateway;
use crate::domains::auth::types::OtpSent;
use crate::domains::auth::AuthError;

/// Delegates the whole OTP lifecycle to Twilio Verify.
///
/// Twilio generates, stores, delivers and consumes the code; this process
/// keeps no OTP state of its own on this path.
pub struct RemoteOtpProvider {
    twilio: Arc<TwilioService>,
}

impl RemoteOtpProvider {
    pub fn new(twilio: Arc<TwilioService>) -> Self {
        Self { twilio }
    }
}

#[async_trait]
impl OtpGateway for RemoteOtpProvider {
    async fn send_code(&self, phone: &str) -> Result<OtpSent, AuthError> {
        let verification = self
            .twilio
            .start_verification(phone)
            .await
            .map_err(|e| {
                error!(phone, error = %e, "Twilio Verify send failed");
                AuthError::Delivery(format!("Twilio error: {}", e))
            })?;

        Ok(OtpSent {
            message: format!(
                "OTP sent to {} via Twilio Verify. Status: {}",
                phone, verification.status
            ),
        })
    }

    async fn check_code(&self, phone: &str, code: &str) -> Result<(), AuthError> {
        // Any non-approved status or transport failure collapses into one
        // client-facing message; Twilio's detail stays in the logs.
        self.twilio.check_verification(phone, code).await.map_err(|e| {
            error!(phone, error = %e, "Twilio Verify check failed");
            AuthError::ProviderRejected
        })
    }
}
