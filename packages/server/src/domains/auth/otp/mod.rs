//! OTP issuance and verification strategies
//!
//! Exactly one strategy is active per process, chosen at startup from
//! configuration: Twilio Verify when real credentials are present, otherwise
//! a locally stored, expiring, single-use code. The seam is a trait so the
//! rest of the auth domain never knows which path is live, and so tests can
//! inject a fake gateway.

mod local;
mod remote;

pub use local::LocalOtpStore;
pub use remote::RemoteOtpProvider;

use async_trait::async_trait;

use crate::domains::auth::types::OtpSent;
use crate::domains::auth::AuthError;

/// Strategy for delivering and checking one-time passcodes
#[async_trait]
pub trait OtpGateway: Send + Sync {
    /// Generate and deliver a code for the phone number
    async fn send_code(&self, phone: &str) -> Result<OtpSent, AuthError>;

    /// Check a submitted code, consuming it on success
    async fn check_code(&self, phone: &str, code: &str) -> Result<(), AuthError>;
}
