//! Response shapes for the Verify v2 endpoints (unused fields omitted).

use serde::Deserialize;

/// Response from `POST /v2/Services/{sid}/Verifications`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationStart {
    pub sid: String,
    pub to: String,
    pub channel: String,
    /// "pending" until the recipient submits a code.
    pub status: String,
}

/// Response from `POST /v2/Services/{sid}/VerificationCheck`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationCheck {
    pub to: String,
    /// "approved" when the submitted code matched.
    pub status: String,
}
