//! Auth domain result types

use serde::{Deserialize, Serialize};

use crate::domains::user::UserProfile;

/// Result of issuing an OTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSent {
    pub message: String,
}

/// Result of a successful login (OTP or password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

/// Result of a service-coverage lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageCheck {
    pub available: bool,
    pub message: String,
    pub coverage: String,
    pub zones: Vec<String>,
}
