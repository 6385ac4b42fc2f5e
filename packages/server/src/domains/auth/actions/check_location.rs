//! Service-coverage check action

use crate::domains::auth::types::CoverageCheck;
use crate::domains::auth::AuthError;

/// Report whether the service covers a location.
///
/// Coverage is currently universal; the shape exists so the onboarding flow
/// has a stable endpoint once real zone data lands.
pub async fn check_location(location: &str) -> Result<CoverageCheck, AuthError> {
    if location.trim().is_empty() {
        return Err(AuthError::InvalidInput("Location is required.".to_string()));
    }

    Ok(CoverageCheck {
        available: true,
        message: "Great news! We serve your area. You can now enjoy our full range of services."
            .to_string(),
        coverage: "Service Coverage Active in 1000+ locations".to_string(),
        zones: vec![
            "North Zone".to_string(),
            "South Zone".to_string(),
            "East Zone".to_string(),
            "West Zone".to_string(),
        ],
    })
}
