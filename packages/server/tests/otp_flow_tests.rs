//! Integration tests for the OTP login flow.
//!
//! Runs the real actions against the local fallback strategy on a Postgres
//! testcontainer, plus fake-gateway tests for the provider-backed branch of
//! identity resolution.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{pending_count, plant_expired_otp, stored_code, test_jwt_service, unique_phone, TestHarness};
use server_core::domains::auth::actions::{send_otp, verify_otp};
use server_core::domains::auth::otp::OtpGateway;
use server_core::domains::auth::types::OtpSent;
use server_core::domains::auth::AuthError;
use server_core::domains::user::{User, UserRole};
use test_context::test_context;

/// Flip the last digit so the code is guaranteed wrong but well-formed
fn wrong_code(code: &str) -> String {
    let mut chars: Vec<char> = code.chars().collect();
    let last = chars.last_mut().unwrap();
    *last = char::from_digit((last.to_digit(10).unwrap() + 1) % 10, 10).unwrap();
    chars.into_iter().collect()
}

// ============================================================================
// Issuance
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_send_otp_stores_six_digit_code(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    let sent = send_otp(&phone, &deps).await.unwrap();
    assert!(sent.message.contains("DEV MODE"));

    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_reissue_overwrites_pending_code(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    send_otp(&phone, &deps).await.unwrap();
    send_otp(&phone, &deps).await.unwrap();

    // Exactly one row survives; the second send owns it
    assert_eq!(pending_count(&ctx.db_pool, &phone).await.unwrap(), 1);

    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();
    let session = verify_otp(&phone, &code, &deps).await.unwrap();
    assert!(!session.token.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_send_otp_rejects_blank_phone(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let err = send_otp("  ", &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidInput(_)));
}

// ============================================================================
// Verification: happy path and single use
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_issue_verify_round_trip(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    send_otp(&phone, &deps).await.unwrap();
    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();

    let session = verify_otp(&phone, &code, &deps).await.unwrap();
    assert_eq!(session.user.phone, phone);
    assert_eq!(session.user.role, UserRole::Subscriber);
    assert!(session.user.is_active);
    assert!(!session.token.is_empty());

    // Token decodes back to the resolved identity
    let claims = test_jwt_service().verify_token(&session.token).unwrap();
    assert_eq!(claims.sub, session.user.id.to_string());
    assert_eq!(claims.role, UserRole::Subscriber);

    // Code was consumed
    assert_eq!(pending_count(&ctx.db_pool, &phone).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_replay_of_consumed_code_fails(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    send_otp(&phone, &deps).await.unwrap();
    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();

    verify_otp(&phone, &code, &deps).await.unwrap();

    let err = verify_otp(&phone, &code, &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::OtpNotRequested));
    assert_eq!(err.to_string(), "No OTP requested for this number.");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_verify_without_issue_fails(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let err = verify_otp("+919999999999", "000000", &deps).await.unwrap_err();
    assert_eq!(err.to_string(), "No OTP requested for this number.");
}

// ============================================================================
// Verification: mismatch and expiry keep the row
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_wrong_code_fails_but_allows_retry(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    send_otp(&phone, &deps).await.unwrap();
    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();

    let err = verify_otp(&phone, &wrong_code(&code), &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::OtpMismatch));

    // Row intact: the correct code still works
    assert_eq!(pending_count(&ctx.db_pool, &phone).await.unwrap(), 1);
    verify_otp(&phone, &code, &deps).await.unwrap();
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_expired_code_fails_even_when_correct(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    plant_expired_otp(&ctx.db_pool, &phone, "654321").await.unwrap();

    let err = verify_otp(&phone, "654321", &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::OtpExpired));
    assert_eq!(err.to_string(), "OTP has expired.");

    // The stale row is left in place until the next issuance overwrites it
    assert_eq!(pending_count(&ctx.db_pool, &phone).await.unwrap(), 1);

    // And it can never authenticate
    let err = verify_otp(&phone, "654321", &deps).await.unwrap_err();
    assert!(matches!(err, AuthError::OtpExpired));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_reissue_replaces_expired_code(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    plant_expired_otp(&ctx.db_pool, &phone, "654321").await.unwrap();
    send_otp(&phone, &deps).await.unwrap();

    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();
    verify_otp(&phone, &code, &deps).await.unwrap();
}

// ============================================================================
// Verification: format gate
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_malformed_codes_fail_fast(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    send_otp(&phone, &deps).await.unwrap();

    for bad in ["12a45", "12345", "1234567", "", "12 456", "12345x"] {
        let err = verify_otp(&phone, bad, &deps).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidOtpFormat), "code: {:?}", bad);
        assert_eq!(err.to_string(), "Invalid OTP format. Must be 6 digits.");
    }

    // The format gate never touched the pending row
    assert_eq!(pending_count(&ctx.db_pool, &phone).await.unwrap(), 1);
}

// ============================================================================
// Identity resolution
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_identity_resolution_is_idempotent(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    send_otp(&phone, &deps).await.unwrap();
    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();
    let first = verify_otp(&phone, &code, &deps).await.unwrap();

    send_otp(&phone, &deps).await.unwrap();
    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();
    let second = verify_otp(&phone, &code, &deps).await.unwrap();

    assert_eq!(first.user.id, second.user.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_existing_user_is_reused(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    let existing = User::create(&phone, "Asha", &ctx.db_pool).await.unwrap();

    send_otp(&phone, &deps).await.unwrap();
    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();
    let session = verify_otp(&phone, &code, &deps).await.unwrap();

    assert_eq!(session.user.id, existing.id);
    assert_eq!(session.user.name, "Asha");
}

// ============================================================================
// Provider-backed branch via fake gateways
// ============================================================================

struct ApprovingGateway;

#[async_trait]
impl OtpGateway for ApprovingGateway {
    async fn send_code(&self, phone: &str) -> Result<OtpSent, AuthError> {
        Ok(OtpSent {
            message: format!("OTP sent to {}", phone),
        })
    }

    async fn check_code(&self, _phone: &str, _code: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

struct RejectingGateway;

#[async_trait]
impl OtpGateway for RejectingGateway {
    async fn send_code(&self, _phone: &str) -> Result<OtpSent, AuthError> {
        Err(AuthError::Delivery("Twilio error: boom".to_string()))
    }

    async fn check_code(&self, _phone: &str, _code: &str) -> Result<(), AuthError> {
        Err(AuthError::ProviderRejected)
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_approving_provider_resolves_identity(ctx: &TestHarness) {
    let deps = ctx.deps_with_gateway(Arc::new(ApprovingGateway));
    let phone = unique_phone();

    let session = verify_otp(&phone, "123456", &deps).await.unwrap();
    assert_eq!(session.user.phone, phone);
    assert_eq!(session.user.role, UserRole::Subscriber);

    // No local OTP state is kept on the provider-backed path
    assert_eq!(pending_count(&ctx.db_pool, &phone).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_rejecting_provider_creates_no_user(ctx: &TestHarness) {
    let deps = ctx.deps_with_gateway(Arc::new(RejectingGateway));
    let phone = unique_phone();

    let err = verify_otp(&phone, "123456", &deps).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid or expired OTP.");

    // Verification failed before identity resolution: no user row
    assert!(User::find_by_phone(&phone, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_delivery_failure_surfaces_detail(ctx: &TestHarness) {
    let deps = ctx.deps_with_gateway(Arc::new(RejectingGateway));

    let err = send_otp(&unique_phone(), &deps).await.unwrap_err();
    assert!(err.to_string().contains("Failed to send OTP"));
}

// ============================================================================
// Concurrency: at most one verification succeeds per code
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_concurrent_verification_single_winner(ctx: &TestHarness) {
    let deps = ctx.local_deps();
    let phone = unique_phone();

    send_otp(&phone, &deps).await.unwrap();
    let code = stored_code(&ctx.db_pool, &phone).await.unwrap().unwrap();

    // Seed the user row so both attempts skip creation and race only on
    // the conditional delete.
    User::create(&phone, "Racer", &ctx.db_pool).await.unwrap();

    let (a, b) = tokio::join!(
        verify_otp(&phone, &code, &deps),
        verify_otp(&phone, &code, &deps),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);

    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser.unwrap_err(), AuthError::OtpNotRequested));
}
