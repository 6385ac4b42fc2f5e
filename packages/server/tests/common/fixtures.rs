//! Test fixtures for creating test data.
//!
//! Fixtures use the model methods directly; tests isolate on unique phones.

use anyhow::Result;
use rand::Rng;
use sqlx::PgPool;

use server_core::domains::auth::models::PendingOtp;

/// A random E.164-style Indian phone number, unique enough per test
pub fn unique_phone() -> String {
    format!(
        "+91{}",
        rand::thread_rng().gen_range(1_000_000_000u64..=9_999_999_999)
    )
}

/// Read back the stored fallback code for a phone (the dev-mode channel)
pub async fn stored_code(pool: &PgPool, phone: &str) -> Result<Option<String>> {
    Ok(PendingOtp::find_by_phone(phone, pool)
        .await?
        .map(|pending| pending.code))
}

/// Count pending rows for a phone
pub async fn pending_count(pool: &PgPool, phone: &str) -> Result<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pending_otps WHERE phone = $1")
            .bind(phone)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Plant an already-expired code for a phone
pub async fn plant_expired_otp(pool: &PgPool, phone: &str, code: &str) -> Result<()> {
    let expired_at = chrono::Utc::now() - chrono::Duration::minutes(1);
    PendingOtp::upsert(phone, code, expired_at, pool).await?;
    Ok(())
}
