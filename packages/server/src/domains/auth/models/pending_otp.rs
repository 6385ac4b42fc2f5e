use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// PendingOtp - an unconsumed dev-mode code awaiting verification
///
/// At most one row per phone: a new send upserts over any prior code. The row
/// is deleted on successful verification (single use) and otherwise only ever
/// replaced, never swept.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingOtp {
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl PendingOtp {
    /// Find the pending code for a phone
    pub async fn find_by_phone(phone: &str, pool: &PgPool) -> Result<Option<Self>> {
        let pending =
            sqlx::query_as::<_, PendingOtp>("SELECT * FROM pending_otps WHERE phone = $1")
                .bind(phone)
                .fetch_optional(pool)
                .await?;
        Ok(pending)
    }

    /// Insert or overwrite the pending code for a phone
    pub async fn upsert(
        phone: &str,
        code: &str,
        expires_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let pending = sqlx::query_as::<_, PendingOtp>(
            r#"
            INSERT INTO pending_otps (phone, code, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (phone)
            DO UPDATE SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at
            RETURNING *
            "#,
        )
        .bind(phone)
        .bind(code)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;
        Ok(pending)
    }

    /// Consume a still-valid code in one atomic statement.
    ///
    /// Returns false when no matching unexpired row exists, which covers both
    /// "never issued" and "a concurrent request consumed it first". The
    /// single-row delete is the arbiter that at most one verification
    /// succeeds per issued code.
    pub async fn consume(phone: &str, code: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM pending_otps WHERE phone = $1 AND code = $2 AND expires_at > $3",
        )
        .bind(phone)
        .bind(code)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
