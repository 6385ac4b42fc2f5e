use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Role of an account within the care network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Subscriber,
    Beneficiary,
    CareCompanion,
    FieldManager,
    OperationsManager,
    EmergencyCoordinator,
    Volunteer,
}

/// User - one account per phone number
///
/// The phone number is the natural key: OTP login creates the row lazily on
/// first successful verification and reuses it afterwards. `password` is only
/// set for accounts created through the password registration path.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub phone: String,
    pub name: String,
    pub age: Option<i32>,
    pub password: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Client-facing projection of a user (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub phone: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub role: UserRole,
    pub is_active: bool,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
            name: user.name,
            age: user.age,
            role: user.role,
            is_active: user.is_active,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Find a user by phone number
    pub async fn find_by_phone(phone: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by id
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Create a user with the default subscriber role.
    ///
    /// Used by OTP login for first-time phones. Relies on the unique index on
    /// `phone` to prevent duplicate identities under concurrent verification.
    pub async fn create(phone: &str, name: &str, pool: &PgPool) -> Result<Self> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, phone, name, role)
            VALUES ($1, $2, $3, 'subscriber')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(phone)
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Create a user through the password registration path
    pub async fn create_with_password(
        phone: &str,
        name: &str,
        age: i32,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, phone, name, age, password, role)
            VALUES ($1, $2, $3, $4, $5, 'subscriber')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(phone)
        .bind(name)
        .bind(age)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }
}
