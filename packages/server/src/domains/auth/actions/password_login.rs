//! Password registration and login actions

use tracing::info;

use crate::domains::auth::password::{hash_password, verify_password};
use crate::domains::auth::types::AuthSession;
use crate::domains::auth::AuthError;
use crate::domains::user::User;
use crate::kernel::ServerDeps;

/// Register a new account with a password.
///
/// The phone number stays the natural key: registration fails if any account
/// (OTP-created included) already holds it.
pub async fn register_with_password(
    phone: &str,
    name: &str,
    age: i32,
    password: &str,
    deps: &ServerDeps,
) -> Result<AuthSession, AuthError> {
    if phone.trim().is_empty() || name.trim().is_empty() {
        return Err(AuthError::InvalidInput(
            "Phone number and name are required.".to_string(),
        ));
    }
    if !(18..=120).contains(&age) {
        return Err(AuthError::InvalidInput(
            "Age must be between 18 and 120.".to_string(),
        ));
    }
    if password.len() < 6 {
        return Err(AuthError::InvalidInput(
            "Password must be at least 6 characters.".to_string(),
        ));
    }

    if User::find_by_phone(phone, &deps.db_pool).await?.is_some() {
        return Err(AuthError::PhoneAlreadyRegistered);
    }

    let password_hash = hash_password(password)?;
    let user = User::create_with_password(phone, name, age, &password_hash, &deps.db_pool).await?;
    info!(user_id = %user.id, "Registered user with password");

    let token = deps.jwt_service.create_token(user.id, user.role)?;

    Ok(AuthSession {
        message: "Registration successful".to_string(),
        user: user.into(),
        token,
    })
}

/// Log in with phone and password.
///
/// Unknown phone, passwordless account and wrong password all collapse into
/// the same error so the response does not reveal which phones exist.
pub async fn login_with_password(
    phone: &str,
    password: &str,
    deps: &ServerDeps,
) -> Result<AuthSession, AuthError> {
    let user = User::find_by_phone(phone, &deps.db_pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let hash = user.password.as_deref().ok_or(AuthError::InvalidCredentials)?;
    if !verify_password(password, hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    let token = deps.jwt_service.create_token(user.id, user.role)?;
    info!(user_id = %user.id, "Password login");

    Ok(AuthSession {
        message: "Login successful".to_string(),
        user: user.into(),
        token,
    })
}
