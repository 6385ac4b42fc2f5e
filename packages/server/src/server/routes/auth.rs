//! Auth endpoints: OTP issue/verify, password register/login, coverage check

use axum::{extract::Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domains::auth::actions;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterPasswordRequest {
    pub phone: String,
    pub name: String,
    pub age: i32,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPasswordRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckLocationRequest {
    pub location: String,
}

/// POST /api/auth/send-otp
pub async fn send_otp_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<Value>, ApiError> {
    let sent = actions::send_otp(&req.phone, &state.deps).await?;
    Ok(Json(json!({ "success": true, "message": sent.message })))
}

/// POST /api/auth/verify-otp
pub async fn verify_otp_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = actions::verify_otp(&req.phone, &req.otp, &state.deps).await?;
    Ok(Json(json!({
        "success": true,
        "message": session.message,
        "user": session.user,
        "token": session.token,
    })))
}

/// POST /api/auth/register-password
pub async fn register_password_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<RegisterPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let session =
        actions::register_with_password(&req.phone, &req.name, req.age, &req.password, &state.deps)
            .await?;
    Ok(Json(json!({
        "success": true,
        "message": session.message,
        "user": session.user,
        "token": session.token,
    })))
}

/// POST /api/auth/login-password
pub async fn login_password_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<LoginPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = actions::login_with_password(&req.phone, &req.password, &state.deps).await?;
    Ok(Json(json!({
        "success": true,
        "message": session.message,
        "user": session.user,
        "token": session.token,
    })))
}

/// POST /api/auth/check-location
pub async fn check_location_handler(
    Json(req): Json<CheckLocationRequest>,
) -> Result<Json<Value>, ApiError> {
    let coverage = actions::check_location(&req.location).await?;
    Ok(Json(serde_json::to_value(coverage).unwrap_or_default()))
}
