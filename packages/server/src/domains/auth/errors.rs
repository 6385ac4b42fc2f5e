use thiserror::Error;

/// Authentication failures surfaced to clients.
///
/// Display text doubles as the client-facing message for every variant except
/// `Database` and `Internal`, which are logged and replaced with a generic
/// message at the HTTP boundary.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid OTP format. Must be 6 digits.")]
    InvalidOtpFormat,

    #[error("Failed to send OTP: {0}")]
    Delivery(String),

    #[error("No OTP requested for this number.")]
    OtpNotRequested,

    #[error("Incorrect OTP code entered.")]
    OtpMismatch,

    #[error("OTP has expired.")]
    OtpExpired,

    // Provider-side detail is logged, never surfaced
    #[error("Invalid or expired OTP.")]
    ProviderRejected,

    #[error("A user with this phone number already exists.")]
    PhoneAlreadyRegistered,

    #[error("Invalid phone number or password.")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
