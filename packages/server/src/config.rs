use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use twilio::TwilioOptions;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expires_hours: i64,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_verify_service_sid: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "sahay-api".to_string()),
            jwt_expires_hours: env::var("JWT_EXPIRES_HOURS")
                .unwrap_or_else(|_| "168".to_string())
                .parse()
                .context("JWT_EXPIRES_HOURS must be a valid number")?,
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").ok(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").ok(),
            twilio_verify_service_sid: env::var("TWILIO_VERIFY_SERVICE_SID").ok(),
        })
    }

    /// Resolve Twilio Verify credentials, if usable ones are configured.
    ///
    /// Returns `Some` only when all three values are present, non-empty, and
    /// the account SID carries the "AC" prefix Twilio issues. Placeholder
    /// values from a template .env therefore fall through to the local OTP
    /// fallback instead of producing doomed API calls. This is the single
    /// switch between the two OTP strategies, evaluated once at startup.
    pub fn twilio_options(&self) -> Option<TwilioOptions> {
        let account_sid = self.twilio_account_sid.as_deref()?;
        let auth_token = self.twilio_auth_token.as_deref()?;
        let service_id = self.twilio_verify_service_sid.as_deref()?;

        if !account_sid.starts_with("AC") || auth_token.is_empty() || service_id.is_empty() {
            return None;
        }

        Some(TwilioOptions {
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            service_id: service_id.to_string(),
        })
    }
}
