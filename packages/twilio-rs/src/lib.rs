//! Minimal Twilio Verify v2 client.
//!
//! Covers exactly the two calls the auth flow needs: starting a verification
//! (Twilio generates, stores and delivers the code) and checking a submitted
//! code against it.

use std::collections::HashMap;

pub mod models;

use reqwest::{header, Client};

use crate::models::{VerificationCheck, VerificationStart};

#[derive(Debug, thiserror::Error)]
pub enum TwilioError {
    #[error("request to Twilio failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Twilio returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("verification not approved (status: {status})")]
    NotApproved { status: String },
}

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub service_id: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    client: Client,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    fn form_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "Content-Type",
            header::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers
    }

    /// Start a verification for the recipient over SMS.
    ///
    /// Twilio owns code generation, storage and TTL; nothing is persisted
    /// locally. Returns the verification status Twilio reported ("pending"
    /// on a fresh send).
    pub async fn start_verification(&self, recipient: &str) -> Result<VerificationStart, TwilioError> {
        let url = format!(
            "https://verify.twilio.com/v2/Services/{}/Verifications",
            self.options.service_id
        );

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", recipient);
        form_body.insert("Channel", "sms");

        let response = self
            .client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .headers(Self::form_headers())
            .form(&form_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<VerificationStart>().await?)
    }

    /// Check a submitted code against an outstanding verification.
    ///
    /// Succeeds only when Twilio reports the check as "approved"; Twilio
    /// consumes the code on approval.
    pub async fn check_verification(&self, recipient: &str, code: &str) -> Result<(), TwilioError> {
        let url = format!(
            "https://verify.twilio.com/v2/Services/{}/VerificationCheck",
            self.options.service_id
        );

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", recipient);
        form_body.insert("Code", code);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .headers(Self::form_headers())
            .form(&form_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let check = response.json::<VerificationCheck>().await?;
        if check.status == "approved" {
            Ok(())
        } else {
            Err(TwilioError::NotApproved {
                status: check.status,
            })
        }
    }
}
