// Sahay - elder-care coordination API core
//
// This crate provides the backend API for phone-first authentication:
// OTP issuance and verification (Twilio Verify or a local dev fallback),
// the parallel password login path, and JWT session credentials.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
