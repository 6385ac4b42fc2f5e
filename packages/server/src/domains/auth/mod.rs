// Auth domain - OTP login, password login, session tokens

pub mod actions;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod otp;
pub mod password;
pub mod types;

pub use errors::AuthError;
pub use jwt::{Claims, JwtService};
