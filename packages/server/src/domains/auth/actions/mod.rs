//! Auth domain actions - business logic functions
//!
//! Actions take their dependencies explicitly via `ServerDeps` and return
//! domain results; HTTP route handlers call them and map errors to the
//! failure envelope.

mod check_location;
mod password_login;
mod send_otp;
mod verify_otp;

pub use check_location::check_location;
pub use password_login::{login_with_password, register_with_password};
pub use send_otp::send_otp;
pub use verify_otp::verify_otp;
