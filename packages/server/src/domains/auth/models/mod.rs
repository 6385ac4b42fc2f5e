mod pending_otp;

pub use pending_otp::PendingOtp;
