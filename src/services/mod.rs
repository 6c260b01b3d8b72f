pub mod email;
pub mod jwt;
pub mod otp;

pub use email::EmailService;
pub use jwt::JwtService;
pub use otp::{OtpStore, OtpVerifyError};
