pub mod application;
pub mod candidate;
pub mod job;
pub mod otp;
pub mod review;
pub mod search;
pub mod user;

pub use application::*;
pub use candidate::*;
pub use job::*;
pub use otp::*;
pub use review::*;
pub use search::*;
pub use user::*;
