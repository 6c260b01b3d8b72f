pub mod application;
pub mod auth;
pub mod candidate;
pub mod job;
pub mod review;
pub mod search;
