#![doc = include_str!("../README.md")]

pub mod auth;
pub mod client;
pub mod error;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use error::VisionError;
