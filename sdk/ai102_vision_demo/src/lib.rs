#![doc = include_str!("../README.md")]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod faces;
pub mod feature;
pub mod image;
pub mod ocr;
pub mod transcripts;

pub use config::DemoConfig;
pub use dispatch::{run, Mode};
pub use error::DemoError;
