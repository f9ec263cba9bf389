#![doc = include_str!("../README.md")]

pub mod face;
pub mod image_analysis;
pub mod models;
pub mod read;

/// Test utilities shared across modules.
#[cfg(test)]
pub(crate) mod test_utils {
    pub use ai102_vision_core::test_support::setup_mock_client;
}
