//! Shared types for the Computer Vision and Face services.
//!
//! This module contains common types and constants used across the tools crate.

use serde::Deserialize;

/// API path for Computer Vision v3.2 image analysis.
pub(crate) const IMAGE_ANALYSIS_PATH: &str = "/vision/v3.2/analyze";

/// API path for submitting a Computer Vision v3.2 Read operation.
pub(crate) const READ_ANALYZE_PATH: &str = "/vision/v3.2/read/analyze";

/// API path for Face v1.0 detection.
pub(crate) const FACE_DETECT_PATH: &str = "/face/v1.0/detect";

/// An axis-aligned rectangle as returned by Computer Vision (`x`, `y`, `w`, `h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoundingRect {
    /// X-coordinate of the top-left corner.
    pub x: u32,
    /// Y-coordinate of the top-left corner.
    pub y: u32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

/// Metadata about the analyzed image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageMetadata {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Image format, e.g. `Jpeg`.
    pub format: Option<String>,
}

/// A point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ImagePoint {
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}
