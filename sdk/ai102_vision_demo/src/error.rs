use std::path::PathBuf;

use ai102_vision_core::VisionError;
use thiserror::Error;

/// Why a live feature call fell back to its sample transcript.
#[derive(Error, Debug)]
pub enum DemoError {
    /// The fixed sample image is not on disk.
    #[error("Image file not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    /// The sample image exists but could not be read.
    #[error("could not read {}: {source}", path.display())]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The service call failed (network, auth, quota, service error).
    #[error("{0}")]
    Service(VisionError),

    /// A remote operation finished without succeeding.
    #[error("{operation} failed with status: {status}")]
    OperationFailed {
        operation: &'static str,
        status: String,
    },

    /// The service answered with a shape the demo cannot display.
    #[error("unrecognized response: {0}")]
    UnrecognizedResult(String),
}

impl DemoError {
    /// Classify a service error, separating undecodable bodies from call failures.
    pub fn from_service(err: VisionError) -> Self {
        if err.is_decode() {
            Self::UnrecognizedResult(err.to_string())
        } else {
            Self::Service(err)
        }
    }

    /// The console line printed before the fallback transcript.
    ///
    /// `service` names the API in the generic form, e.g. `Face API`.
    pub fn diagnostic(&self, service: &str) -> String {
        match self {
            Self::ImageNotFound { .. } | Self::OperationFailed { .. } => format!("❌ {self}"),
            _ => format!("❌ {service} Error: {self}"),
        }
    }
}
