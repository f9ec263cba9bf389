//! Demo configuration, read from the process environment.
//!
//! The binary loads `.env` first, so every variable below can live there.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;

/// Computer Vision endpoint, used by image analysis and OCR.
pub const COMPUTER_VISION_ENDPOINT: &str = "COMPUTER_VISION_ENDPOINT";
/// Computer Vision subscription key.
pub const COMPUTER_VISION_KEY: &str = "COMPUTER_VISION_KEY";
/// Face endpoint.
pub const FACE_ENDPOINT: &str = "FACE_ENDPOINT";
/// Face subscription key.
pub const FACE_KEY: &str = "FACE_KEY";
/// Overrides the directory the sample images are read from.
pub const IMAGES_DIR: &str = "VISION_DEMO_IMAGES_DIR";

/// Default sample image directory, relative to the working directory.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Interval between Read operation status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// An endpoint and key for one Azure resource.
#[derive(Clone)]
pub struct ServiceCredentials {
    pub endpoint: String,
    pub key: SecretString,
}

impl ServiceCredentials {
    /// Read a credential pair through `lookup`.
    ///
    /// Returns `None` unless both variables are set and non-empty.
    pub fn from_lookup<F>(lookup: &F, endpoint_var: &str, key_var: &str) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(endpoint_var).filter(|v| !v.is_empty())?;
        let key = lookup(key_var).filter(|v| !v.is_empty())?;
        Some(Self {
            endpoint,
            key: SecretString::from(key),
        })
    }
}

impl std::fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("endpoint", &self.endpoint)
            .field("key", &"****")
            .finish()
    }
}

/// Everything the demo reads from its environment.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Credentials for image analysis and OCR.
    pub computer_vision: Option<ServiceCredentials>,
    /// Credentials for face detection.
    pub face: Option<ServiceCredentials>,
    /// Directory holding `street.jpg`, `Business-card.jpg` and `people.jpg`.
    pub images_dir: PathBuf,
    /// Sleep between OCR status polls.
    pub poll_interval: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            computer_vision: None,
            face: None,
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl DemoConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            computer_vision: ServiceCredentials::from_lookup(
                &lookup,
                COMPUTER_VISION_ENDPOINT,
                COMPUTER_VISION_KEY,
            ),
            face: ServiceCredentials::from_lookup(&lookup, FACE_ENDPOINT, FACE_KEY),
            images_dir: lookup(IMAGES_DIR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR)),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Path of a sample image.
    pub fn image_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.images_dir.join(file_name)
    }
}
