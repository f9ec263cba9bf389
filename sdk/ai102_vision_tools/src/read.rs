//! Read (OCR) client for the Computer Vision v3.2 API.
//!
//! Text extraction is asynchronous: [`submit`] uploads the image and the
//! service answers `202 Accepted` with an `Operation-Location` header. The
//! client then polls that URL with [`get_result`] or [`poll_until_complete`]
//! until the operation reaches a terminal status.
//!
//! ```rust,no_run
//! # use ai102_vision_core::client::VisionClient;
//! # use ai102_vision_tools::read::{self, ReadOperationStatus};
//! # async fn example(client: &VisionClient) -> ai102_vision_core::error::VisionResult<()> {
//! let image = bytes::Bytes::from_static(b"...");
//! let operation = read::submit(client, image, None).await?;
//! let result = read::poll_until_complete(
//!     client,
//!     &operation.operation_location,
//!     std::time::Duration::from_secs(1),
//!     0,
//! ).await?;
//!
//! if result.status == ReadOperationStatus::Succeeded {
//!     for line in result.lines() {
//!         println!("{}", line.text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use ai102_vision_core::client::VisionClient;
use ai102_vision_core::error::{VisionError, VisionResult};
use bytes::Bytes;
use serde::Deserialize;

use crate::models::READ_ANALYZE_PATH;

/// Confidence reported for a line that carries no word-level scores.
pub const DEFAULT_LINE_CONFIDENCE: f64 = 0.95;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The status of an asynchronous Read operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadOperationStatus {
    /// The operation has not started.
    NotStarted,
    /// The operation is in progress.
    Running,
    /// The operation completed successfully.
    Succeeded,
    /// The operation failed.
    Failed,
}

impl ReadOperationStatus {
    /// Returns `true` if the status is terminal (succeeded or failed).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for ReadOperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotStarted => "notStarted",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// The body returned when polling a Read operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOperationResult {
    /// Current status of the operation.
    pub status: ReadOperationStatus,

    /// When the operation was created.
    pub created_date_time: Option<String>,

    /// When the status last changed.
    pub last_updated_date_time: Option<String>,

    /// The extracted text, present when status is `Succeeded`.
    pub analyze_result: Option<ReadAnalyzeResult>,
}

impl ReadOperationResult {
    /// All text lines across all pages, in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.analyze_result
            .iter()
            .flat_map(|r| r.read_results.iter())
            .flat_map(|page| page.lines.iter())
    }
}

/// The analysis payload of a finished Read operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadAnalyzeResult {
    /// Schema version of the result.
    pub version: Option<String>,
    /// Model version used for recognition.
    pub model_version: Option<String>,
    /// One entry per page of the input.
    #[serde(default)]
    pub read_results: Vec<ReadPage>,
}

/// Text recognized on one page.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadPage {
    /// 1-based page number.
    pub page: u32,
    /// Rotation of the page in degrees.
    #[serde(default)]
    pub angle: f64,
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
    /// Unit of `width` and `height`, e.g. `pixel`.
    pub unit: Option<String>,
    /// Recognized lines.
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

/// A recognized line of text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    /// The line text.
    pub text: String,
    /// Quadrilateral as eight numbers: four (x, y) corners clockwise from top-left.
    #[serde(default)]
    pub bounding_box: Vec<f64>,
    /// Individual words in the line.
    #[serde(default)]
    pub words: Vec<TextWord>,
}

impl TextLine {
    /// Mean word confidence, or [`DEFAULT_LINE_CONFIDENCE`] for a line without words.
    pub fn confidence(&self) -> f64 {
        if self.words.is_empty() {
            return DEFAULT_LINE_CONFIDENCE;
        }
        self.words.iter().map(|w| w.confidence).sum::<f64>() / self.words.len() as f64
    }
}

/// A recognized word.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextWord {
    /// The word text.
    pub text: String,
    /// Quadrilateral as eight numbers.
    #[serde(default)]
    pub bounding_box: Vec<f64>,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
}

/// A submitted Read operation.
#[derive(Debug, Clone)]
pub struct ReadOperation {
    /// The URL to poll for the result.
    pub operation_location: String,
}

impl ReadOperation {
    /// The operation id, the last path segment of the `Operation-Location` URL.
    pub fn operation_id(&self) -> &str {
        self.operation_location
            .split('?')
            .next()
            .and_then(|path| path.rsplit('/').next())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// API functions
// ---------------------------------------------------------------------------

/// Submit an image for text extraction.
///
/// Returns a [`ReadOperation`] holding the `Operation-Location` URL to poll.
///
/// # Tracing
///
/// Emits a span named `vision::read::submit`.
#[tracing::instrument(name = "vision::read::submit", skip(client, image))]
pub async fn submit(
    client: &VisionClient,
    image: Bytes,
    language: Option<&str>,
) -> VisionResult<ReadOperation> {
    if image.is_empty() {
        return Err(VisionError::Builder("image is required".into()));
    }

    tracing::debug!(bytes = image.len(), "submitting image for text extraction");

    let path = match language {
        Some(lang) => format!("{READ_ANALYZE_PATH}?language={lang}"),
        None => READ_ANALYZE_PATH.to_string(),
    };
    let response = client.post_binary(&path, image).await?;

    let operation_location = response
        .headers()
        .get("Operation-Location")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| VisionError::Api {
            code: "MissingHeader".into(),
            message: "Operation-Location header missing from response".into(),
        })?;

    tracing::debug!(operation_location = %operation_location, "read operation submitted");

    Ok(ReadOperation { operation_location })
}

/// Fetch the current state of a Read operation.
///
/// # Tracing
///
/// Emits a span named `vision::read::get_result`.
#[tracing::instrument(
    name = "vision::read::get_result",
    skip(client),
    fields(operation_location = %operation_location)
)]
pub async fn get_result(
    client: &VisionClient,
    operation_location: &str,
) -> VisionResult<ReadOperationResult> {
    // The Operation-Location is a full URL. Keep only path + query so the
    // request goes through the client's endpoint and credential.
    let parsed = url::Url::parse(operation_location).map_err(|e| {
        VisionError::invalid_endpoint_with_source("failed to parse Operation-Location URL", e)
    })?;

    let relative_path = match parsed.query() {
        Some(q) => format!("{}?{q}", parsed.path()),
        None => parsed.path().to_string(),
    };

    let response = client.get(&relative_path).await?;
    let result = response.json::<ReadOperationResult>().await?;

    tracing::debug!(status = %result.status, "read result fetched");
    Ok(result)
}

/// Poll a Read operation until it reaches a terminal status.
///
/// Returns the final [`ReadOperationResult`] when the status is `succeeded`
/// or `failed`; the caller checks which. Between polls the task sleeps for
/// `poll_interval`.
///
/// `max_attempts` bounds the number of polls. `0` disables the limit, so
/// the loop runs until the service reports a terminal status.
///
/// # Errors
///
/// Returns [`VisionError::Api`] with code `PollTimeout` if `max_attempts`
/// is exceeded, or any error from [`get_result`].
///
/// # Tracing
///
/// Emits a span named `vision::read::poll_until_complete`.
#[tracing::instrument(
    name = "vision::read::poll_until_complete",
    skip(client),
    fields(operation_location = %operation_location)
)]
pub async fn poll_until_complete(
    client: &VisionClient,
    operation_location: &str,
    poll_interval: Duration,
    max_attempts: u32,
) -> VisionResult<ReadOperationResult> {
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        if max_attempts > 0 && attempts > max_attempts {
            return Err(VisionError::Api {
                code: "PollTimeout".into(),
                message: format!("poll_until_complete timed out after {max_attempts} max_attempts"),
            });
        }

        let result = get_result(client, operation_location).await?;

        if result.status.is_terminal() {
            tracing::debug!(status = %result.status, attempts, "read operation finished");
            return Ok(result);
        }

        tracing::trace!(status = %result.status, attempt = attempts, "read operation still in progress");
        tokio::time::sleep(poll_interval).await;
    }
}
