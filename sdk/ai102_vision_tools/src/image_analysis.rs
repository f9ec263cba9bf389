//! Image Analysis client for the Computer Vision v3.2 API.
//!
//! Sends a local image as raw bytes to `/vision/v3.2/analyze` and returns
//! captions, tags, objects, categories and content flags.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ai102_vision_core::auth::SubscriptionKey;
//! use ai102_vision_core::client::VisionClient;
//! use ai102_vision_tools::image_analysis::{self, ImageAnalysisRequest, VisualFeature};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VisionClient::builder()
//!     .endpoint("https://your-resource.cognitiveservices.azure.com")
//!     .credential(SubscriptionKey::new("your-key"))
//!     .build()?;
//!
//! let image = std::fs::read("images/street.jpg")?;
//! let request = ImageAnalysisRequest::builder()
//!     .image(image)
//!     .features(vec![VisualFeature::Description, VisualFeature::Tags])
//!     .build()?;
//!
//! let analysis = image_analysis::analyze(&client, &request).await?;
//! if let Some(caption) = analysis.caption() {
//!     println!("Caption: {} ({:.1}%)", caption.text, caption.confidence * 100.0);
//! }
//! # Ok(())
//! # }
//! ```

use ai102_vision_core::client::VisionClient;
use ai102_vision_core::error::{VisionError, VisionResult};
use bytes::Bytes;
use serde::Deserialize;

use crate::models::{BoundingRect, ImageMetadata, IMAGE_ANALYSIS_PATH};

/// Languages the v3.2 analyze operation can answer in.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "es", "ja", "pt", "zh"];

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A visual feature to extract from the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualFeature {
    /// Classify the image into a category taxonomy.
    Categories,
    /// Generate captions and description tags.
    Description,
    /// Detect and locate objects.
    Objects,
    /// Detect content tags.
    Tags,
    /// Flag adult, racy and gory content.
    Adult,
    /// Detect brand logos.
    Brands,
    /// Determine accent and dominant colors.
    Color,
    /// Detect whether the image is clip art or a line drawing.
    ImageType,
}

impl VisualFeature {
    /// Returns the query-string representation of this feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Categories => "Categories",
            Self::Description => "Description",
            Self::Objects => "Objects",
            Self::Tags => "Tags",
            Self::Adult => "Adult",
            Self::Brands => "Brands",
            Self::Color => "Color",
            Self::ImageType => "ImageType",
        }
    }
}

/// A request to analyze an image.
#[derive(Debug, Clone)]
pub struct ImageAnalysisRequest {
    image: Bytes,
    features: Vec<VisualFeature>,
    language: Option<String>,
    model_version: Option<String>,
}

impl ImageAnalysisRequest {
    /// Creates a new builder for an image analysis request.
    pub fn builder() -> ImageAnalysisRequestBuilder {
        ImageAnalysisRequestBuilder::default()
    }

    /// Returns the image payload.
    pub fn image(&self) -> &Bytes {
        &self.image
    }

    /// Returns the features as a comma-separated query parameter value.
    pub(crate) fn features_query_param(&self) -> String {
        self.features
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Builds the full query string for the API request.
    pub(crate) fn query_string(&self) -> String {
        let mut params = format!("visualFeatures={}", self.features_query_param());

        if let Some(ref lang) = self.language {
            params.push_str(&format!("&language={lang}"));
        }
        if let Some(ref mv) = self.model_version {
            params.push_str(&format!("&model-version={mv}"));
        }

        params
    }
}

/// Builder for [`ImageAnalysisRequest`].
#[derive(Debug, Default)]
pub struct ImageAnalysisRequestBuilder {
    image: Option<Bytes>,
    features: Option<Vec<VisualFeature>>,
    language: Option<String>,
    model_version: Option<String>,
}

impl ImageAnalysisRequestBuilder {
    /// Sets the image bytes to analyze (required).
    pub fn image(mut self, image: impl Into<Bytes>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the visual features to extract (required, at least one).
    pub fn features(mut self, features: Vec<VisualFeature>) -> Self {
        self.features = Some(features);
        self
    }

    /// Sets the language for captions and tags.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the model version, e.g. `latest`.
    pub fn model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    /// Builds the request, validating all required fields.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Builder`] if:
    /// - `image` is missing or empty
    /// - `features` is missing or empty
    /// - `language` is not one of [`SUPPORTED_LANGUAGES`]
    pub fn build(self) -> VisionResult<ImageAnalysisRequest> {
        let image = self
            .image
            .filter(|i| !i.is_empty())
            .ok_or_else(|| VisionError::Builder("image is required".into()))?;

        let features = self
            .features
            .filter(|f| !f.is_empty())
            .ok_or_else(|| VisionError::Builder("features is required (at least one)".into()))?;

        if let Some(ref lang) = self.language {
            if !SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
                return Err(VisionError::Builder(format!(
                    "language {lang} is not supported by image analysis"
                )));
            }
        }

        Ok(ImageAnalysisRequest {
            image,
            features,
            language: self.language,
            model_version: self.model_version,
        })
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The result of an image analysis request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    /// Categories from the 86-category taxonomy.
    #[serde(default)]
    pub categories: Vec<ImageCategory>,

    /// Captions and description tags.
    pub description: Option<ImageDescription>,

    /// Content tags, highest confidence first.
    #[serde(default)]
    pub tags: Vec<ImageTag>,

    /// Detected objects with locations.
    #[serde(default)]
    pub objects: Vec<DetectedObject>,

    /// Adult, racy and gory content flags.
    pub adult: Option<AdultInfo>,

    /// Service-assigned request identifier.
    pub request_id: Option<String>,

    /// Image dimensions and format.
    pub metadata: Option<ImageMetadata>,

    /// The model version used for analysis.
    pub model_version: Option<String>,
}

impl ImageAnalysis {
    /// The highest-ranked caption, if the description feature was requested.
    pub fn caption(&self) -> Option<&ImageCaption> {
        self.description.as_ref()?.captions.first()
    }

    /// Number of detected objects whose name mentions a person.
    pub fn people_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| o.object.to_lowercase().contains("person"))
            .count()
    }
}

/// A category assigned to the image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageCategory {
    /// Category name, e.g. `outdoor_road`.
    pub name: String,
    /// Score (0.0 to 1.0).
    pub score: f64,
}

/// Captions and free-form tags describing the image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDescription {
    /// Description tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Candidate captions, best first.
    #[serde(default)]
    pub captions: Vec<ImageCaption>,
}

/// A natural-language caption for the image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageCaption {
    /// The caption text.
    pub text: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
}

/// A content tag assigned to the image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageTag {
    /// Tag name.
    pub name: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
}

/// A detected object in the image.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectedObject {
    /// Location of the object.
    pub rectangle: BoundingRect,
    /// Object name, e.g. `person`.
    pub object: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
    /// Broader object class, e.g. `Land vehicle` for `taxi`.
    pub parent: Option<ObjectHierarchy>,
}

/// A node in the object hierarchy.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectHierarchy {
    /// Object name.
    pub object: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
    /// Next broader class.
    pub parent: Option<Box<ObjectHierarchy>>,
}

/// Content flags for the image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdultInfo {
    pub is_adult_content: bool,
    pub is_racy_content: bool,
    pub is_gory_content: bool,
    pub adult_score: f64,
    pub racy_score: f64,
    pub gore_score: f64,
}

// ---------------------------------------------------------------------------
// API functions
// ---------------------------------------------------------------------------

/// Analyze an image using the Computer Vision v3.2 API.
///
/// # Tracing
///
/// Emits a span named `vision::image_analysis::analyze` with field `features`.
#[tracing::instrument(
    name = "vision::image_analysis::analyze",
    skip(client, request),
    fields(features = %request.features_query_param())
)]
pub async fn analyze(
    client: &VisionClient,
    request: &ImageAnalysisRequest,
) -> VisionResult<ImageAnalysis> {
    tracing::debug!(bytes = request.image.len(), "analyzing image");

    let path = format!("{IMAGE_ANALYSIS_PATH}?{}", request.query_string());
    let response = client.post_binary(&path, request.image.clone()).await?;
    let result = response.json::<ImageAnalysis>().await?;

    tracing::debug!(
        tags = result.tags.len(),
        objects = result.objects.len(),
        "image analysis complete"
    );
    Ok(result)
}
