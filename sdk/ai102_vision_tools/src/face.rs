//! Face detection client for the Face v1.0 API.
//!
//! Detection locates faces and can return landmarks and a limited set of
//! attributes. Identification-related attributes (age, gender, emotion) are
//! gated behind Microsoft's Limited Access policy and are not requested here.

use ai102_vision_core::client::VisionClient;
use ai102_vision_core::error::{VisionError, VisionResult};
use bytes::Bytes;
use serde::Deserialize;

use crate::models::{ImagePoint, FACE_DETECT_PATH};

/// Default detection model: the most accurate, supports attributes and landmarks.
pub const DETECTION_03: &str = "detection_03";

/// Detection model without landmark or attribute support.
pub const DETECTION_02: &str = "detection_02";

/// Default recognition model.
pub const RECOGNITION_04: &str = "recognition_04";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A face attribute that detection can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceAttributeType {
    Glasses,
    HeadPose,
    Blur,
    Exposure,
    Noise,
    Occlusion,
    Mask,
    QualityForRecognition,
}

impl FaceAttributeType {
    /// Returns the query-string representation of this attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Glasses => "glasses",
            Self::HeadPose => "headPose",
            Self::Blur => "blur",
            Self::Exposure => "exposure",
            Self::Noise => "noise",
            Self::Occlusion => "occlusion",
            Self::Mask => "mask",
            Self::QualityForRecognition => "qualityForRecognition",
        }
    }
}

/// A request to detect faces in an image.
#[derive(Debug, Clone)]
pub struct FaceDetectionRequest {
    image: Bytes,
    detection_model: String,
    recognition_model: String,
    return_face_id: bool,
    return_landmarks: bool,
    attributes: Vec<FaceAttributeType>,
}

impl FaceDetectionRequest {
    /// Creates a new builder for a face detection request.
    pub fn builder() -> FaceDetectionRequestBuilder {
        FaceDetectionRequestBuilder::default()
    }

    /// Returns the attributes as a comma-separated query parameter value.
    pub(crate) fn attributes_query_param(&self) -> String {
        self.attributes
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Builds the full query string for the API request.
    pub(crate) fn query_string(&self) -> String {
        let mut params = format!(
            "detectionModel={}&recognitionModel={}&returnFaceId={}&returnFaceLandmarks={}",
            self.detection_model, self.recognition_model, self.return_face_id, self.return_landmarks,
        );
        if !self.attributes.is_empty() {
            params.push_str(&format!(
                "&returnFaceAttributes={}",
                self.attributes_query_param()
            ));
        }
        params
    }
}

/// Builder for [`FaceDetectionRequest`].
#[derive(Debug, Default)]
pub struct FaceDetectionRequestBuilder {
    image: Option<Bytes>,
    detection_model: Option<String>,
    recognition_model: Option<String>,
    return_face_id: bool,
    return_landmarks: bool,
    attributes: Vec<FaceAttributeType>,
}

impl FaceDetectionRequestBuilder {
    /// Sets the image bytes (required).
    pub fn image(mut self, image: impl Into<Bytes>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the detection model. Defaults to [`DETECTION_03`].
    pub fn detection_model(mut self, model: impl Into<String>) -> Self {
        self.detection_model = Some(model.into());
        self
    }

    /// Sets the recognition model. Defaults to [`RECOGNITION_04`].
    pub fn recognition_model(mut self, model: impl Into<String>) -> Self {
        self.recognition_model = Some(model.into());
        self
    }

    /// Whether to return face ids. Off by default; ids require Limited Access approval.
    pub fn return_face_id(mut self, value: bool) -> Self {
        self.return_face_id = value;
        self
    }

    /// Whether to return the 27-point landmarks.
    pub fn return_landmarks(mut self, value: bool) -> Self {
        self.return_landmarks = value;
        self
    }

    /// Sets the attributes to return.
    pub fn attributes(mut self, attributes: Vec<FaceAttributeType>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Builder`] if:
    /// - `image` is missing or empty
    /// - [`DETECTION_02`] is combined with landmarks or attributes
    pub fn build(self) -> VisionResult<FaceDetectionRequest> {
        let image = self
            .image
            .filter(|i| !i.is_empty())
            .ok_or_else(|| VisionError::Builder("image is required".into()))?;

        let detection_model = self
            .detection_model
            .unwrap_or_else(|| DETECTION_03.to_string());

        if detection_model == DETECTION_02 && (self.return_landmarks || !self.attributes.is_empty())
        {
            return Err(VisionError::Builder(
                "detection_02 does not support landmarks or attributes".into(),
            ));
        }

        Ok(FaceDetectionRequest {
            image,
            detection_model,
            recognition_model: self
                .recognition_model
                .unwrap_or_else(|| RECOGNITION_04.to_string()),
            return_face_id: self.return_face_id,
            return_landmarks: self.return_landmarks,
            attributes: self.attributes,
        })
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A face found in the image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFace {
    /// Present only when face ids were requested.
    pub face_id: Option<String>,
    /// Location of the face.
    pub face_rectangle: FaceRectangle,
    /// Facial landmarks, when requested.
    pub face_landmarks: Option<FaceLandmarks>,
    /// Requested attributes.
    pub face_attributes: Option<FaceAttributes>,
}

/// The face bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FaceRectangle {
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
}

/// Facial landmark points.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceLandmarks {
    pub pupil_left: ImagePoint,
    pub pupil_right: ImagePoint,
    pub nose_tip: ImagePoint,
    pub mouth_left: ImagePoint,
    pub mouth_right: ImagePoint,
    pub eyebrow_left_outer: Option<ImagePoint>,
    pub eyebrow_left_inner: Option<ImagePoint>,
    pub eyebrow_right_outer: Option<ImagePoint>,
    pub eyebrow_right_inner: Option<ImagePoint>,
    pub upper_lip_top: Option<ImagePoint>,
    pub under_lip_bottom: Option<ImagePoint>,
}

/// Face attributes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAttributes {
    pub glasses: Option<GlassesType>,
    pub head_pose: Option<HeadPose>,
}

/// Kind of glasses on the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum GlassesType {
    NoGlasses,
    ReadingGlasses,
    Sunglasses,
    SwimmingGoggles,
}

impl std::fmt::Display for GlassesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoGlasses => "NoGlasses",
            Self::ReadingGlasses => "ReadingGlasses",
            Self::Sunglasses => "Sunglasses",
            Self::SwimmingGoggles => "SwimmingGoggles",
        };
        f.write_str(s)
    }
}

/// Head orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HeadPose {
    pub pitch: f64,
    pub roll: f64,
    /// Left/right turn.
    pub yaw: f64,
}

// ---------------------------------------------------------------------------
// API functions
// ---------------------------------------------------------------------------

/// Detect faces in an image.
///
/// # Tracing
///
/// Emits a span named `vision::face::detect` with field `detection_model`.
#[tracing::instrument(
    name = "vision::face::detect",
    skip(client, request),
    fields(detection_model = %request.detection_model)
)]
pub async fn detect(
    client: &VisionClient,
    request: &FaceDetectionRequest,
) -> VisionResult<Vec<DetectedFace>> {
    tracing::debug!(bytes = request.image.len(), "detecting faces");

    let path = format!("{FACE_DETECT_PATH}?{}", request.query_string());
    let response = client.post_binary(&path, request.image.clone()).await?;
    let faces = response.json::<Vec<DetectedFace>>().await?;

    tracing::debug!(faces = faces.len(), "face detection complete");
    Ok(faces)
}
