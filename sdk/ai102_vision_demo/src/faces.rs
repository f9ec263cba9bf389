//! Chapter 3: face detection for access control.

use std::io::{self, Write};
use std::path::PathBuf;

use ai102_vision_core::client::VisionClient;
use ai102_vision_tools::face::{
    self, DetectedFace, FaceAttributeType, FaceDetectionRequest, DETECTION_03, RECOGNITION_04,
};

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::feature::{load_image, probe, probe_then_fallback, Feature};
use crate::transcripts;

/// Sample image searched for faces.
pub const IMAGE_FILE: &str = "people.jpg";

pub const FEATURE: Feature = Feature {
    name: "faces",
    service: "Face API",
    intro: transcripts::FACE_INTRO,
    live_notice: transcripts::FACE_LIVE_NOTICE,
    unavailable_notice: transcripts::FACE_UNAVAILABLE,
    fallback: transcripts::FACE_FALLBACK,
    key_concepts: transcripts::FACE_KEY_CONCEPTS,
    after_fallback: "",
};

pub async fn run(out: &mut dyn Write, config: &DemoConfig) -> io::Result<()> {
    run_with(out, probe(config.face.as_ref()), config).await
}

pub(crate) async fn run_with(
    out: &mut dyn Write,
    client: Option<VisionClient>,
    config: &DemoConfig,
) -> io::Result<()> {
    let path = config.image_path(IMAGE_FILE);
    probe_then_fallback(out, &FEATURE, client, |client| detect_people(client, path)).await
}

async fn detect_people(client: VisionClient, path: PathBuf) -> Result<String, DemoError> {
    let image = load_image(&path).await?;
    let request = FaceDetectionRequest::builder()
        .image(image)
        .detection_model(DETECTION_03)
        .recognition_model(RECOGNITION_04)
        .return_face_id(false)
        .return_landmarks(true)
        .attributes(vec![FaceAttributeType::Glasses, FaceAttributeType::HeadPose])
        .build()
        .map_err(DemoError::from_service)?;
    let faces = face::detect(&client, &request)
        .await
        .map_err(DemoError::from_service)?;
    Ok(render(&faces))
}

/// Render detected faces: glasses, head yaw, rectangle, nose tip and pupils.
pub fn render(faces: &[DetectedFace]) -> String {
    let mut report = format!(
        "\n👤 FACE DETECTION RESULTS:\n   Faces detected: {}\n",
        faces.len()
    );

    for (i, detected) in faces.iter().enumerate() {
        report.push_str(&format!("   \n   Face {}:\n", i + 1));

        let attributes = detected.face_attributes.as_ref();
        let glasses = attributes
            .and_then(|a| a.glasses)
            .map_or_else(|| "unknown".to_string(), |g| g.to_string());
        report.push_str(&format!("   • Glasses: {glasses}\n"));
        if let Some(pose) = attributes.and_then(|a| a.head_pose) {
            report.push_str(&format!("   • Head Yaw: {:.1}° (left/right turn)\n", pose.yaw));
        }

        let rect = detected.face_rectangle;
        report.push_str(&format!(
            "   • Location: ({}, {}, {}, {})\n",
            rect.left, rect.top, rect.width, rect.height
        ));

        if let Some(landmarks) = &detected.face_landmarks {
            let nose = landmarks.nose_tip;
            let (left, right) = (landmarks.pupil_left, landmarks.pupil_right);
            report.push_str(&format!("   • Nose Tip: ({:.0}, {:.0})\n", nose.x, nose.y));
            report.push_str(&format!(
                "   • Eyes: Left({:.0}, {:.0}), Right({:.0}, {:.0})\n",
                left.x, left.y, right.x, right.y
            ));
        }
    }

    report.push_str("\n✅ Real Face API working!\n");
    report
}
