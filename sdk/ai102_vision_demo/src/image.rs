//! Chapter 1: scene analysis of the lobby camera frame.

use std::io::{self, Write};
use std::path::PathBuf;

use ai102_vision_core::client::VisionClient;
use ai102_vision_tools::image_analysis::{self, ImageAnalysis, ImageAnalysisRequest, VisualFeature};

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::feature::{load_image, probe, probe_then_fallback, Feature};
use crate::transcripts;

/// Sample image analyzed by this chapter.
pub const IMAGE_FILE: &str = "street.jpg";

/// How many tags and objects the report lists.
const TOP_N: usize = 5;

pub const FEATURE: Feature = Feature {
    name: "image_analysis",
    service: "Computer Vision API",
    intro: transcripts::IMAGE_ANALYSIS_INTRO,
    live_notice: "",
    unavailable_notice: transcripts::COMPUTER_VISION_UNAVAILABLE,
    fallback: transcripts::IMAGE_ANALYSIS_FALLBACK,
    key_concepts: transcripts::IMAGE_ANALYSIS_KEY_CONCEPTS,
    after_fallback: transcripts::IMAGE_ANALYSIS_KEY_CONCEPTS,
};

/// Run the chapter against the Computer Vision credentials in `config`.
pub async fn run(out: &mut dyn Write, config: &DemoConfig) -> io::Result<()> {
    run_with(out, probe(config.computer_vision.as_ref()), config).await
}

pub(crate) async fn run_with(
    out: &mut dyn Write,
    client: Option<VisionClient>,
    config: &DemoConfig,
) -> io::Result<()> {
    let path = config.image_path(IMAGE_FILE);
    probe_then_fallback(out, &FEATURE, client, |client| analyze_street(client, path)).await
}

async fn analyze_street(client: VisionClient, path: PathBuf) -> Result<String, DemoError> {
    let image = load_image(&path).await?;
    let request = ImageAnalysisRequest::builder()
        .image(image)
        .features(vec![
            VisualFeature::Categories,
            VisualFeature::Description,
            VisualFeature::Objects,
            VisualFeature::Tags,
            VisualFeature::Adult,
        ])
        .build()
        .map_err(DemoError::from_service)?;
    let analysis = image_analysis::analyze(&client, &request)
        .await
        .map_err(DemoError::from_service)?;
    Ok(render(&analysis))
}

/// Render a live analysis the way the sample transcript is laid out.
pub fn render(analysis: &ImageAnalysis) -> String {
    let mut report = String::new();

    if let Some(caption) = analysis.caption() {
        report.push_str(&format!(
            "\n🏷️  CAPTION: '{}'\n   Confidence: {:.1}%\n",
            caption.text,
            caption.confidence * 100.0
        ));
    }

    if !analysis.tags.is_empty() {
        report.push_str("\n🏷️  TOP TAGS:\n");
        for tag in analysis.tags.iter().take(TOP_N) {
            report.push_str(&format!("   • {} ({:.1}%)\n", tag.name, tag.confidence * 100.0));
        }
    }

    if !analysis.objects.is_empty() {
        report.push_str(&format!("\n📦 OBJECTS: Found {}\n", analysis.objects.len()));
        for object in analysis.objects.iter().take(TOP_N) {
            report.push_str(&format!(
                "   • {} ({:.1}%)\n",
                object.object,
                object.confidence * 100.0
            ));
        }
    }

    report.push_str(&format!("\n👥 PEOPLE: Detected {}\n", analysis.people_count()));
    report.push_str("\n✅ Real Computer Vision API working!\n");
    report
}
