//! Chapter 2: reading the visitor badge with the asynchronous Read API.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use ai102_vision_core::client::VisionClient;
use ai102_vision_tools::read::{self, ReadOperationResult, ReadOperationStatus};

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::feature::{load_image, probe, probe_then_fallback, Feature, LiveOutcome};
use crate::transcripts;

/// Sample image read by this chapter.
pub const IMAGE_FILE: &str = "Business-card.jpg";

/// Lines listed in the report, counted across all pages.
pub const MAX_LINES: usize = 6;

const PROCESSING_LINE: &str = "   Processing text extraction...\n";

pub const FEATURE: Feature = Feature {
    name: "ocr",
    service: "OCR API",
    intro: transcripts::OCR_INTRO,
    live_notice: "",
    unavailable_notice: transcripts::COMPUTER_VISION_UNAVAILABLE,
    fallback: transcripts::OCR_FALLBACK,
    key_concepts: transcripts::OCR_KEY_CONCEPTS,
    after_fallback: transcripts::OCR_KEY_CONCEPTS,
};

pub async fn run(out: &mut dyn Write, config: &DemoConfig) -> io::Result<()> {
    run_with(out, probe(config.computer_vision.as_ref()), config).await
}

pub(crate) async fn run_with(
    out: &mut dyn Write,
    client: Option<VisionClient>,
    config: &DemoConfig,
) -> io::Result<()> {
    let path = config.image_path(IMAGE_FILE);
    let poll_interval = config.poll_interval;
    probe_then_fallback(out, &FEATURE, client, |client| async move {
        let mut output = String::new();
        let result = read_card(&client, &path, poll_interval, &mut output).await;
        LiveOutcome { output, result }
    })
    .await
}

/// Submit the card, poll it to completion and append the report to `output`.
///
/// The processing line is written once the image is accepted, so it also
/// precedes a failure diagnostic.
async fn read_card(
    client: &VisionClient,
    path: &Path,
    poll_interval: Duration,
    output: &mut String,
) -> Result<(), DemoError> {
    let image = load_image(path).await?;
    let operation = read::submit(client, image, None)
        .await
        .map_err(DemoError::from_service)?;

    tracing::debug!(operation_id = operation.operation_id(), "polling read operation");
    output.push_str(PROCESSING_LINE);
    let result = read::poll_until_complete(client, &operation.operation_location, poll_interval, 0)
        .await
        .map_err(DemoError::from_service)?;

    output.push_str(&render(&result)?);
    Ok(())
}

/// Render a finished Read operation.
///
/// Any terminal status other than `succeeded` is an
/// [`DemoError::OperationFailed`].
pub fn render(result: &ReadOperationResult) -> Result<String, DemoError> {
    if result.status != ReadOperationStatus::Succeeded {
        return Err(DemoError::OperationFailed {
            operation: "OCR",
            status: result.status.to_string(),
        });
    }

    let mut report = String::from("\n📝 EXTRACTED TEXT:\n");
    for (n, line) in result.lines().take(MAX_LINES).enumerate() {
        report.push_str(&format!(
            "   Line {}: '{}' (confidence: {:.1}%)\n",
            n + 1,
            line.text,
            line.confidence() * 100.0
        ));
    }
    report.push_str("\n✅ Real OCR API working!\n");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai102_vision_core::test_support::setup_mock_client;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const OPERATION_PATH: &str = "/vision/v3.2/read/analyzeResults/op-42";

    fn succeeded_json() -> serde_json::Value {
        let lines: Vec<_> = (1..=4)
            .map(|i| {
                serde_json::json!({
                    "boundingBox": [0, 0, 10, 0, 10, 5, 0, 5],
                    "text": format!("page one line {i}"),
                    "words": [{"boundingBox": [0, 0, 10, 0, 10, 5, 0, 5], "text": "w", "confidence": 0.99}]
                })
            })
            .collect();
        serde_json::json!({
            "status": "succeeded",
            "createdDateTime": "2024-05-01T10:00:00Z",
            "lastUpdatedDateTime": "2024-05-01T10:00:02Z",
            "analyzeResult": {
                "version": "3.2.0",
                "modelVersion": "2022-04-30",
                "readResults": [
                    {"page": 1, "angle": 0.0, "width": 600, "height": 400, "unit": "pixel", "lines": lines},
                    {"page": 2, "angle": 0.0, "width": 600, "height": 400, "unit": "pixel", "lines": [
                        {"boundingBox": [0, 0, 1, 0, 1, 1, 0, 1], "text": "Dr. Sarah Chen", "words": []},
                        {"boundingBox": [0, 0, 1, 0, 1, 1, 0, 1], "text": "Senior Data Scientist", "words": []},
                        {"boundingBox": [0, 0, 1, 0, 1, 1, 0, 1], "text": "Microsoft Corporation", "words": []}
                    ]}
                ]
            }
        })
    }

    fn config_with_image(dir: &tempfile::TempDir) -> DemoConfig {
        std::fs::write(dir.path().join(IMAGE_FILE), b"card-jpeg").expect("write fixture");
        DemoConfig {
            images_dir: dir.path().to_path_buf(),
            poll_interval: Duration::from_millis(10),
            ..DemoConfig::default()
        }
    }

    async fn mount_submit(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/vision/v3.2/read/analyze"))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Operation-Location", format!("{}{OPERATION_PATH}", server.uri())),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    async fn capture(client: Option<VisionClient>, config: &DemoConfig) -> String {
        let mut out = Vec::new();
        run_with(&mut out, client, config).await.expect("write to Vec");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn render_stops_after_six_lines_across_pages() {
        let result: ReadOperationResult =
            serde_json::from_value(succeeded_json()).expect("valid result");
        let report = render(&result).expect("succeeded");

        assert!(report.contains("   Line 1: 'page one line 1' (confidence: 99.0%)\n"));
        assert!(report.contains("   Line 5: 'Dr. Sarah Chen' (confidence: 95.0%)\n"));
        assert!(report.contains("   Line 6: 'Senior Data Scientist' (confidence: 95.0%)\n"));
        assert!(!report.contains("Microsoft Corporation"));
        assert!(!report.contains("Line 7"));
    }

    #[test]
    fn render_failed_status() {
        let result: ReadOperationResult =
            serde_json::from_value(serde_json::json!({"status": "failed"})).expect("valid result");
        let err = render(&result).expect_err("failed status");
        assert_eq!(err.diagnostic("OCR API"), "❌ OCR failed with status: failed");
    }

    #[tokio::test]
    async fn without_credentials_prints_sample_transcript() {
        let output = capture(None, &DemoConfig::default()).await;
        assert_eq!(
            output,
            format!(
                "{}{}{}",
                transcripts::OCR_INTRO,
                transcripts::COMPUTER_VISION_UNAVAILABLE,
                transcripts::OCR_FALLBACK
            )
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn polls_until_succeeded() {
        let server = MockServer::start().await;
        mount_submit(&server).await;

        Mock::given(method("GET"))
            .and(path(OPERATION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "running"})))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(OPERATION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(succeeded_json()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("temp dir");
        let output = capture(Some(setup_mock_client(&server)), &config_with_image(&dir)).await;

        let polls = server
            .received_requests()
            .await
            .expect("recording enabled")
            .iter()
            .filter(|r| r.method.as_str() == "GET")
            .count();
        assert_eq!(polls, 3);
        assert!(output.contains("   Processing text extraction...\n\n📝 EXTRACTED TEXT:\n"));
        assert!(output.contains("✅ Real OCR API working!"));
        assert!(output.ends_with(transcripts::OCR_KEY_CONCEPTS));
        assert!(logs_contain("polling read operation"));
        assert!(logs_contain("op-42"));
    }

    #[tokio::test]
    async fn failed_operation_prints_progress_status_fallback_and_key_concepts() {
        let server = MockServer::start().await;
        mount_submit(&server).await;
        Mock::given(method("GET"))
            .and(path(OPERATION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "failed"})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("temp dir");
        let output = capture(Some(setup_mock_client(&server)), &config_with_image(&dir)).await;

        assert_eq!(
            output,
            format!(
                "{}   Processing text extraction...\n\n❌ OCR failed with status: failed\n{}{}",
                transcripts::OCR_INTRO,
                transcripts::OCR_FALLBACK,
                transcripts::OCR_KEY_CONCEPTS
            )
        );
    }

    #[tokio::test]
    async fn missing_operation_location_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/vision/v3.2/read/analyze"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("temp dir");
        let output = capture(Some(setup_mock_client(&server)), &config_with_image(&dir)).await;

        assert!(output.contains("\n❌ OCR API Error: "), "{output}");
        assert!(!output.contains("Processing text extraction"));
        assert!(output.ends_with(&format!(
            "{}{}",
            transcripts::OCR_FALLBACK,
            transcripts::OCR_KEY_CONCEPTS
        )));
    }
}
