use std::io::{self, Write};

use ai102_vision_demo::{transcripts, DemoConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ai102-vision-demo")]
#[command(about = "AI-102 Azure AI Vision demo: image analysis, OCR and face detection")]
#[command(version)]
struct Cli {
    /// Demo mode: all, image, ocr, faces, tips, story or setup. Omit for usage.
    mode: Option<String>,

    /// Ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.rest.is_empty() {
        tracing::debug!(ignored = ?cli.rest, "extra arguments ignored");
    }
    let config = DemoConfig::from_env();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = ai102_vision_demo::run(cli.mode.as_deref(), &config, &mut out).await {
        tracing::error!(error = %err, "demo aborted");
        let _ = writeln!(out, "\n❌ Demo error: {err}");
        let _ = out.write_all(transcripts::DEMO_ERROR_HINT.as_bytes());
    }
    let _ = out.flush();
}
