//! Mode selection and the top-level run sequence.

use std::io::{self, Write};
use std::str::FromStr;

use crate::config::{DemoConfig, ServiceCredentials};
use crate::feature::probe;
use crate::{faces, image, ocr, transcripts};

/// A recognized demo mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every chapter followed by the integration story.
    All,
    Image,
    Ocr,
    Faces,
    Tips,
    Story,
    Setup,
}

impl Mode {
    /// Every mode, in the order the usage text lists them.
    pub const ALL: [Mode; 7] = [
        Mode::All,
        Mode::Image,
        Mode::Ocr,
        Mode::Faces,
        Mode::Tips,
        Mode::Story,
        Mode::Setup,
    ];

    /// The command-line spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Image => "image",
            Self::Ocr => "ocr",
            Self::Faces => "faces",
            Self::Tips => "tips",
            Self::Story => "story",
            Self::Setup => "setup",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::All => "Complete demo (recommended)",
            Self::Image => "Image analysis only",
            Self::Ocr => "Text extraction only",
            Self::Faces => "Face analysis (auto-detects API)",
            Self::Tips => "AI-102 exam tips",
            Self::Story => "Integration story",
            Self::Setup => "Complete Azure setup guide",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Case-insensitive. The error carries the mode as typed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| s.to_string())
    }
}

/// Whether a chapter will call the live service: the same check the chapters make.
fn available(credentials: Option<&ServiceCredentials>) -> bool {
    probe(credentials).is_some()
}

fn status(credentials: Option<&ServiceCredentials>) -> &'static str {
    if available(credentials) {
        "✅ REAL API"
    } else {
        "📚 EDUCATIONAL"
    }
}

/// Usage text with the live/educational status of both services.
pub fn usage(config: &DemoConfig) -> String {
    let mut text = String::from("AI-102 Azure Vision Demo\n");
    text.push_str(&format!(
        "\nComputer Vision Status: {}\n",
        status(config.computer_vision.as_ref())
    ));
    text.push_str(&format!("Face API Status: {}\n", status(config.face.as_ref())));
    text.push_str("\nUsage: ai102-vision-demo <mode>\n\nModes:\n");
    for mode in Mode::ALL {
        text.push_str(&format!("  {:<8} - {}\n", mode.as_str(), mode.description()));
    }
    text.push_str("\nExample: ai102-vision-demo all\n");
    text.push_str("\n💡 Need Azure setup? Run: ai102-vision-demo setup\n");
    text
}

/// Run one invocation of the demo.
///
/// `None` prints the usage text. An unrecognized mode prints an error line
/// and the usage text. Neither touches the network or the image directory.
pub async fn run(mode: Option<&str>, config: &DemoConfig, out: &mut dyn Write) -> io::Result<()> {
    let Some(raw) = mode else {
        return out.write_all(usage(config).as_bytes());
    };

    let mode = match raw.parse::<Mode>() {
        Ok(mode) => mode,
        Err(unknown) => {
            tracing::debug!(mode = %unknown, "unrecognized mode");
            writeln!(out, "❌ Unknown mode: {unknown}")?;
            return out.write_all(usage(config).as_bytes());
        }
    };

    tracing::info!(mode = mode.as_str(), "running demo");
    out.write_all(transcripts::HEADER.as_bytes())?;

    match mode {
        Mode::All => {
            let face_mode = if available(config.face.as_ref()) {
                "real Face API"
            } else {
                "educational mode"
            };
            writeln!(out, "\n🎬 Running complete AI-102 demo with {face_mode}...")?;
            image::run(out, config).await?;
            ocr::run(out, config).await?;
            faces::run(out, config).await?;
            out.write_all(transcripts::INTEGRATION_STORY.as_bytes())?;
        }
        Mode::Image => image::run(out, config).await?,
        Mode::Ocr => ocr::run(out, config).await?,
        Mode::Faces => faces::run(out, config).await?,
        Mode::Tips => out.write_all(transcripts::EXAM_TIPS.as_bytes())?,
        Mode::Story => out.write_all(transcripts::INTEGRATION_STORY.as_bytes())?,
        Mode::Setup => out.write_all(transcripts::SETUP_GUIDE.as_bytes())?,
    }

    out.write_all(transcripts::COMPLETION_BANNER.as_bytes())
}
