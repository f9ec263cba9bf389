//! The probe-then-fallback routine shared by the three feature demos.

use std::future::Future;
use std::io::{self, Write};
use std::path::Path;

use ai102_vision_core::auth::SubscriptionKey;
use ai102_vision_core::client::{RetryPolicy, VisionClient};
use bytes::Bytes;

use crate::config::ServiceCredentials;
use crate::error::DemoError;

/// The fixed texts that frame one feature demo.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    /// Short name used in logs.
    pub name: &'static str,
    /// API name used in error diagnostics, e.g. `Face API`.
    pub service: &'static str,
    /// Chapter heading, always printed first.
    pub intro: &'static str,
    /// Printed when the probe finds a usable client.
    pub live_notice: &'static str,
    /// Printed when the probe finds no usable client.
    pub unavailable_notice: &'static str,
    /// Sample transcript shown instead of live results.
    pub fallback: &'static str,
    /// Printed after a successful live report.
    pub key_concepts: &'static str,
    /// Printed after the fallback when a live call fails. Empty for none.
    pub after_fallback: &'static str,
}

/// What a live call wrote and how it ended.
///
/// `output` is printed in both cases: the full report on success, or the
/// progress lines written before the failure.
#[derive(Debug)]
pub struct LiveOutcome {
    pub output: String,
    pub result: Result<(), DemoError>,
}

impl From<Result<String, DemoError>> for LiveOutcome {
    fn from(result: Result<String, DemoError>) -> Self {
        match result {
            Ok(output) => Self {
                output,
                result: Ok(()),
            },
            Err(err) => Self {
                output: String::new(),
                result: Err(err),
            },
        }
    }
}

/// Build a client for a credential pair, or `None` if the pair is absent or unusable.
///
/// Clients never retry: each demo makes at most one attempt per request.
pub fn probe(credentials: Option<&ServiceCredentials>) -> Option<VisionClient> {
    let credentials = credentials?;
    match VisionClient::builder()
        .endpoint(credentials.endpoint.clone())
        .credential(SubscriptionKey::from(credentials.key.clone()))
        .retry_policy(RetryPolicy::none())
        .build()
    {
        Ok(client) => Some(client),
        Err(err) => {
            tracing::debug!(error = %err, "credentials present but client construction failed");
            None
        }
    }
}

/// Run one feature demo.
///
/// Prints the intro, then either the live report produced by `live` or the
/// feature's fallback transcript. Failures of the live call are reported on
/// the console and never returned; only console write errors escape.
pub async fn probe_then_fallback<F, Fut, O>(
    out: &mut dyn Write,
    feature: &Feature,
    client: Option<VisionClient>,
    live: F,
) -> io::Result<()>
where
    F: FnOnce(VisionClient) -> Fut,
    Fut: Future<Output = O>,
    O: Into<LiveOutcome>,
{
    out.write_all(feature.intro.as_bytes())?;

    let Some(client) = client else {
        tracing::debug!(feature = feature.name, "service not configured, showing sample output");
        out.write_all(feature.unavailable_notice.as_bytes())?;
        return out.write_all(feature.fallback.as_bytes());
    };

    out.write_all(feature.live_notice.as_bytes())?;

    let outcome: LiveOutcome = live(client).await.into();
    out.write_all(outcome.output.as_bytes())?;

    match outcome.result {
        Ok(()) => out.write_all(feature.key_concepts.as_bytes()),
        Err(err) => {
            tracing::warn!(feature = feature.name, error = %err, "live call failed, showing sample output");
            writeln!(out, "\n{}", err.diagnostic(feature.service))?;
            out.write_all(feature.fallback.as_bytes())?;
            out.write_all(feature.after_fallback.as_bytes())
        }
    }
}

/// Read a sample image, mapping a missing file to [`DemoError::ImageNotFound`].
pub async fn load_image(path: &Path) -> Result<Bytes, DemoError> {
    match tokio::fs::read(path).await {
        Ok(data) => Ok(Bytes::from(data)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(DemoError::ImageNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(DemoError::ImageUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}
