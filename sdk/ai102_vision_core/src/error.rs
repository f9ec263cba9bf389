use thiserror::Error;

/// Errors that can occur when talking to the Azure vision services.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The request failed with an HTTP error status and a non-JSON body.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The service answered with an Azure error object.
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    /// A payload could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request failed at the transport level.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL: {message}")]
    InvalidEndpoint {
        message: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// A required configuration value is missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// A request builder was given invalid or incomplete input.
    #[error("Invalid request: {0}")]
    Builder(String),
}

impl VisionError {
    /// Create an [`VisionError::Http`] error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create an [`VisionError::InvalidEndpoint`] error that keeps the URL parse failure.
    pub fn invalid_endpoint_with_source(message: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidEndpoint {
            message: format!("{}: {source}", message.into()),
            source: Some(source),
        }
    }

    /// Returns `true` if the response body could not be decoded into the expected shape.
    pub fn is_decode(&self) -> bool {
        match self {
            Self::Serialization(_) => true,
            Self::Request(e) => e.is_decode(),
            _ => false,
        }
    }
}

/// Result type alias for vision operations.
pub type VisionResult<T> = std::result::Result<T, VisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_status() {
        let err = VisionError::http(401, "Access denied");
        assert_eq!(err.to_string(), "HTTP error: 401 - Access denied");
    }

    #[test]
    fn invalid_endpoint_keeps_source() {
        let parse_err = url::Url::parse("not a url").expect_err("should not parse");
        let err = VisionError::invalid_endpoint_with_source("invalid endpoint URL", parse_err);
        assert!(err.to_string().starts_with("Invalid endpoint URL: invalid endpoint URL"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn serialization_error_is_decode() {
        let json_err = serde_json::from_str::<u32>("\"nope\"").expect_err("should fail");
        assert!(VisionError::from(json_err).is_decode());
        assert!(!VisionError::MissingConfig("endpoint".into()).is_decode());
    }
}
