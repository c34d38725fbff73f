//! Unified error types for issueradar.
//!
//! The core transforms (parsing, extraction, categorization) never fail on
//! malformed chat content; they only produce fewer results. Errors come from
//! the edges: reading files, loading configuration, writing output, and the
//! external collaborators (news search, summarization).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for issueradar operations.
pub type Result<T> = std::result::Result<T, RadarError>;

/// The error type for all issueradar operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RadarError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the input export or the config file
    /// doesn't exist, or when writing output fails.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file could not be parsed.
    #[error("Invalid config{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Config {
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
        /// The config file path, if available
        path: Option<PathBuf>,
    },

    /// A value doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Streaming parser error.
    #[cfg(feature = "streaming")]
    #[error("Streaming error: {0}")]
    Streaming(#[from] crate::streaming::StreamingError),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Transport-level failure talking to an external service.
    #[error("HTTP error from {service}: {source}")]
    Http {
        /// Collaborator name (e.g. "naver-api")
        service: &'static str,
        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// An external service answered with a non-success status.
    #[error("{service} returned status {status}: {body}")]
    Status {
        /// Collaborator name
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// A collaborator needs credentials that were not provided.
    #[error("Missing credentials for {service}: set {hint}")]
    MissingCredentials {
        /// Collaborator name
        service: &'static str,
        /// Which setting or environment variable supplies them
        hint: &'static str,
    },
}

impl From<std::string::FromUtf8Error> for RadarError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        RadarError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl RadarError {
    /// Creates a config error for a TOML document.
    pub fn config(source: toml::de::Error, path: Option<PathBuf>) -> Self {
        RadarError::Config { source, path }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        RadarError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        RadarError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Wraps a client error for the given collaborator.
    pub fn http(service: &'static str, source: reqwest::Error) -> Self {
        RadarError::Http { service, source }
    }

    /// Creates a non-success status error. Long bodies are cut to 200 chars.
    pub fn status(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        let body: String = body.into();
        let body = if body.chars().count() > 200 {
            let mut cut: String = body.chars().take(200).collect();
            cut.push('…');
            cut
        } else {
            body
        };
        RadarError::Status {
            service,
            status,
            body,
        }
    }

    /// Creates a missing credentials error.
    pub fn missing_credentials(service: &'static str, hint: &'static str) -> Self {
        RadarError::MissingCredentials { service, hint }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, RadarError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, RadarError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, RadarError::InvalidDate { .. })
    }

    /// Returns `true` if a collaborator is missing its credentials.
    pub fn is_missing_credentials(&self) -> bool {
        matches!(self, RadarError::MissingCredentials { .. })
    }

    /// Returns `true` if retrying the same call may succeed.
    ///
    /// Timeouts, connection failures, rate limiting (429) and server errors
    /// (5xx) are transient. Everything else, including missing credentials
    /// and client errors, is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            RadarError::Http { source, .. } => {
                source.is_timeout()
                    || source.is_connect()
                    || source.is_request()
                    || source
                        .status()
                        .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
            }
            RadarError::Status { status, .. } => *status == 429 || *status >= 500,
            RadarError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = RadarError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_config_error_with_path() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err = RadarError::config(toml_err, Some(PathBuf::from("/etc/radar.toml")));
        let display = err.to_string();
        assert!(display.contains("Invalid config"));
        assert!(display.contains("/etc/radar.toml"));
    }

    #[test]
    fn test_config_error_without_path() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err = RadarError::config(toml_err, None);
        assert!(!err.to_string().contains("file:"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = RadarError::invalid_date("2024/01/01");
        let display = err.to_string();
        assert!(display.contains("2024/01/01"));
        assert!(display.contains("YYYY-MM-DD"));
        assert!(err.is_invalid_date());
        assert!(!err.is_io());
    }

    #[test]
    fn test_invalid_format_display() {
        let err = RadarError::invalid_format("output", "unknown extension");
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("unknown extension"));
    }

    #[test]
    fn test_status_body_is_truncated() {
        let err = RadarError::status("naver-api", 500, "x".repeat(500));
        match err {
            RadarError::Status { body, .. } => assert_eq!(body.chars().count(), 201),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(RadarError::status("rss", 503, "").is_transient());
        assert!(RadarError::status("rss", 429, "").is_transient());
        assert!(!RadarError::status("rss", 404, "").is_transient());
        assert!(!RadarError::missing_credentials("llm", "OPENAI_API_KEY").is_transient());
        assert!(RadarError::from(io::Error::new(io::ErrorKind::TimedOut, "slow")).is_transient());
        assert!(!RadarError::invalid_date("bad").is_transient());
    }

    #[test]
    fn test_missing_credentials_display() {
        let err = RadarError::missing_credentials("naver-api", "NAVER_CLIENT_ID");
        assert!(err.is_missing_credentials());
        assert!(err.to_string().contains("NAVER_CLIENT_ID"));
    }

    #[test]
    fn test_from_utf8_error() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: RadarError = utf8_err.into();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: RadarError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err = RadarError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(err.source().is_some());
    }
}
