//! Error types and handling infrastructure for ampview.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! the library error enum. The binary wraps it in `anyhow` at the top level.
//!
//! Nothing in the sample pipeline recovers locally: every variant here is fatal once it
//! leaves [`Application::run`](crate::app::Application::run), with the single exception of
//! payload errors ([`AmpviewError::MalformedPayload`], [`AmpviewError::NonFiniteSample`]),
//! which the `skip` policy downgrades to a warning.

use thiserror::Error;

/// The main error type for ampview operations.
#[derive(Error, Debug)]
pub enum AmpviewError {
    /// Connection refused, dropped, or otherwise unusable
    #[error("Transport failure: {message}")]
    Transport { message: String },

    /// An event payload that does not carry exactly one numeric sample
    #[error("Malformed sample payload: {payload}")]
    MalformedPayload { payload: String },

    /// NaN or infinite sample value
    #[error("Sample is not a finite number: {value}")]
    NonFiniteSample { value: f64 },

    /// Drawing onto a frame or committing it to the display failed
    #[error("Render failed: {message}")]
    Render { message: String },

    /// Configuration file or value errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File system errors while reading configuration
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for ampview operations.
pub type Result<T> = std::result::Result<T, AmpviewError>;

impl AmpviewError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn malformed(payload: impl Into<String>) -> Self {
        Self::MalformedPayload {
            payload: payload.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether the error describes a single bad payload rather than a broken pipeline.
    pub fn is_payload_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedPayload { .. } | Self::NonFiniteSample { .. }
        )
    }
}

// Terminal backends report failures as io::Error; at that layer they are display faults.
impl From<std::io::Error> for AmpviewError {
    fn from(err: std::io::Error) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let transport = AmpviewError::transport("connection refused");
        assert_eq!(
            transport.to_string(),
            "Transport failure: connection refused"
        );

        let malformed = AmpviewError::malformed("{\"foo\":1}");
        assert_eq!(
            malformed.to_string(),
            "Malformed sample payload: {\"foo\":1}"
        );

        let non_finite = AmpviewError::NonFiniteSample { value: f64::NAN };
        assert_eq!(non_finite.to_string(), "Sample is not a finite number: NaN");
    }

    #[test]
    fn test_payload_error_classification() {
        assert!(AmpviewError::malformed("x").is_payload_error());
        assert!(AmpviewError::NonFiniteSample { value: f64::INFINITY }.is_payload_error());
        assert!(!AmpviewError::transport("closed").is_payload_error());
        assert!(!AmpviewError::render("spi").is_payload_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "tty gone");
        let err: AmpviewError = io_err.into();

        match err {
            AmpviewError::Render { message } => assert_eq!(message, "tty gone"),
            other => panic!("Expected Render variant, got {other:?}"),
        }
    }
}
