//! Error types module
//!
//! This module provides the error taxonomy of the photo capture pipeline.
//! Every failure a capture can hit is unified under [`CaptureError`], which is
//! what the error-reporting collaborator receives together with a context
//! message derived from the [`CaptureOrigin`] of the attempt.

use std::fmt;
use std::io;

use crate::constants::{PROCESSING_ERROR_CONTEXT, SELECTION_ERROR_CONTEXT};
use crate::validation::ValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues the user can retry
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the end user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "DECODE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the user can re-attempt the same gesture
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Which capture modality an attempt came from.
///
/// The reporter distinguishes "processing" (camera) failures from
/// "selection" (file picker) failures; nothing else is structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureOrigin {
    /// Camera snapshot path
    Processing,
    /// File picker path
    Selection,
}

impl CaptureOrigin {
    /// Human-readable context message handed to the error reporter
    pub fn context_message(&self) -> &'static str {
        match self {
            CaptureOrigin::Processing => PROCESSING_ERROR_CONTEXT,
            CaptureOrigin::Selection => SELECTION_ERROR_CONTEXT,
        }
    }
}

impl fmt::Display for CaptureOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureOrigin::Processing => write!(f, "processing"),
            CaptureOrigin::Selection => write!(f, "selection"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to read '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid data URI: {0}")]
    Decode(String),

    #[error("Photo rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to encode camera frame: {0}")]
    Encode(String),
}

impl CaptureError {
    pub fn read(name: impl Into<String>, source: io::Error) -> Self {
        CaptureError::Read {
            name: name.into(),
            source,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        CaptureError::Decode(message.into())
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn capture_error_static_metadata(
    err: &CaptureError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        CaptureError::Read { .. } => (
            "READ_ERROR",
            true,
            Some("Select the file again"),
            LogLevel::Warn,
        ),
        CaptureError::Decode(_) => (
            "DECODE_ERROR",
            true,
            Some("Take the photo again"),
            LogLevel::Warn,
        ),
        CaptureError::Validation(_) => (
            "VALIDATION_ERROR",
            false,
            Some("Choose a smaller photo in one of the accepted formats"),
            LogLevel::Debug,
        ),
        CaptureError::DeviceUnavailable(_) => (
            "DEVICE_UNAVAILABLE",
            true,
            Some("Allow camera access or upload a file instead"),
            LogLevel::Debug,
        ),
        CaptureError::Encode(_) => (
            "ENCODE_ERROR",
            true,
            Some("Take the photo again"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for CaptureError {
    fn error_code(&self) -> &'static str {
        capture_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        capture_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        capture_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            CaptureError::Read { name, .. } => format!("The file '{}' could not be read", name),
            CaptureError::Decode(_) => "The captured photo could not be decoded".to_string(),
            CaptureError::Validation(e) => e.to_string(),
            CaptureError::DeviceUnavailable(_) => "No camera is available".to_string(),
            CaptureError::Encode(_) => "The camera frame could not be saved".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        capture_error_static_metadata(self).3
    }
}
