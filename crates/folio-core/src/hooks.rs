//! Hooks and traits for the host environment
//!
//! The photo controller never owns the form, the file chooser, the camera
//! surface or the notification UI. It talks to them through these traits,
//! which the host implements.

use crate::error::{CaptureError, ErrorMetadata, LogLevel};
use crate::models::{BinaryImage, FieldRef, SetValueOptions};

/// Capability interface of the host form engine.
///
/// The controller only ever writes to the field it was constructed for.
pub trait FormBinding: Send + Sync {
    /// Write a field value; `None` clears the slot
    fn set_value(&self, field: &str, value: Option<BinaryImage>, options: SetValueOptions);

    /// Register the native file input bound to a field
    fn register_ref(&self, field: &str, field_ref: FieldRef);
}

/// Single channel through which capture failures reach the user
pub trait ErrorReporter: Send + Sync {
    /// Report a caught error with a human-readable context message
    fn report(&self, error: &CaptureError, context: &str);
}

/// Opens the host's native file chooser
pub trait FilePicker: Send + Sync {
    fn open_file_dialog(&self, field: &str, accept: &str);
}

/// Implemented by the camera surface so a successful camera capture can dismiss it
pub trait CameraDismiss: Send + Sync {
    fn dismiss(&self);
}

/// Default reporter: one `tracing` event per report, at the error's own level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, error: &CaptureError, context: &str) {
        let code = error.error_code();
        let message = error.client_message();
        match error.log_level() {
            LogLevel::Debug => {
                tracing::debug!(error = %error, code, message = %message, "{}", context)
            }
            LogLevel::Warn => {
                tracing::warn!(error = %error, code, message = %message, "{}", context)
            }
            LogLevel::Error => {
                tracing::error!(error = %error, code, message = %message, "{}", context)
            }
        }
    }
}

/// No-op picker for hosts without a native file chooser
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpFilePicker;

impl FilePicker for NoOpFilePicker {
    fn open_file_dialog(&self, field: &str, _accept: &str) {
        tracing::debug!(field, "No file picker available");
    }
}
