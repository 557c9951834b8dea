//! Folio Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and
//! collaborator traits shared by the photo capture crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod hooks;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::CaptureConfig;
pub use error::{CaptureError, CaptureOrigin, ErrorMetadata, LogLevel};
pub use hooks::{
    CameraDismiss, ErrorReporter, FilePicker, FormBinding, NoOpFilePicker, TracingErrorReporter,
};
pub use models::{BinaryImage, BlobBody, FieldRef, PhotoFieldState, SetValueOptions};
pub use validation::ValidationError;
