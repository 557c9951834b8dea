//! Folio Photo Capture Library
//!
//! This crate provides the photo field controller and the camera side of the
//! capture pipeline: devices, the camera source that turns the current frame
//! into a data URI, and the camera modal the presentation layer drives.

pub mod camera;
pub mod controller;
pub mod modal;

// Re-export commonly used types
pub use camera::{
    CameraFacing, CameraProvider, CameraSource, Frame, StaticCameraProvider, StaticFrameDevice,
    VideoDevice,
};
pub use controller::{AcceptOutcome, PhotoFieldController, PhotoSource};
pub use modal::{CameraModal, ModalState};
