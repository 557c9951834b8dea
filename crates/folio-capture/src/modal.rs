//! Camera modal: the capture surface side of the camera path
//!
//! The modal owns the camera while it is open. Failing to acquire the camera is
//! shown to the user here and never reaches the photo controller.

use std::sync::{Mutex, MutexGuard, PoisonError};

use folio_core::{CameraDismiss, CaptureConfig};

use crate::camera::{CameraFacing, CameraProvider, CameraSource};
use crate::controller::{AcceptOutcome, PhotoFieldController};

/// What the modal currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open { facing: CameraFacing },
    Unavailable(String),
}

#[derive(Default)]
struct ModalInner {
    camera: Option<CameraSource>,
    unavailable: Option<String>,
}

pub struct CameraModal {
    inner: Mutex<ModalInner>,
    jpeg_quality: u8,
}

impl CameraModal {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            inner: Mutex::new(ModalInner::default()),
            jpeg_quality: config.camera_jpeg_quality,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ModalInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the modal and acquire the camera
    pub async fn open(&self, provider: &dyn CameraProvider, preferred: CameraFacing) -> ModalState {
        self.close();
        match CameraSource::open(provider, preferred, self.jpeg_quality).await {
            Ok(camera) => {
                let facing = camera.facing();
                self.lock().camera = Some(camera);
                ModalState::Open { facing }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Camera could not be opened");
                let reason = e.to_string();
                self.lock().unavailable = Some(reason.clone());
                ModalState::Unavailable(reason)
            }
        }
    }

    /// Close the modal, releasing the camera
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.unavailable = None;
        inner.camera = None;
    }

    pub fn state(&self) -> ModalState {
        let inner = self.lock();
        match (&inner.camera, &inner.unavailable) {
            (Some(camera), _) => ModalState::Open {
                facing: camera.facing(),
            },
            (None, Some(reason)) => ModalState::Unavailable(reason.clone()),
            (None, None) => ModalState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock().camera.is_some()
    }

    /// Switch between front and rear; `None` when the modal is not open
    pub fn switch_facing(&self) -> Option<CameraFacing> {
        self.lock().camera.as_mut().map(CameraSource::switch_facing)
    }

    /// Press the shutter and hand the snapshot to the controller.
    ///
    /// Returns `None` when there was nothing to capture (modal closed or no
    /// frame yet); the user simply tries again.
    pub async fn shoot(&self, controller: &PhotoFieldController) -> Option<AcceptOutcome> {
        let snapshot = self.lock().camera.as_ref().and_then(CameraSource::snapshot);
        let Some(data_uri) = snapshot else {
            tracing::debug!("No camera frame available yet");
            return None;
        };
        Some(controller.on_camera_snapshot(data_uri, self).await)
    }
}

impl CameraDismiss for CameraModal {
    fn dismiss(&self) {
        self.close();
    }
}
