use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use folio_core::CaptureError;

/// Camera facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraFacing {
    /// Front-facing camera (selfie)
    #[default]
    Front,
    /// Rear-facing camera (main)
    Rear,
}

impl CameraFacing {
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Rear,
            CameraFacing::Rear => CameraFacing::Front,
        }
    }
}

impl fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraFacing::Front => write!(f, "front"),
            CameraFacing::Rear => write!(f, "rear"),
        }
    }
}

/// A decoded video frame, packed RGB8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Frame {
    /// Returns `None` when the buffer does not hold exactly `width * height` pixels
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(3)?;
        if width == 0 || height == 0 || rgb.len() != expected {
            return None;
        }
        Some(Self { width, height, rgb })
    }

    /// A frame filled with a single color
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Self {
        let pixels = width as usize * height as usize;
        let rgb = color.iter().copied().cycle().take(pixels * 3).collect();
        Self { width, height, rgb }
    }
}

/// A live video input
pub trait VideoDevice: Send + Sync {
    fn label(&self) -> &str;

    fn facing(&self) -> CameraFacing;

    /// The currently decoded frame, `None` while the device is still starting up
    fn current_frame(&self) -> Option<Frame>;
}

/// Grants access to the video devices of the host
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Facings the host has a device for
    async fn available_facings(&self) -> Vec<CameraFacing>;

    /// Acquire a device, requesting permission if needed.
    ///
    /// Denied permission or a missing device is [`CaptureError::DeviceUnavailable`].
    async fn acquire(&self, facing: CameraFacing) -> Result<Box<dyn VideoDevice>, CaptureError>;
}

/// In-process device serving a fixed frame
pub struct StaticFrameDevice {
    label: String,
    facing: CameraFacing,
    frame: RwLock<Option<Frame>>,
}

impl StaticFrameDevice {
    pub fn new(label: impl Into<String>, facing: CameraFacing, frame: Option<Frame>) -> Self {
        Self {
            label: label.into(),
            facing,
            frame: RwLock::new(frame),
        }
    }

    pub fn set_frame(&self, frame: Option<Frame>) {
        *self.frame.write().unwrap_or_else(PoisonError::into_inner) = frame;
    }
}

impl VideoDevice for StaticFrameDevice {
    fn label(&self) -> &str {
        &self.label
    }

    fn facing(&self) -> CameraFacing {
        self.facing
    }

    fn current_frame(&self) -> Option<Frame> {
        self.frame
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// In-process provider handing out [`StaticFrameDevice`]s
#[derive(Debug, Clone, Default)]
pub struct StaticCameraProvider {
    frames: HashMap<CameraFacing, Option<Frame>>,
    failures: HashMap<CameraFacing, String>,
    permission_denied: bool,
}

impl StaticCameraProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device; `None` models a device that has not produced a frame yet
    pub fn with_device(mut self, facing: CameraFacing, frame: Option<Frame>) -> Self {
        self.frames.insert(facing, frame);
        self
    }

    /// Make acquiring one facing fail, e.g. a device held by another process
    pub fn fail_acquire(mut self, facing: CameraFacing, reason: impl Into<String>) -> Self {
        self.failures.insert(facing, reason.into());
        self
    }

    pub fn deny_permission(mut self) -> Self {
        self.permission_denied = true;
        self
    }
}

#[async_trait]
impl CameraProvider for StaticCameraProvider {
    async fn available_facings(&self) -> Vec<CameraFacing> {
        [CameraFacing::Front, CameraFacing::Rear]
            .into_iter()
            .filter(|facing| self.frames.contains_key(facing))
            .collect()
    }

    async fn acquire(&self, facing: CameraFacing) -> Result<Box<dyn VideoDevice>, CaptureError> {
        if self.permission_denied {
            return Err(CaptureError::DeviceUnavailable(
                "camera permission denied".to_string(),
            ));
        }
        if let Some(reason) = self.failures.get(&facing) {
            return Err(CaptureError::DeviceUnavailable(reason.clone()));
        }
        let frame = self
            .frames
            .get(&facing)
            .ok_or_else(|| CaptureError::DeviceUnavailable(format!("no {} camera", facing)))?;
        Ok(Box::new(StaticFrameDevice::new(
            format!("static {} camera", facing),
            facing,
            frame.clone(),
        )))
    }
}
