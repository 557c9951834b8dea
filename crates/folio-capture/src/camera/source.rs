use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use folio_core::constants::DEFAULT_SNAPSHOT_MIME_TYPE;
use folio_core::CaptureError;
use folio_processing::DataUri;

use super::device::{CameraFacing, CameraProvider, Frame, VideoDevice};

/// Encode a frame as a JPEG data URI
pub fn encode_jpeg_data_uri(frame: &Frame, quality: u8) -> Result<String, CaptureError> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .encode(&frame.rgb, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| CaptureError::Encode(e.to_string()))?;
    Ok(DataUri::encode(DEFAULT_SNAPSHOT_MIME_TYPE, &buffer))
}

/// Bridges a live camera to still-image data URIs.
///
/// Holds at most one front and one rear device. The devices are released when
/// the source is dropped.
pub struct CameraSource {
    front: Option<Box<dyn VideoDevice>>,
    rear: Option<Box<dyn VideoDevice>>,
    facing: CameraFacing,
    jpeg_quality: u8,
}

impl CameraSource {
    /// Acquire `preferred` (or the other facing when it is missing or fails),
    /// then the remaining facing if the host can provide it
    pub async fn open(
        provider: &dyn CameraProvider,
        preferred: CameraFacing,
        jpeg_quality: u8,
    ) -> Result<Self, CaptureError> {
        let facings = provider.available_facings().await;
        if facings.is_empty() {
            return Err(CaptureError::DeviceUnavailable(
                "no camera found".to_string(),
            ));
        }

        let mut order = vec![preferred, preferred.toggled()];
        order.retain(|facing| facings.contains(facing));

        let mut primary = None;
        let mut last_error = None;
        let mut remaining = order.into_iter();
        for facing in remaining.by_ref() {
            match provider.acquire(facing).await {
                Ok(device) => {
                    primary = Some((facing, device));
                    break;
                }
                Err(e) => {
                    tracing::warn!(facing = %facing, error = %e, "Camera acquisition failed");
                    last_error = Some(e);
                }
            }
        }
        let Some((primary_facing, primary_device)) = primary else {
            return Err(last_error.unwrap_or_else(|| {
                CaptureError::DeviceUnavailable("no camera found".to_string())
            }));
        };

        let secondary = match remaining.next() {
            Some(facing) => match provider.acquire(facing).await {
                Ok(device) => Some(device),
                Err(e) => {
                    tracing::warn!(
                        facing = %facing,
                        error = %e,
                        "Second camera unavailable, facing switch disabled"
                    );
                    None
                }
            },
            None => None,
        };

        let (front, rear) = match primary_facing {
            CameraFacing::Front => (Some(primary_device), secondary),
            CameraFacing::Rear => (secondary, Some(primary_device)),
        };
        Ok(Self::from_devices(front, rear, preferred, jpeg_quality))
    }

    pub fn from_devices(
        front: Option<Box<dyn VideoDevice>>,
        rear: Option<Box<dyn VideoDevice>>,
        preferred: CameraFacing,
        jpeg_quality: u8,
    ) -> Self {
        let facing = match (preferred, front.is_some(), rear.is_some()) {
            (CameraFacing::Front, false, true) => CameraFacing::Rear,
            (CameraFacing::Rear, true, false) => CameraFacing::Front,
            _ => preferred,
        };
        tracing::info!(
            facing = %facing,
            front = front.is_some(),
            rear = rear.is_some(),
            "Camera acquired"
        );
        Self {
            front,
            rear,
            facing,
            jpeg_quality,
        }
    }

    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    pub fn can_switch_facing(&self) -> bool {
        self.front.is_some() && self.rear.is_some()
    }

    /// Toggle between front and rear; a no-op unless both exist
    pub fn switch_facing(&mut self) -> CameraFacing {
        if self.can_switch_facing() {
            self.facing = self.facing.toggled();
            tracing::debug!(facing = %self.facing, "Camera facing switched");
        }
        self.facing
    }

    fn active_device(&self) -> Option<&dyn VideoDevice> {
        match self.facing {
            CameraFacing::Front => self.front.as_deref(),
            CameraFacing::Rear => self.rear.as_deref(),
        }
    }

    /// Capture the current frame as a JPEG data URI.
    ///
    /// `None` means no frame was available; callers retry later.
    pub fn snapshot(&self) -> Option<String> {
        let device = self.active_device()?;
        let frame = device.current_frame()?;
        match encode_jpeg_data_uri(&frame, self.jpeg_quality) {
            Ok(data_uri) => Some(data_uri),
            Err(e) => {
                tracing::error!(device = device.label(), error = %e, "Snapshot encoding failed");
                None
            }
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        tracing::info!(facing = %self.facing, "Camera released");
    }
}
