//! Camera devices and the snapshot source built on top of them

mod device;
mod source;

pub use device::{
    CameraFacing, CameraProvider, Frame, StaticCameraProvider, StaticFrameDevice, VideoDevice,
};
pub use source::{encode_jpeg_data_uri, CameraSource};
