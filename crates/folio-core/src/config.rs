//! Configuration module
//!
//! This module provides the capture configuration advertised to the user
//! (accepted MIME types, size limit) and the knobs of the capture pipeline.

use std::env;

use crate::constants::DEFAULT_SNAPSHOT_FILE_NAME;

const MAX_FILE_SIZE_MB: usize = 5;
const CAMERA_JPEG_QUALITY: u8 = 92;
const ALLOWED_CONTENT_TYPES: &str = "image/jpeg,image/png,image/gif,image/webp";

/// Photo capture configuration
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CaptureConfig {
    /// MIME types shown to the user and, when enforced, required of uploads
    pub allowed_mime_types: Vec<String>,
    /// Size limit in bytes shown to the user and, when enforced, required of uploads
    pub max_byte_size: usize,
    /// Reject out-of-policy photos before normalization instead of only advertising the policy
    pub enforce_constraints: bool,
    /// JPEG quality (1-100) used when encoding camera frames
    pub camera_jpeg_quality: u8,
    /// File name given to blobs decoded from camera snapshots
    pub snapshot_file_name: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: split_list(ALLOWED_CONTENT_TYPES),
            max_byte_size: MAX_FILE_SIZE_MB * 1024 * 1024,
            enforce_constraints: false,
            camera_jpeg_quality: CAMERA_JPEG_QUALITY,
            snapshot_file_name: DEFAULT_SNAPSHOT_FILE_NAME.to_string(),
        }
    }
}

impl CaptureConfig {
    /// Load configuration from the environment (and `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_file_size_mb = lookup("PHOTO_MAX_FILE_SIZE_MB")
            .unwrap_or_else(|| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("PHOTO_MAX_FILE_SIZE_MB must be a whole number"))?;
        let max_byte_size = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("PHOTO_MAX_FILE_SIZE_MB is too large"))?;
        let enforce_constraints = lookup("PHOTO_ENFORCE_CONSTRAINTS")
            .unwrap_or_else(|| "false".to_string())
            .to_lowercase()
            .parse::<bool>()
            .map_err(|_| anyhow::anyhow!("PHOTO_ENFORCE_CONSTRAINTS must be true or false"))?;

        let config = CaptureConfig {
            allowed_mime_types: split_list(
                &lookup("PHOTO_ALLOWED_CONTENT_TYPES")
                    .unwrap_or_else(|| ALLOWED_CONTENT_TYPES.to_string()),
            ),
            max_byte_size,
            enforce_constraints,
            camera_jpeg_quality: lookup("PHOTO_CAMERA_JPEG_QUALITY")
                .unwrap_or_else(|| CAMERA_JPEG_QUALITY.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PHOTO_CAMERA_JPEG_QUALITY must be between 1 and 100"))?,
            snapshot_file_name: lookup("PHOTO_DEFAULT_FILE_NAME")
                .unwrap_or_else(|| DEFAULT_SNAPSHOT_FILE_NAME.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.allowed_mime_types.is_empty() {
            anyhow::bail!("At least one allowed content type must be configured");
        }
        if self.max_byte_size == 0 {
            anyhow::bail!("Maximum photo size must be greater than zero");
        }
        if !(1..=100).contains(&self.camera_jpeg_quality) {
            anyhow::bail!(
                "Camera JPEG quality must be between 1 and 100 (got {})",
                self.camera_jpeg_quality
            );
        }
        if self.snapshot_file_name.trim().is_empty() {
            anyhow::bail!("Snapshot file name cannot be empty");
        }
        Ok(())
    }

    /// The `accept` attribute of the file input bound to the photo field
    pub fn accept_attribute(&self) -> String {
        self.allowed_mime_types.join(",")
    }

    /// The size limit as advertised to the user, e.g. `5 MB`
    pub fn max_size_label(&self) -> String {
        const MB: usize = 1024 * 1024;
        const KB: usize = 1024;
        if self.max_byte_size >= MB && self.max_byte_size % MB == 0 {
            format!("{} MB", self.max_byte_size / MB)
        } else if self.max_byte_size >= MB {
            format!("{:.1} MB", self.max_byte_size as f64 / MB as f64)
        } else if self.max_byte_size >= KB {
            format!("{} KB", self.max_byte_size / KB)
        } else {
            format!("{} bytes", self.max_byte_size)
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
