use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};

/// Where the bytes of a [`BinaryImage`] live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobBody {
    /// Bytes already held in memory
    Memory(Bytes),
    /// A file on disk, read lazily
    File(PathBuf),
}

/// An opaque named blob with a MIME type.
///
/// File-backed blobs behave like a picked file: the bytes are only read when
/// needed, and a file that disappeared in the meantime fails the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    pub name: String,
    pub mime_type: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub body: BlobBody,
}

impl BinaryImage {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            last_modified: None,
            body: BlobBody::Memory(data.into()),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        Self {
            name,
            mime_type: mime_type.into(),
            last_modified: None,
            body: BlobBody::File(path),
        }
    }

    /// File-backed blob whose MIME type is inferred from the extension
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime_type = mime_type_for_path(&path);
        Self::from_file(path, mime_type)
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Length in bytes when known without I/O
    pub fn size_hint(&self) -> Option<usize> {
        match &self.body {
            BlobBody::Memory(data) => Some(data.len()),
            BlobBody::File(_) => None,
        }
    }

    /// Length in bytes, looking at the file metadata for file-backed blobs
    pub async fn size(&self) -> io::Result<u64> {
        match &self.body {
            BlobBody::Memory(data) => Ok(data.len() as u64),
            BlobBody::File(path) => Ok(tokio::fs::metadata(path).await?.len()),
        }
    }

    /// Read the whole body
    pub async fn read_bytes(&self) -> io::Result<Bytes> {
        match &self.body {
            BlobBody::Memory(data) => Ok(data.clone()),
            BlobBody::File(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "file".to_string())
}

/// Best-effort MIME type for an image file name
pub fn mime_type_for_path(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
    .to_string()
}
