//! Conversions between binary images and data URIs
//!
//! Both directions are stateless with respect to the caller: the codec only
//! reads bytes (from memory, a file, or a registered object URL) and never
//! mutates anything it is given.

use folio_core::{BinaryImage, CaptureError};

use crate::data_uri::DataUri;
use crate::object_url::ObjectUrlRegistry;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Blob ⇄ data URI codec
#[derive(Clone, Default)]
pub struct MediaCodec {
    object_urls: Option<ObjectUrlRegistry>,
}

impl MediaCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec that can also fetch same-process object URLs
    pub fn with_object_urls(object_urls: ObjectUrlRegistry) -> Self {
        Self {
            object_urls: Some(object_urls),
        }
    }

    /// Read a blob and encode it as a base64 data URI carrying its MIME type.
    ///
    /// Fails with [`CaptureError::Read`] when the bytes cannot be read.
    pub async fn blob_to_data_uri(&self, blob: &BinaryImage) -> Result<String, CaptureError> {
        let data = blob
            .read_bytes()
            .await
            .map_err(|e| CaptureError::read(&blob.name, e))?;

        let mime_type = if blob.mime_type.trim().is_empty() {
            FALLBACK_MIME_TYPE
        } else {
            blob.mime_type.as_str()
        };

        tracing::debug!(
            name = %blob.name,
            content_type = %mime_type,
            size = data.len(),
            "Encoded blob as data URI"
        );

        Ok(DataUri::encode(mime_type, &data))
    }

    /// Decode a data URI (or fetch an object URL) into a named blob.
    ///
    /// The returned blob carries `mime_type`, not the type declared by the URI.
    /// Fails with [`CaptureError::Decode`] when the URI is malformed or the
    /// object URL is unknown.
    pub async fn data_uri_to_blob(
        &self,
        data_uri: &str,
        file_name: &str,
        mime_type: &str,
    ) -> Result<BinaryImage, CaptureError> {
        let data = if ObjectUrlRegistry::is_object_url(data_uri) {
            let registry = self
                .object_urls
                .as_ref()
                .ok_or_else(|| CaptureError::decode("object URLs are not supported here"))?;
            let (_, data) = registry
                .resolve(data_uri)
                .await
                .ok_or_else(|| CaptureError::decode("object URL was revoked or never created"))?;
            data
        } else {
            DataUri::parse(data_uri)?.data
        };

        tracing::debug!(
            name = %file_name,
            content_type = %mime_type,
            size = data.len(),
            "Decoded data URI into blob"
        );

        Ok(BinaryImage::from_bytes(file_name, mime_type, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_blob_to_data_uri_memory() {
        let codec = MediaCodec::new();
        let blob = BinaryImage::from_bytes("a.png", "image/png", vec![1u8, 2, 3]);
        let uri = codec.blob_to_data_uri(&blob).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,AQID");
    }

    #[tokio::test]
    async fn test_blob_to_data_uri_without_type() {
        let codec = MediaCodec::new();
        let blob = BinaryImage::from_bytes("raw", "", vec![0u8]);
        let uri = codec.blob_to_data_uri(&blob).await.unwrap();
        assert!(uri.starts_with("data:application/octet-stream;base64,"));
    }

    #[tokio::test]
    async fn test_blob_to_data_uri_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let blob = BinaryImage::from_path(dir.path().join("gone.jpg"));
        let err = MediaCodec::new().blob_to_data_uri(&blob).await.unwrap_err();
        assert!(matches!(err, CaptureError::Read { ref name, .. } if name == "gone.jpg"));
    }

    #[tokio::test]
    async fn test_data_uri_to_blob_uses_given_name_and_type() {
        let codec = MediaCodec::new();
        let blob = codec
            .data_uri_to_blob("data:image/png;base64,AQID", "user-photo.jpg", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(blob.name, "user-photo.jpg");
        assert_eq!(blob.mime_type, "image/jpeg");
        assert_eq!(blob.read_bytes().await.unwrap().as_ref(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_data_uri_to_blob_malformed() {
        let err = MediaCodec::new()
            .data_uri_to_blob("not a uri", "x.jpg", "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::Decode(_)));
    }

    #[tokio::test]
    async fn test_round_trip_preserves_length_and_type() {
        let codec = MediaCodec::new();
        for mime in ["image/jpeg", "image/png", "image/gif", "image/webp"] {
            let original = BinaryImage::from_bytes("p", mime, vec![7u8; 1021]);
            let uri = codec.blob_to_data_uri(&original).await.unwrap();
            let back = codec.data_uri_to_blob(&uri, "p", mime).await.unwrap();
            assert_eq!(back.size_hint(), Some(1021));
            assert_eq!(back.mime_type, mime);
            assert_eq!(back.read_bytes().await.unwrap(), original.read_bytes().await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_object_url_fetch() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create_object_url("image/jpeg", vec![5u8, 6]).await;
        let codec = MediaCodec::with_object_urls(registry.clone());

        let blob = codec
            .data_uri_to_blob(&url, "user-photo.jpg", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(blob.read_bytes().await.unwrap().as_ref(), &[5, 6]);

        registry.revoke_object_url(&url).await;
        assert!(matches!(
            codec.data_uri_to_blob(&url, "x", "image/jpeg").await,
            Err(CaptureError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_object_url_without_registry() {
        let err = MediaCodec::new()
            .data_uri_to_blob("blob:folio/abc", "x", "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::Decode(_)));
    }
}
