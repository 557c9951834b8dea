use folio_core::{BinaryImage, CaptureConfig, CaptureError, ValidationError};

/// Photo constraint validator
///
/// Checks a photo against the advertised size limit and MIME types. Whether a
/// violation rejects the photo or only gets logged is the caller's decision.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    max_file_size: usize,
    allowed_content_types: Vec<String>,
}

impl MediaValidator {
    pub fn new(max_file_size: usize, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(config.max_byte_size, config.allowed_mime_types.clone())
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate content type; parameters such as `;charset=` are ignored
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate all aspects of a photo
    pub fn validate_all(&self, content_type: &str, file_size: usize) -> Result<(), ValidationError> {
        self.validate_file_size(file_size)?;
        self.validate_content_type(content_type)?;
        Ok(())
    }

    /// Validate a blob, looking up its size on disk when it is file-backed
    pub async fn validate_image(&self, blob: &BinaryImage) -> Result<(), CaptureError> {
        let size = match blob.size_hint() {
            Some(size) => size,
            None => blob
                .size()
                .await
                .map_err(|e| CaptureError::read(&blob.name, e))? as usize,
        };
        self.validate_all(&blob.mime_type, size)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_validator() -> MediaValidator {
        MediaValidator::new(
            1024 * 1024, // 1MB
            vec!["image/jpeg".to_string(), "image/png".to_string()],
        )
    }

    #[test]
    fn test_validate_file_size_ok() {
        let validator = test_validator();
        assert!(validator.validate_file_size(512 * 1024).is_ok());
        assert!(validator.validate_file_size(1024 * 1024).is_ok());
    }

    #[test]
    fn test_validate_file_size_too_large() {
        let validator = test_validator();
        assert_eq!(
            validator.validate_file_size(2 * 1024 * 1024),
            Err(ValidationError::FileTooLarge {
                size: 2 * 1024 * 1024,
                max: 1024 * 1024
            })
        );
    }

    #[test]
    fn test_validate_file_size_empty() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_validate_content_type_ok() {
        let validator = test_validator();
        assert!(validator.validate_content_type("image/jpeg").is_ok());
        assert!(validator.validate_content_type("IMAGE/PNG").is_ok()); // case insensitive
        assert!(validator
            .validate_content_type("image/png; charset=binary")
            .is_ok());
    }

    #[test]
    fn test_validate_content_type_invalid() {
        let validator = test_validator();
        assert!(validator.validate_content_type("image/gif").is_err());
        assert!(validator.validate_content_type("").is_err());
    }

    #[test]
    fn test_validate_all_fails_on_size_first() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_all("image/gif", 0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_from_config() {
        let config = CaptureConfig::default();
        let validator = MediaValidator::from_config(&config);
        assert!(validator.validate_all("image/webp", 1024).is_ok());
        assert!(validator
            .validate_all("image/webp", config.max_byte_size + 1)
            .is_err());
    }

    #[tokio::test]
    async fn test_validate_image_file_backed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.png");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let validator = MediaValidator::new(1024, vec!["image/png".to_string()]);
        let err = validator
            .validate_image(&BinaryImage::from_path(&path))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CaptureError::Validation(ValidationError::FileTooLarge { size: 2048, max: 1024 })
        ));

        let missing = BinaryImage::from_path(dir.path().join("missing.png"));
        assert!(matches!(
            validator.validate_image(&missing).await,
            Err(CaptureError::Read { .. })
        ));
    }
}
