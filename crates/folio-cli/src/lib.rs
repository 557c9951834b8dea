//! Shared pieces of the `folio-photo` command-line tool.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use anyhow::Context;

use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_capture::AcceptOutcome;
use folio_core::{BinaryImage, FieldRef, FormBinding, PhotoFieldState, SetValueOptions};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Largest frame side a baseline JPEG can encode
pub const MAX_FRAME_DIMENSION: i64 = 65_535;

/// Parser for `--width`/`--height` of synthetic camera frames
pub fn frame_dimension() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=MAX_FRAME_DIMENSION)
}

/// Wrap a file on disk as a selected photo, carrying its modification time
pub async fn file_blob(path: &Path) -> anyhow::Result<BinaryImage> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Cannot access {}", path.display()))?;
    let blob = BinaryImage::from_path(path);
    Ok(match metadata.modified() {
        Ok(modified) => blob.with_last_modified(DateTime::<Utc>::from(modified)),
        Err(_) => blob,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct BlobReport {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl From<&BinaryImage> for BlobReport {
    fn from(blob: &BinaryImage) -> Self {
        Self {
            name: blob.name.clone(),
            mime_type: blob.mime_type.clone(),
            size_bytes: blob.size_hint(),
            last_modified: blob.last_modified,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WriteReport {
    pub field: String,
    pub value: Option<BlobReport>,
    pub should_validate: bool,
}

/// Form engine for the command line: logs and remembers every write
#[derive(Default)]
pub struct LoggingForm {
    writes: Mutex<Vec<WriteReport>>,
}

impl LoggingForm {
    pub fn writes(&self) -> Vec<WriteReport> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FormBinding for LoggingForm {
    fn set_value(&self, field: &str, value: Option<BinaryImage>, options: SetValueOptions) {
        tracing::info!(
            field,
            value = value.as_ref().map(|b| b.name.as_str()).unwrap_or("<cleared>"),
            should_validate = options.should_validate,
            "Form field written"
        );
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(WriteReport {
                field: field.to_string(),
                value: value.as_ref().map(BlobReport::from),
                should_validate: options.should_validate,
            });
    }

    fn register_ref(&self, field: &str, field_ref: FieldRef) {
        tracing::debug!(field, accept = %field_ref.accept, "File input registered");
    }
}

/// Outcome and resulting field state of one capture, as printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct CaptureReport {
    pub field: String,
    pub outcome: Option<String>,
    pub status: &'static str,
    pub preview: String,
    pub preview_length: usize,
    pub pending_blob: Option<BlobReport>,
    pub writes: Vec<WriteReport>,
}

impl CaptureReport {
    pub fn new(
        field: &str,
        outcome: Option<AcceptOutcome>,
        state: &PhotoFieldState,
        writes: Vec<WriteReport>,
        preview_limit: usize,
    ) -> Self {
        Self {
            field: field.to_string(),
            outcome: outcome.map(|o| format!("{:?}", o).to_lowercase()),
            status: if state.is_empty() { "empty" } else { "previewing" },
            preview: truncate_string(state.preview(), preview_limit),
            preview_length: state.preview().len(),
            pending_blob: state.pending_blob().map(BlobReport::from),
            writes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("data:image/png;base64,AAAA", 14), "data:image/...");
        assert_eq!(truncate_string("hello", 0), "...");
    }

    #[test]
    fn truncate_string_multibyte() {
        assert_eq!(truncate_string("fotografía", 8), "fotog...");
    }

    #[test]
    fn frame_dimension_bounds() {
        let parser = frame_dimension();
        let cmd = clap::Command::new("folio-photo")
            .arg(clap::Arg::new("width").long("width").value_parser(parser));
        assert!(cmd.clone().try_get_matches_from(["folio-photo", "--width", "640"]).is_ok());
        assert!(cmd.clone().try_get_matches_from(["folio-photo", "--width", "65535"]).is_ok());
        assert!(cmd.clone().try_get_matches_from(["folio-photo", "--width", "0"]).is_err());
        assert!(cmd.try_get_matches_from(["folio-photo", "--width", "70000"]).is_err());
    }

    #[tokio::test]
    async fn file_blob_encodes_and_decodes_through_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("author.png");
        std::fs::write(&path, [9u8, 8, 7]).unwrap();

        let blob = file_blob(&path).await.unwrap();
        assert_eq!(blob.name, "author.png");
        assert_eq!(blob.mime_type, "image/png");
        assert!(blob.last_modified.is_some());

        let codec = folio_processing::MediaCodec::new();
        let data_uri = codec.blob_to_data_uri(&blob).await.unwrap();
        assert_eq!(data_uri, "data:image/png;base64,CQgH");

        let decoded = codec
            .data_uri_to_blob(&data_uri, "copy.png", "image/png")
            .await
            .unwrap();
        let out = dir.path().join("copy.png");
        std::fs::write(&out, decoded.read_bytes().await.unwrap()).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), vec![9u8, 8, 7]);
    }

    #[tokio::test]
    async fn file_blob_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = file_blob(&dir.path().join("gone.jpg")).await.unwrap_err();
        assert!(err.to_string().contains("Cannot access"));
    }

    #[test]
    fn logging_form_records_writes() {
        let form = LoggingForm::default();
        form.set_value(
            "foto",
            Some(BinaryImage::from_bytes("a.jpg", "image/jpeg", vec![1u8, 2])),
            SetValueOptions::VALIDATE,
        );
        form.set_value("foto", None, SetValueOptions::SILENT);

        let writes = form.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].value.as_ref().unwrap().size_bytes, Some(2));
        assert!(writes[0].should_validate);
        assert!(writes[1].value.is_none());
        assert!(!writes[1].should_validate);
    }

    #[test]
    fn capture_report_serializes() {
        let state = PhotoFieldState::Previewing {
            preview: "https://example.com/photo.jpg".to_string(),
            pending_blob: None,
        };
        let report = CaptureReport::new("foto", Some(AcceptOutcome::Applied), &state, vec![], 80);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "applied");
        assert_eq!(json["status"], "previewing");
        assert_eq!(json["preview"], "https://example.com/photo.jpg");
        assert!(json["pending_blob"].is_null());
    }
}
