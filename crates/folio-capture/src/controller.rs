//! Photo field controller
//!
//! Owns the preview of one form field and funnels both capture modalities
//! (file picker, camera snapshot) through a single normalization step into
//! the host form engine. Failures never escape [`PhotoFieldController::accept_source`]:
//! they are reported once and the previous state is kept.
//!
//! Every attempt gets a generation number. A completion that is older than the
//! newest attempt, or older than the last change of the external preview, is
//! dropped without touching the state or the form.

use std::sync::Arc;
use tokio::sync::Mutex;

use folio_core::constants::DEFAULT_SNAPSHOT_MIME_TYPE;
use folio_core::{
    BinaryImage, CameraDismiss, CaptureConfig, CaptureError, CaptureOrigin, ErrorReporter,
    FieldRef, FilePicker, FormBinding, NoOpFilePicker, PhotoFieldState, SetValueOptions,
    TracingErrorReporter,
};
use folio_processing::{MediaCodec, MediaValidator};

/// A candidate photo from one capture gesture
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoSource {
    /// A file from the picker, submitted as-is
    File(BinaryImage),
    /// A data URI (or object URL) from a camera snapshot
    DataUri(String),
}

impl PhotoSource {
    pub fn origin(&self) -> CaptureOrigin {
        match self {
            PhotoSource::File(_) => CaptureOrigin::Selection,
            PhotoSource::DataUri(_) => CaptureOrigin::Processing,
        }
    }
}

/// What became of one `accept_source` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// State updated and the blob written to the form
    Applied,
    /// Normalized fine, but a newer attempt or preview change came first
    Superseded,
    /// Normalization failed and was reported
    Failed,
    /// The controller was unmounted before the attempt finished
    Detached,
}

#[derive(Debug)]
struct ControllerState {
    field: PhotoFieldState,
    external_preview: Option<String>,
    generation: u64,
    mounted: bool,
}

pub struct PhotoFieldController {
    field: String,
    config: CaptureConfig,
    codec: MediaCodec,
    validator: MediaValidator,
    form: Arc<dyn FormBinding>,
    reporter: Arc<dyn ErrorReporter>,
    picker: Arc<dyn FilePicker>,
    state: Mutex<ControllerState>,
}

impl PhotoFieldController {
    pub fn new(field: impl Into<String>, config: CaptureConfig, form: Arc<dyn FormBinding>) -> Self {
        let validator = MediaValidator::from_config(&config);
        Self {
            field: field.into(),
            config,
            codec: MediaCodec::new(),
            validator,
            form,
            reporter: Arc::new(TracingErrorReporter),
            picker: Arc::new(NoOpFilePicker),
            state: Mutex::new(ControllerState {
                field: PhotoFieldState::Empty,
                external_preview: None,
                generation: 0,
                mounted: true,
            }),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_file_picker(mut self, picker: Arc<dyn FilePicker>) -> Self {
        self.picker = picker;
        self
    }

    pub fn with_codec(mut self, codec: MediaCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Register the file input with the form and seed the preview
    pub async fn mount(&self, external_preview: &str) {
        self.form.register_ref(
            &self.field,
            FieldRef {
                field: self.field.clone(),
                accept: self.config.accept_attribute(),
            },
        );
        self.initialize(external_preview).await;
    }

    /// Stop applying results; pending attempts complete as `Detached`
    pub async fn unmount(&self) {
        let mut state = self.state.lock().await;
        state.mounted = false;
        tracing::debug!(field = %self.field, "Photo field unmounted");
    }

    pub fn field_name(&self) -> &str {
        &self.field
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub async fn state(&self) -> PhotoFieldState {
        self.state.lock().await.field.clone()
    }

    pub async fn preview(&self) -> String {
        self.state.lock().await.field.preview().to_string()
    }

    /// Sync with the caller's external preview; only a change has an effect.
    ///
    /// An empty preview clears the field and the form slot without validation.
    /// A non-empty one is displayed with nothing pending for submission.
    pub async fn initialize(&self, external_preview: &str) {
        let mut state = self.state.lock().await;
        if !state.mounted || state.external_preview.as_deref() == Some(external_preview) {
            return;
        }

        state.external_preview = Some(external_preview.to_string());
        state.generation += 1;

        if external_preview.is_empty() {
            state.field = PhotoFieldState::Empty;
            self.form
                .set_value(&self.field, None, SetValueOptions::SILENT);
            tracing::debug!(field = %self.field, "Photo field reset");
        } else {
            state.field = PhotoFieldState::Previewing {
                preview: external_preview.to_string(),
                pending_blob: None,
            };
            tracing::debug!(field = %self.field, "Photo field seeded from external preview");
        }
    }

    /// Ask the host to open its file chooser for this field
    pub fn trigger_file_dialog(&self) {
        self.picker
            .open_file_dialog(&self.field, &self.config.accept_attribute());
    }

    /// File-input change event; an empty selection is ignored
    pub async fn on_files_selected(&self, files: Vec<BinaryImage>) -> Option<AcceptOutcome> {
        let file = files.into_iter().next()?;
        Some(self.on_file_selected(file).await)
    }

    pub async fn on_file_selected(&self, file: BinaryImage) -> AcceptOutcome {
        self.accept_source(PhotoSource::File(file)).await
    }

    /// Camera path: normalize the snapshot and dismiss the camera once applied
    pub async fn on_camera_snapshot(
        &self,
        data_uri: String,
        surface: &dyn CameraDismiss,
    ) -> AcceptOutcome {
        let outcome = self.accept_source(PhotoSource::DataUri(data_uri)).await;
        if outcome == AcceptOutcome::Applied {
            surface.dismiss();
        }
        outcome
    }

    /// Normalize one capture and apply it
    pub async fn accept_source(&self, source: PhotoSource) -> AcceptOutcome {
        let origin = source.origin();
        let Some(generation) = self.begin_attempt().await else {
            return AcceptOutcome::Detached;
        };
        let result = self.normalize(source).await;
        self.complete_attempt(generation, origin, result).await
    }

    async fn begin_attempt(&self) -> Option<u64> {
        let mut state = self.state.lock().await;
        if !state.mounted {
            return None;
        }
        state.generation += 1;
        Some(state.generation)
    }

    async fn complete_attempt(
        &self,
        generation: u64,
        origin: CaptureOrigin,
        result: Result<(String, BinaryImage), CaptureError>,
    ) -> AcceptOutcome {
        let mut state = self.state.lock().await;
        if !state.mounted {
            tracing::debug!(field = %self.field, generation, "Dropping capture after unmount");
            return AcceptOutcome::Detached;
        }

        match result {
            Ok((preview, blob)) => {
                if state.generation != generation {
                    tracing::debug!(
                        field = %self.field,
                        generation,
                        latest = state.generation,
                        "Dropping stale capture"
                    );
                    return AcceptOutcome::Superseded;
                }
                state.field = PhotoFieldState::Previewing {
                    preview,
                    pending_blob: Some(blob.clone()),
                };
                self.form
                    .set_value(&self.field, Some(blob), SetValueOptions::VALIDATE);
                tracing::debug!(field = %self.field, generation, origin = %origin, "Photo captured");
                AcceptOutcome::Applied
            }
            Err(e) => {
                drop(state);
                self.reporter.report(&e, origin.context_message());
                AcceptOutcome::Failed
            }
        }
    }

    async fn normalize(&self, source: PhotoSource) -> Result<(String, BinaryImage), CaptureError> {
        match source {
            PhotoSource::File(blob) => {
                self.check_constraints(&blob).await?;
                let preview = self.codec.blob_to_data_uri(&blob).await?;
                Ok((preview, blob))
            }
            PhotoSource::DataUri(data_uri) => {
                let blob = self
                    .codec
                    .data_uri_to_blob(
                        &data_uri,
                        &self.config.snapshot_file_name,
                        DEFAULT_SNAPSHOT_MIME_TYPE,
                    )
                    .await?;
                if self.config.enforce_constraints {
                    self.validator
                        .validate_file_size(blob.size_hint().unwrap_or(0))?;
                }
                Ok((data_uri, blob))
            }
        }
    }

    async fn check_constraints(&self, blob: &BinaryImage) -> Result<(), CaptureError> {
        match self.validator.validate_image(blob).await {
            Ok(()) => Ok(()),
            Err(e) if self.config.enforce_constraints => Err(e),
            Err(e) => {
                tracing::warn!(
                    field = %self.field,
                    name = %blob.name,
                    content_type = %blob.mime_type,
                    error = %e,
                    "Photo outside advertised constraints accepted"
                );
                Ok(())
            }
        }
    }
}
