//! Test helpers: recording collaborators and a controller wired to them.
//!
//! Run from workspace root: `cargo test -p folio-capture`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use folio_capture::PhotoFieldController;
use folio_core::{
    BinaryImage, CameraDismiss, CaptureConfig, CaptureError, ErrorReporter, FieldRef, FilePicker,
    FormBinding, SetValueOptions,
};

pub const FIELD: &str = "foto";

/// One `set_value` call seen by the form engine
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub field: String,
    pub value: Option<BinaryImage>,
    pub options: SetValueOptions,
}

/// Form engine that records every write and registered ref
#[derive(Default)]
pub struct RecordingForm {
    writes: Mutex<Vec<Write>>,
    refs: Mutex<Vec<FieldRef>>,
}

impl RecordingForm {
    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn refs(&self) -> Vec<FieldRef> {
        self.refs.lock().unwrap().clone()
    }
}

impl FormBinding for RecordingForm {
    fn set_value(&self, field: &str, value: Option<BinaryImage>, options: SetValueOptions) {
        self.writes.lock().unwrap().push(Write {
            field: field.to_string(),
            value,
            options,
        });
    }

    fn register_ref(&self, _field: &str, field_ref: FieldRef) {
        self.refs.lock().unwrap().push(field_ref);
    }
}

/// Error reporter that records (error code, context) pairs
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(String, String)>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<(String, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &CaptureError, context: &str) {
        use folio_core::ErrorMetadata;
        self.reports
            .lock()
            .unwrap()
            .push((error.error_code().to_string(), context.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingPicker {
    opened: Mutex<Vec<(String, String)>>,
}

impl RecordingPicker {
    pub fn opened(&self) -> Vec<(String, String)> {
        self.opened.lock().unwrap().clone()
    }
}

impl FilePicker for RecordingPicker {
    fn open_file_dialog(&self, field: &str, accept: &str) {
        self.opened
            .lock()
            .unwrap()
            .push((field.to_string(), accept.to_string()));
    }
}

/// Camera surface stand-in counting dismissals
#[derive(Default)]
pub struct DismissCounter {
    count: Mutex<usize>,
}

impl DismissCounter {
    pub fn count(&self) -> usize {
        *self.count.lock().unwrap()
    }
}

impl CameraDismiss for DismissCounter {
    fn dismiss(&self) {
        *self.count.lock().unwrap() += 1;
    }
}

pub struct Harness {
    pub controller: PhotoFieldController,
    pub form: Arc<RecordingForm>,
    pub reporter: Arc<RecordingReporter>,
    pub picker: Arc<RecordingPicker>,
}

pub fn harness(config: CaptureConfig) -> Harness {
    let form = Arc::new(RecordingForm::default());
    let reporter = Arc::new(RecordingReporter::default());
    let picker = Arc::new(RecordingPicker::default());
    let controller = PhotoFieldController::new(FIELD, config, form.clone())
        .with_reporter(reporter.clone())
        .with_file_picker(picker.clone());
    Harness {
        controller,
        form,
        reporter,
        picker,
    }
}

/// A JPEG-looking payload of the given size
pub fn jpeg_bytes(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    if size >= 4 {
        data[..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
        data[size - 2] = 0xFF;
        data[size - 1] = 0xD9;
    }
    data
}
