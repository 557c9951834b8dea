use super::BinaryImage;

/// State of one photo field, owned by its controller.
///
/// `Previewing` with no pending blob is an externally supplied preview (e.g. the
/// remote URL of an existing photo): displayable, but nothing to submit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PhotoFieldState {
    #[default]
    Empty,
    Previewing {
        preview: String,
        pending_blob: Option<BinaryImage>,
    },
}

impl PhotoFieldState {
    /// The displayable preview, or an empty string when there is no photo
    pub fn preview(&self) -> &str {
        match self {
            PhotoFieldState::Empty => "",
            PhotoFieldState::Previewing { preview, .. } => preview,
        }
    }

    pub fn pending_blob(&self) -> Option<&BinaryImage> {
        match self {
            PhotoFieldState::Empty => None,
            PhotoFieldState::Previewing { pending_blob, .. } => pending_blob.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PhotoFieldState::Empty)
    }
}

/// Options passed along with a field write to the host form engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetValueOptions {
    pub should_validate: bool,
}

impl SetValueOptions {
    /// User-initiated captures run the form engine's validation pass
    pub const VALIDATE: SetValueOptions = SetValueOptions {
        should_validate: true,
    };

    /// Resets clear the slot without validating
    pub const SILENT: SetValueOptions = SetValueOptions {
        should_validate: false,
    };
}

/// Reference to the native file input bound to a photo field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub field: String,
    /// Value of the input's `accept` attribute
    pub accept: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_accessors() {
        let state = PhotoFieldState::default();
        assert!(state.is_empty());
        assert_eq!(state.preview(), "");
        assert!(state.pending_blob().is_none());
    }

    #[test]
    fn test_previewing_state_accessors() {
        let blob = BinaryImage::from_bytes("a.png", "image/png", vec![1u8, 2, 3]);
        let state = PhotoFieldState::Previewing {
            preview: "data:image/png;base64,AQID".to_string(),
            pending_blob: Some(blob.clone()),
        };
        assert!(!state.is_empty());
        assert_eq!(state.preview(), "data:image/png;base64,AQID");
        assert_eq!(state.pending_blob(), Some(&blob));
    }
}
