//! Application-wide constants.

/// File name given to blobs decoded from camera snapshots.
pub const DEFAULT_SNAPSHOT_FILE_NAME: &str = "user-photo.jpg";

/// MIME type of camera snapshots and of blobs decoded from them.
pub const DEFAULT_SNAPSHOT_MIME_TYPE: &str = "image/jpeg";

/// Field name the photo controller binds to when the caller does not pick one.
pub const DEFAULT_PHOTO_FIELD: &str = "foto";

/// MIME type assumed for a data URI that does not declare one (RFC 2397).
pub const DATA_URI_DEFAULT_MIME_TYPE: &str = "text/plain;charset=US-ASCII";

/// Scheme prefix of same-process object references.
pub const OBJECT_URL_PREFIX: &str = "blob:folio/";

/// Context message reported when a camera capture cannot be processed.
pub const PROCESSING_ERROR_CONTEXT: &str = "Failed to process the captured photo";

/// Context message reported when a selected file cannot be used.
pub const SELECTION_ERROR_CONTEXT: &str = "Failed to select the photo";
