//! Folio Photo Processing Library
//!
//! This crate converts photos between binary blobs and data URIs and checks
//! them against the advertised capture constraints.

pub mod codec;
pub mod data_uri;
pub mod object_url;
pub mod validator;

// Re-export commonly used types
pub use codec::MediaCodec;
pub use data_uri::DataUri;
pub use object_url::ObjectUrlRegistry;
pub use validator::MediaValidator;
