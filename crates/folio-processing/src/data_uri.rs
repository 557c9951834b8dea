//! Data URI parsing and encoding
//!
//! Grammar: `data:[<mime>][;<param>]*[;base64],<payload>`. Base64 payloads are
//! decoded leniently (ASCII whitespace ignored, padding optional); anything else
//! is percent-decoded.

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use bytes::Bytes;
use percent_encoding::percent_decode_str;

use folio_core::constants::DATA_URI_DEFAULT_MIME_TYPE;
use folio_core::CaptureError;

const SCHEME: &str = "data:";

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: Bytes,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Cheap check that a string uses the `data:` scheme
    pub fn is_data_uri(value: &str) -> bool {
        value
            .trim_start()
            .get(..SCHEME.len())
            .map(|s| s.eq_ignore_ascii_case(SCHEME))
            .unwrap_or(false)
    }

    pub fn parse(value: &str) -> Result<Self, CaptureError> {
        let value = value.trim();
        if !Self::is_data_uri(value) {
            return Err(CaptureError::decode("missing 'data:' scheme"));
        }
        let rest = &value[SCHEME.len()..];

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CaptureError::decode("missing ',' between header and payload"))?;

        let mut segments = header.split(';').map(str::trim);
        let essence = segments.next().unwrap_or("").to_ascii_lowercase();
        let params: Vec<&str> = segments.collect();

        let is_base64 = params
            .last()
            .map(|p| p.eq_ignore_ascii_case("base64"))
            .unwrap_or(false);

        let mime_type = if essence.is_empty() {
            DATA_URI_DEFAULT_MIME_TYPE.to_string()
        } else if is_valid_essence(&essence) {
            essence
        } else {
            return Err(CaptureError::decode(format!(
                "invalid media type '{}'",
                essence
            )));
        };

        let data = if is_base64 {
            let compact: String = payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            LENIENT
                .decode(compact.as_bytes())
                .map_err(|e| CaptureError::decode(format!("invalid base64 payload: {}", e)))?
        } else {
            percent_decode_str(payload).collect::<Vec<u8>>()
        };

        Ok(Self {
            mime_type,
            data: Bytes::from(data),
        })
    }

    /// Encode bytes as a base64 data URI
    pub fn encode(mime_type: &str, data: &[u8]) -> String {
        format!("{}{};base64,{}", SCHEME, mime_type, STANDARD.encode(data))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::encode(&self.mime_type, &self.data))
    }
}

fn is_valid_essence(essence: &str) -> bool {
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    let token = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
    };
    token(kind) && token(subtype)
}
