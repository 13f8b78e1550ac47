//! Encoded image payloads.

use serde::{Deserialize, Serialize};

/// A base64-encoded image together with its MIME type.
///
/// `data` never carries the `data:...;base64,` prefix; `data_uri()` adds
/// it for self-describing storage and display, `parse_data_uri()` strips
/// it back off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

impl EncodedImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Render as a `data:` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Parse a `data:` URI back into an encoded image. A bare base64
    /// string without the prefix is accepted and assumed to be PNG.
    pub fn parse_data_uri(uri: &str) -> Self {
        let Some(rest) = uri.strip_prefix("data:") else {
            return Self::new(uri, "image/png");
        };
        match rest.split_once(";base64,") {
            Some((mime, data)) => Self::new(data, mime),
            None => Self::new(uri, "image/png"),
        }
    }
}
