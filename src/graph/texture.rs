//! Texture properties.

use serde_json::Value;

/// Image payload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeType {
    Png,
    Jpeg,
}

impl MimeType {
    /// The IANA media type string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension used for external image resources.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

/// Image bytes plus their media type.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub image: Vec<u8>,
    pub mime_type: MimeType,
    /// Pre-set output URI. Takes precedence over the generated name.
    pub uri: Option<String>,
}

impl Texture {
    #[must_use]
    pub fn new(image: Vec<u8>, mime_type: MimeType) -> Self {
        Self {
            name: String::new(),
            extras: Value::Null,
            extensions: Value::Null,
            image,
            mime_type,
            uri: None,
        }
    }
}
