//! Buffer properties.

use serde_json::Value;

/// Identity container grouping the accessors and images that share one
/// output binary file.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    /// Pre-set output URI. Takes precedence over the generated name.
    pub uri: Option<String>,
}

impl Buffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
