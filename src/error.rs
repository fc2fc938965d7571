//! Error types for `gltfwright`

use thiserror::Error;

/// The error type for `gltfwright` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Graph Shape Errors ====================
    /// An accessor is wired as more than one of attribute, index, other.
    #[error("attribute or index accessors must be used only for that purpose")]
    AccessorRoleConflict,

    /// A buffer has a parent property that is not an accessor.
    #[error("unexpected parent of buffer: {kind}")]
    UnexpectedBufferParent {
        /// The kind name of the offending parent property.
        kind: &'static str,
    },

    // ==================== Packing Errors ====================
    /// Interleaved accessors must share a single element count.
    #[error("interleaved accessors must share one count: expected {expected}, found {found}")]
    InterleaveCountMismatch {
        /// The count of the first accessor in the group.
        expected: usize,
        /// The mismatching count.
        found: usize,
    },

    // ==================== Packaging Errors ====================
    /// GLB output packs exactly one binary chunk.
    #[error("GLB output supports a single buffer, found {count}")]
    GlbMultipleBuffers {
        /// The number of non-empty buffers encountered, including the one
        /// that raised the conflict. Empty buffers are skipped and never
        /// counted.
        count: usize,
    },

    /// Image bytes were queued for the container buffer, but the document
    /// has no buffer to carry them.
    #[error("document has image data but no buffer to embed it in")]
    MissingGlbBuffer,

    // ==================== Serialization Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for `gltfwright` operations.
pub type Result<T> = std::result::Result<T, Error>;
