//! gltfwright - serialization core of a glTF 2.0 authoring library
//!
//! Builds a scene as a property graph ([`graph::Document`]) and flattens it
//! into a strictly index-referenced glTF JSON document plus binary
//! resources ([`writer::write`]), packaged as external files, embedded
//! data URIs, or a single GLB container ([`binary::to_glb`]).

pub mod binary;
pub mod error;
pub mod graph;
pub mod json;
pub mod writer;

// Re-exports for convenience
pub use binary::to_glb;
pub use error::{Error, Result};
pub use writer::{write, NativeDocument, WriteOptions, GLB_BUFFER_URI};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::graph::{
        Accessor, AccessorData, Buffer, Document, ElementType, Material, Mesh, MimeType, Node,
        Primitive, Scene, Texture,
    };
    pub use crate::writer::{write, NativeDocument, WriteOptions};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
