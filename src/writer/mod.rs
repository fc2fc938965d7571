//! glTF document writer.
//!
//! Flattens a [`Document`](crate::graph::Document) property graph into a
//! [`NativeDocument`]: the glTF JSON value plus named binary resources,
//! ready for an external packager to put on disk.

mod accessors;
mod context;
mod postprocess;
mod properties;
mod textures;
mod uri;

use indexmap::IndexMap;

use crate::error::Result;
use crate::graph::Document;

use context::WriterContext;

/// Reserved resource URI of the binary chunk in GLB packaging. Never
/// collides with generated or pre-set URIs: GLB mode ignores them and the
/// other modes never emit it.
pub const GLB_BUFFER_URI: &str = "@glb.bin";

/// Output packaging controls.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Stem for generated resource URIs.
    pub basename: String,
    /// Pack a single binary chunk for a GLB container.
    pub is_glb: bool,
    /// Inline buffers as base64 data URIs. Ignored when `is_glb` is set.
    pub embedded: bool,
}

impl WriteOptions {
    #[must_use]
    pub fn new(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            is_glb: false,
            embedded: false,
        }
    }
}

/// The in-memory write result: glTF JSON plus a URI-to-bytes resource map.
#[derive(Debug)]
pub struct NativeDocument {
    pub json: serde_json::Value,
    pub resources: IndexMap<String, Vec<u8>>,
}

/// Serializes a property graph to a native glTF document.
///
/// The input graph is read-only; all lookup tables, packed buffers, and
/// URI counters live for this call only. Output array indices are
/// deterministic given the graph's property and attribute ordering.
///
/// # Errors
/// Returns an error when the graph wires an accessor into conflicting
/// roles, parents a buffer on a non-accessor, interleaves accessors of
/// differing counts, or requests GLB packaging the container cannot
/// express. On error no partial output is returned.
pub fn write(doc: &Document, options: &WriteOptions) -> Result<NativeDocument> {
    let mut ctx = WriterContext::new(doc, options);

    textures::write_images(&mut ctx);
    accessors::write_buffers(&mut ctx)?;
    properties::write_materials(&mut ctx)?;
    properties::write_meshes(&mut ctx);
    properties::write_cameras(&mut ctx);
    properties::write_nodes(&mut ctx);
    properties::write_skins(&mut ctx);
    properties::attach_nodes(&mut ctx);
    properties::write_animations(&mut ctx);
    properties::write_scenes(&mut ctx);

    let (root, resources) = ctx.finish();
    tracing::debug!(
        "serialized {} accessors into {} buffer views across {} buffers",
        root.accessors.len(),
        root.buffer_views.len(),
        root.buffers.len()
    );
    let mut json = serde_json::to_value(&root)?;
    postprocess::clean_root(&mut json);
    Ok(NativeDocument { json, resources })
}
