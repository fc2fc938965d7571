//! Per-invocation writer state.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::graph::{Document, PropertyKey};
use crate::json;

use super::uri::UriGenerator;
use super::WriteOptions;

/// Resolved packaging mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Packaging {
    External,
    Embedded,
    Glb,
}

/// All lookup state for one `write` call: the output-index tables, the
/// dedup maps keyed on canonicalized defs, queued image bytes, and the
/// resource map under construction.
pub(crate) struct WriterContext<'a> {
    pub(crate) doc: &'a Document,
    pub(crate) packaging: Packaging,
    pub(crate) json: json::RootDef,
    pub(crate) resources: IndexMap<String, Vec<u8>>,
    pub(crate) accessor_indices: HashMap<PropertyKey, usize>,
    pub(crate) buffer_indices: HashMap<PropertyKey, usize>,
    pub(crate) camera_indices: HashMap<PropertyKey, usize>,
    pub(crate) image_indices: HashMap<PropertyKey, usize>,
    pub(crate) material_indices: HashMap<PropertyKey, usize>,
    pub(crate) mesh_indices: HashMap<PropertyKey, usize>,
    pub(crate) node_indices: HashMap<PropertyKey, usize>,
    pub(crate) skin_indices: HashMap<PropertyKey, usize>,
    pub(crate) sampler_defs: HashMap<String, usize>,
    pub(crate) texture_defs: HashMap<String, usize>,
    /// Image bytes waiting for buffer-view slots in output buffer 0,
    /// keyed by image def index.
    pub(crate) pending_images: Vec<(usize, Vec<u8>)>,
    pub(crate) buffer_uris: UriGenerator,
    pub(crate) image_uris: UriGenerator,
}

impl<'a> WriterContext<'a> {
    pub(crate) fn new(doc: &'a Document, options: &WriteOptions) -> Self {
        let packaging = if options.is_glb {
            Packaging::Glb
        } else if options.embedded {
            Packaging::Embedded
        } else {
            Packaging::External
        };
        let root = doc.root();
        Self {
            doc,
            packaging,
            json: json::RootDef::default(),
            resources: IndexMap::new(),
            accessor_indices: HashMap::new(),
            buffer_indices: HashMap::new(),
            camera_indices: HashMap::new(),
            image_indices: HashMap::new(),
            material_indices: HashMap::new(),
            mesh_indices: HashMap::new(),
            node_indices: HashMap::new(),
            skin_indices: HashMap::new(),
            sampler_defs: HashMap::new(),
            texture_defs: HashMap::new(),
            pending_images: Vec::new(),
            buffer_uris: UriGenerator::new(&options.basename, root.buffers.len() > 1),
            image_uris: UriGenerator::new(&options.basename, root.textures.len() > 1),
        }
    }

    /// Whether images land in buffer 0 instead of external resources.
    pub(crate) fn embeds_images(&self) -> bool {
        matches!(self.packaging, Packaging::Glb | Packaging::Embedded)
    }

    pub(crate) fn finish(self) -> (json::RootDef, IndexMap<String, Vec<u8>>) {
        (self.json, self.resources)
    }
}

/// Empty property names stay off the JSON.
pub(crate) fn non_empty_name(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
