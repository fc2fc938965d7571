//! Mesh and primitive properties.

use indexmap::IndexMap;
use serde_json::Value;

use super::PropertyKey;

/// An alternate set of attribute deltas blended by weights.
#[derive(Debug, Clone, Default)]
pub struct MorphTarget {
    pub name: String,
    pub(crate) attributes: IndexMap<String, PropertyKey>,
}

impl MorphTarget {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Semantic to accessor mapping, in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, PropertyKey> {
        &self.attributes
    }
}

/// A draw call's worth of geometry within a mesh.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    /// Draw mode (glTF `mode`, default 4 = TRIANGLES).
    pub mode: u32,
    pub material: Option<PropertyKey>,
    pub(crate) indices: Option<PropertyKey>,
    pub(crate) attributes: IndexMap<String, PropertyKey>,
    pub(crate) targets: Vec<MorphTarget>,
}

impl Default for Primitive {
    fn default() -> Self {
        Self {
            name: String::new(),
            extras: Value::Null,
            extensions: Value::Null,
            mode: 4,
            material: None,
            indices: None,
            attributes: IndexMap::new(),
            targets: Vec::new(),
        }
    }
}

impl Primitive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn indices(&self) -> Option<PropertyKey> {
        self.indices
    }

    /// Semantic to accessor mapping, in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, PropertyKey> {
        &self.attributes
    }

    #[must_use]
    pub fn targets(&self) -> &[MorphTarget] {
        &self.targets
    }
}

/// A named list of primitives plus default morph weights.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub primitives: Vec<PropertyKey>,
    pub weights: Vec<f32>,
}

impl Mesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
