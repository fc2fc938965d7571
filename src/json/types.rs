//! Core glTF 2.0 JSON definition types.
//!
//! Nested field omission happens here via `skip_serializing_if`; top-level
//! array stripping is the post-processor's job.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Asset metadata
#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            version: "2.0".to_string(),
            generator: Some(format!("gltfwright v{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// Accessor for typed buffer data
#[derive(Debug, Clone, Serialize)]
pub struct AccessorDef {
    #[serde(rename = "bufferView")]
    pub buffer_view: usize,
    #[serde(rename = "byteOffset")]
    pub byte_offset: usize,
    #[serde(rename = "componentType")]
    pub component_type: u32,
    pub normalized: bool,
    pub count: usize,
    #[serde(rename = "type")]
    pub accessor_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub max: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub min: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Buffer view (slice of a buffer)
#[derive(Debug, Clone, Serialize)]
pub struct BufferViewDef {
    pub buffer: usize,
    #[serde(rename = "byteOffset")]
    pub byte_offset: usize,
    #[serde(rename = "byteLength")]
    pub byte_length: usize,
    #[serde(rename = "byteStride")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_stride: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
}

/// Binary buffer
#[derive(Debug, Clone, Serialize)]
pub struct BufferDef {
    #[serde(rename = "byteLength")]
    pub byte_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Mesh primitive (geometry + material)
#[derive(Debug, Clone, Serialize)]
pub struct PrimitiveDef {
    pub attributes: IndexMap<String, usize>,
    pub mode: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indices: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<IndexMap<String, usize>>,
}

/// Mesh definition
#[derive(Debug, Clone, Serialize)]
pub struct MeshDef {
    pub primitives: Vec<PrimitiveDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Perspective projection parameters
#[derive(Debug, Clone, Serialize)]
pub struct PerspectiveDef {
    pub yfov: f32,
    #[serde(rename = "aspectRatio")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f32>,
    pub znear: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zfar: Option<f32>,
}

/// Orthographic projection parameters
#[derive(Debug, Clone, Serialize)]
pub struct OrthographicDef {
    pub xmag: f32,
    pub ymag: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// Camera definition
#[derive(Debug, Clone, Serialize)]
pub struct CameraDef {
    #[serde(rename = "type")]
    pub camera_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perspective: Option<PerspectiveDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orthographic: Option<OrthographicDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Node in the scene graph
#[derive(Debug, Clone, Serialize)]
pub struct NodeDef {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Skin for skeletal animation
#[derive(Debug, Clone, Serialize)]
pub struct SkinDef {
    #[serde(rename = "inverseBindMatrices")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_bind_matrices: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<usize>,
    pub joints: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Animation sampler (local to one animation)
#[derive(Debug, Clone, Serialize)]
pub struct AnimationSamplerDef {
    pub input: usize,
    pub output: usize,
    pub interpolation: String,
}

/// Channel target: node index plus transform path
#[derive(Debug, Clone, Serialize)]
pub struct ChannelTargetDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<usize>,
    pub path: String,
}

/// Animation channel referencing a sampler by local index
#[derive(Debug, Clone, Serialize)]
pub struct AnimationChannelDef {
    pub sampler: usize,
    pub target: ChannelTargetDef,
}

/// Animation definition
#[derive(Debug, Clone, Serialize)]
pub struct AnimationDef {
    pub samplers: Vec<AnimationSamplerDef>,
    pub channels: Vec<AnimationChannelDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Scene definition
#[derive(Debug, Clone, Serialize)]
pub struct SceneDef {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Complete glTF document root. Arrays serialize unconditionally; the
/// post-processor strips the empty ones from the final value.
#[derive(Debug, Default, Serialize)]
pub struct RootDef {
    pub asset: Asset,
    pub accessors: Vec<AccessorDef>,
    #[serde(rename = "bufferViews")]
    pub buffer_views: Vec<BufferViewDef>,
    pub buffers: Vec<BufferDef>,
    pub images: Vec<super::ImageDef>,
    pub samplers: Vec<super::SamplerDef>,
    pub textures: Vec<super::TextureDef>,
    pub materials: Vec<super::MaterialDef>,
    pub meshes: Vec<MeshDef>,
    pub cameras: Vec<CameraDef>,
    pub nodes: Vec<NodeDef>,
    pub skins: Vec<SkinDef>,
    pub animations: Vec<AnimationDef>,
    pub scenes: Vec<SceneDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<usize>,
}
