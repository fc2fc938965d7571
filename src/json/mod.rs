//! glTF 2.0 JSON definition types.
//!
//! These structs mirror the glTF schema shape the writer emits; they carry
//! no graph semantics of their own.

mod materials;
mod types;

pub use materials::{
    ImageDef, MaterialDef, NormalTextureInfoDef, OcclusionTextureInfoDef,
    PbrMetallicRoughnessDef, SamplerDef, TextureDef, TextureInfoDef,
};
pub use types::{
    AccessorDef, AnimationChannelDef, AnimationDef, AnimationSamplerDef, Asset, BufferDef,
    BufferViewDef, CameraDef, ChannelTargetDef, MeshDef, NodeDef, OrthographicDef,
    PerspectiveDef, PrimitiveDef, RootDef, SceneDef, SkinDef,
};
