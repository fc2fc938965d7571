//! glTF 2.0 material, texture, and image JSON types.

use serde::Serialize;
use serde_json::Value;

/// Image definition: external URI or embedded buffer view
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "mimeType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(rename = "bufferView")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}

/// Texture sampler defining filtering and wrapping
#[derive(Debug, Clone, Serialize)]
pub struct SamplerDef {
    #[serde(rename = "magFilter")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mag_filter: Option<u32>,
    #[serde(rename = "minFilter")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_filter: Option<u32>,
    #[serde(rename = "wrapS")]
    pub wrap_s: u32,
    #[serde(rename = "wrapT")]
    pub wrap_t: u32,
}

/// Texture referencing an image and sampler
#[derive(Debug, Clone, Serialize)]
pub struct TextureDef {
    pub sampler: usize,
    pub source: usize,
}

/// Texture info used in materials
#[derive(Debug, Clone, Serialize)]
pub struct TextureInfoDef {
    pub index: usize,
    #[serde(rename = "texCoord")]
    pub tex_coord: u32,
}

/// Normal texture info with scale
#[derive(Debug, Clone, Serialize)]
pub struct NormalTextureInfoDef {
    pub index: usize,
    #[serde(rename = "texCoord")]
    pub tex_coord: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

/// Occlusion texture info with strength
#[derive(Debug, Clone, Serialize)]
pub struct OcclusionTextureInfoDef {
    pub index: usize,
    #[serde(rename = "texCoord")]
    pub tex_coord: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f32>,
}

/// PBR Metallic-Roughness material model
#[derive(Debug, Clone, Serialize)]
pub struct PbrMetallicRoughnessDef {
    #[serde(rename = "baseColorFactor")]
    pub base_color_factor: [f32; 4],
    #[serde(rename = "baseColorTexture")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_color_texture: Option<TextureInfoDef>,
    #[serde(rename = "metallicFactor")]
    pub metallic_factor: f32,
    #[serde(rename = "roughnessFactor")]
    pub roughness_factor: f32,
    #[serde(rename = "metallicRoughnessTexture")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metallic_roughness_texture: Option<TextureInfoDef>,
}

/// Material definition
#[derive(Debug, Clone, Serialize)]
pub struct MaterialDef {
    #[serde(rename = "pbrMetallicRoughness")]
    pub pbr_metallic_roughness: PbrMetallicRoughnessDef,
    #[serde(rename = "normalTexture")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_texture: Option<NormalTextureInfoDef>,
    #[serde(rename = "occlusionTexture")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occlusion_texture: Option<OcclusionTextureInfoDef>,
    #[serde(rename = "emissiveTexture")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_texture: Option<TextureInfoDef>,
    #[serde(rename = "emissiveFactor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_factor: Option<[f32; 3]>,
    #[serde(rename = "alphaMode")]
    pub alpha_mode: String,
    #[serde(rename = "alphaCutoff")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_cutoff: Option<f32>,
    #[serde(rename = "doubleSided")]
    pub double_sided: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extras: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extensions: Value,
}
