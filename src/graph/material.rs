//! Material properties.

use serde_json::Value;

use super::PropertyKey;

/// Alpha rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

impl AlphaMode {
    /// The glTF `alphaMode` string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opaque => "OPAQUE",
            Self::Mask => "MASK",
            Self::Blend => "BLEND",
        }
    }
}

/// Per-use-site texture data: which UV set the slot samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureInfo {
    pub tex_coord: u32,
}

/// Per-use-site filtering and wrapping configuration. A filter of `0`
/// means unset and emits no field.
#[derive(Debug, Clone, Copy)]
pub struct TextureSampler {
    pub wrap_s: u32,
    pub wrap_t: u32,
    pub min_filter: u32,
    pub mag_filter: u32,
}

impl Default for TextureSampler {
    fn default() -> Self {
        Self {
            wrap_s: 10497, // REPEAT
            wrap_t: 10497,
            min_filter: 0,
            mag_filter: 0,
        }
    }
}

/// A material slot's `(Texture, TextureInfo, TextureSampler)` triple.
#[derive(Debug, Clone)]
pub struct TextureBinding {
    pub texture: PropertyKey,
    pub info: TextureInfo,
    pub sampler: TextureSampler,
}

impl TextureBinding {
    #[must_use]
    pub fn new(texture: PropertyKey) -> Self {
        Self {
            texture,
            info: TextureInfo::default(),
            sampler: TextureSampler::default(),
        }
    }
}

/// The five texture slots of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    BaseColor,
    MetallicRoughness,
    Normal,
    Occlusion,
    Emissive,
}

/// PBR metallic-roughness material.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub base_color_factor: [f32; 4],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub emissive_factor: [f32; 3],
    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: f32,
    pub double_sided: bool,
    pub normal_scale: f32,
    pub occlusion_strength: f32,
    pub(crate) base_color_texture: Option<TextureBinding>,
    pub(crate) metallic_roughness_texture: Option<TextureBinding>,
    pub(crate) normal_texture: Option<TextureBinding>,
    pub(crate) occlusion_texture: Option<TextureBinding>,
    pub(crate) emissive_texture: Option<TextureBinding>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            extras: Value::Null,
            extensions: Value::Null,
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            emissive_factor: [0.0, 0.0, 0.0],
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            normal_scale: 1.0,
            occlusion_strength: 1.0,
            base_color_texture: None,
            metallic_roughness_texture: None,
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
        }
    }
}

impl Material {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The binding attached to `slot`, if any.
    #[must_use]
    pub fn texture(&self, slot: TextureSlot) -> Option<&TextureBinding> {
        match slot {
            TextureSlot::BaseColor => self.base_color_texture.as_ref(),
            TextureSlot::MetallicRoughness => self.metallic_roughness_texture.as_ref(),
            TextureSlot::Normal => self.normal_texture.as_ref(),
            TextureSlot::Occlusion => self.occlusion_texture.as_ref(),
            TextureSlot::Emissive => self.emissive_texture.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: TextureSlot) -> &mut Option<TextureBinding> {
        match slot {
            TextureSlot::BaseColor => &mut self.base_color_texture,
            TextureSlot::MetallicRoughness => &mut self.metallic_roughness_texture,
            TextureSlot::Normal => &mut self.normal_texture,
            TextureSlot::Occlusion => &mut self.occlusion_texture,
            TextureSlot::Emissive => &mut self.emissive_texture,
        }
    }
}
