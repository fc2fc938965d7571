//! Image emission and sampler/texture deduplication.
//!
//! One image def per root texture. Samplers and textures are synthesized
//! at material slots and deduplicated structurally, so an image shared by
//! many slots with equal settings lands in the JSON exactly once.

use crate::error::Result;
use crate::graph::TextureBinding;
use crate::json;

use super::context::{non_empty_name, WriterContext};

/// Emits an image def for every root texture. GLB and embedded packaging
/// queue the bytes for buffer 0; external packaging writes a resource
/// entry named by the image URI generator.
pub(crate) fn write_images(ctx: &mut WriterContext) {
    let doc = ctx.doc;
    for &texture_key in &doc.root().textures {
        let texture = doc.texture(texture_key);
        let image_index = ctx.json.images.len();
        let mut def = json::ImageDef {
            name: non_empty_name(&texture.name),
            extras: texture.extras.clone(),
            extensions: texture.extensions.clone(),
            ..Default::default()
        };
        if ctx.embeds_images() {
            def.mime_type = Some(texture.mime_type.as_str().to_string());
            ctx.pending_images.push((image_index, texture.image.clone()));
        } else {
            let uri = ctx
                .image_uris
                .create(texture.uri.as_deref(), texture.mime_type.extension());
            ctx.resources.insert(uri.clone(), texture.image.clone());
            def.uri = Some(uri);
        }
        ctx.image_indices.insert(texture_key, image_index);
        ctx.json.images.push(def);
    }
}

/// Resolves one material slot to `(texture index, texCoord)`, appending
/// sampler and texture defs only when their canonical key is unseen.
pub(crate) fn texture_info(
    ctx: &mut WriterContext,
    binding: &TextureBinding,
) -> Result<(usize, u32)> {
    let sampler = &binding.sampler;
    let sampler_def = json::SamplerDef {
        // 0 means the filter was never set; emit nothing for it.
        mag_filter: (sampler.mag_filter != 0).then_some(sampler.mag_filter),
        min_filter: (sampler.min_filter != 0).then_some(sampler.min_filter),
        wrap_s: sampler.wrap_s,
        wrap_t: sampler.wrap_t,
    };
    let sampler_key = serde_json::to_string(&sampler_def)?;
    let sampler_index = match ctx.sampler_defs.get(&sampler_key) {
        Some(&index) => index,
        None => {
            let index = ctx.json.samplers.len();
            ctx.json.samplers.push(sampler_def);
            ctx.sampler_defs.insert(sampler_key, index);
            index
        }
    };

    let texture_def = json::TextureDef {
        sampler: sampler_index,
        source: ctx.image_indices[&binding.texture],
    };
    let texture_key = serde_json::to_string(&texture_def)?;
    let texture_index = match ctx.texture_defs.get(&texture_key) {
        Some(&index) => index,
        None => {
            let index = ctx.json.textures.len();
            ctx.json.textures.push(texture_def);
            ctx.texture_defs.insert(texture_key, index);
            index
        }
    };

    Ok((texture_index, binding.info.tex_coord))
}
