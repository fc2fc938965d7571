//! Property emitters: one per glTF property kind.
//!
//! Emission order matches the driver: materials, meshes, cameras, nodes
//! (transforms only), skins, node attachments, animations, scenes. Nodes
//! are emitted in two passes so attachments can reference the mesh,
//! camera, and skin tables once those exist.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::graph::{AlphaMode, CameraProjection, Material, TextureSlot};
use crate::json;

use super::context::{non_empty_name, WriterContext};
use super::textures::texture_info;

fn slot_info(
    ctx: &mut WriterContext,
    material: &Material,
    slot: TextureSlot,
) -> Result<Option<(usize, u32)>> {
    match material.texture(slot) {
        Some(binding) => texture_info(ctx, binding).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn write_materials(ctx: &mut WriterContext) -> Result<()> {
    let doc = ctx.doc;
    for &key in &doc.root().materials {
        let material = doc.material(key);

        let base_color = slot_info(ctx, material, TextureSlot::BaseColor)?;
        let metallic_roughness = slot_info(ctx, material, TextureSlot::MetallicRoughness)?;
        let normal = slot_info(ctx, material, TextureSlot::Normal)?;
        let occlusion = slot_info(ctx, material, TextureSlot::Occlusion)?;
        let emissive = slot_info(ctx, material, TextureSlot::Emissive)?;

        let def = json::MaterialDef {
            pbr_metallic_roughness: json::PbrMetallicRoughnessDef {
                base_color_factor: material.base_color_factor,
                base_color_texture: base_color
                    .map(|(index, tex_coord)| json::TextureInfoDef { index, tex_coord }),
                metallic_factor: material.metallic_factor,
                roughness_factor: material.roughness_factor,
                metallic_roughness_texture: metallic_roughness
                    .map(|(index, tex_coord)| json::TextureInfoDef { index, tex_coord }),
            },
            normal_texture: normal.map(|(index, tex_coord)| json::NormalTextureInfoDef {
                index,
                tex_coord,
                // the default scale of 1 is implicit
                scale: (material.normal_scale != 1.0).then_some(material.normal_scale),
            }),
            occlusion_texture: occlusion.map(|(index, tex_coord)| {
                json::OcclusionTextureInfoDef {
                    index,
                    tex_coord,
                    strength: (material.occlusion_strength != 1.0)
                        .then_some(material.occlusion_strength),
                }
            }),
            emissive_texture: emissive
                .map(|(index, tex_coord)| json::TextureInfoDef { index, tex_coord }),
            emissive_factor: (material.emissive_factor != [0.0, 0.0, 0.0])
                .then_some(material.emissive_factor),
            alpha_mode: material.alpha_mode.as_str().to_string(),
            alpha_cutoff: (material.alpha_mode == AlphaMode::Mask)
                .then_some(material.alpha_cutoff),
            double_sided: material.double_sided,
            name: non_empty_name(&material.name),
            extras: material.extras.clone(),
            extensions: material.extensions.clone(),
        };
        ctx.material_indices.insert(key, ctx.json.materials.len());
        ctx.json.materials.push(def);
    }
    Ok(())
}

pub(crate) fn write_meshes(ctx: &mut WriterContext) {
    let doc = ctx.doc;
    for &key in &doc.root().meshes {
        let mesh = doc.mesh(key);
        let mut primitives = Vec::with_capacity(mesh.primitives.len());
        for &primitive_key in &mesh.primitives {
            let primitive = doc.primitive(primitive_key);
            let attributes: IndexMap<String, usize> = primitive
                .attributes()
                .iter()
                .map(|(semantic, accessor)| (semantic.clone(), ctx.accessor_indices[accessor]))
                .collect();
            let targets: Vec<IndexMap<String, usize>> = primitive
                .targets()
                .iter()
                .map(|target| {
                    target
                        .attributes()
                        .iter()
                        .map(|(semantic, accessor)| {
                            (semantic.clone(), ctx.accessor_indices[accessor])
                        })
                        .collect()
                })
                .collect();
            primitives.push(json::PrimitiveDef {
                attributes,
                mode: primitive.mode,
                indices: primitive.indices().map(|a| ctx.accessor_indices[&a]),
                material: primitive.material.map(|m| ctx.material_indices[&m]),
                targets,
            });
        }

        // Viewers look up morph target display names on the mesh extras.
        let mut extras = mesh.extras.clone();
        let target_names: Vec<String> = mesh
            .primitives
            .first()
            .map(|&p| doc.primitive(p).targets().iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default();
        if !target_names.is_empty() {
            if !extras.is_object() {
                extras = Value::Object(serde_json::Map::new());
            }
            if let Some(map) = extras.as_object_mut() {
                map.insert(
                    "targetNames".to_string(),
                    Value::from(target_names),
                );
            }
        }

        ctx.mesh_indices.insert(key, ctx.json.meshes.len());
        ctx.json.meshes.push(json::MeshDef {
            primitives,
            weights: mesh.weights.clone(),
            name: non_empty_name(&mesh.name),
            extras,
            extensions: mesh.extensions.clone(),
        });
    }
}

pub(crate) fn write_cameras(ctx: &mut WriterContext) {
    let doc = ctx.doc;
    for &key in &doc.root().cameras {
        let camera = doc.camera(key);
        let (camera_type, perspective, orthographic) = match &camera.projection {
            CameraProjection::Perspective {
                yfov,
                aspect_ratio,
                znear,
                zfar,
            } => (
                "perspective",
                Some(json::PerspectiveDef {
                    yfov: *yfov,
                    aspect_ratio: *aspect_ratio,
                    znear: *znear,
                    zfar: *zfar,
                }),
                None,
            ),
            CameraProjection::Orthographic {
                xmag,
                ymag,
                znear,
                zfar,
            } => (
                "orthographic",
                None,
                Some(json::OrthographicDef {
                    xmag: *xmag,
                    ymag: *ymag,
                    znear: *znear,
                    zfar: *zfar,
                }),
            ),
        };
        ctx.camera_indices.insert(key, ctx.json.cameras.len());
        ctx.json.cameras.push(json::CameraDef {
            camera_type: camera_type.to_string(),
            perspective,
            orthographic,
            name: non_empty_name(&camera.name),
            extras: camera.extras.clone(),
            extensions: camera.extensions.clone(),
        });
    }
}

/// First node pass: transforms and weights only. Attachment indices are
/// filled in by [`attach_nodes`] once the mesh, camera, and skin tables
/// exist.
pub(crate) fn write_nodes(ctx: &mut WriterContext) {
    let doc = ctx.doc;
    for &key in &doc.root().nodes {
        let node = doc.node(key);
        ctx.node_indices.insert(key, ctx.json.nodes.len());
        ctx.json.nodes.push(json::NodeDef {
            translation: node.translation,
            rotation: node.rotation,
            scale: node.scale,
            weights: node.weights.clone(),
            mesh: None,
            camera: None,
            skin: None,
            children: Vec::new(),
            name: non_empty_name(&node.name),
            extras: node.extras.clone(),
            extensions: node.extensions.clone(),
        });
    }
}

pub(crate) fn write_skins(ctx: &mut WriterContext) {
    let doc = ctx.doc;
    for &key in &doc.root().skins {
        let skin = doc.skin(key);
        let def = json::SkinDef {
            inverse_bind_matrices: skin
                .inverse_bind_matrices()
                .map(|a| ctx.accessor_indices[&a]),
            skeleton: skin.skeleton.map(|n| ctx.node_indices[&n]),
            joints: skin.joints.iter().map(|j| ctx.node_indices[j]).collect(),
            name: non_empty_name(&skin.name),
            extras: skin.extras.clone(),
            extensions: skin.extensions.clone(),
        };
        ctx.skin_indices.insert(key, ctx.json.skins.len());
        ctx.json.skins.push(def);
    }
}

/// Second node pass: wire mesh/camera/skin/children indices into the defs
/// emitted by [`write_nodes`].
pub(crate) fn attach_nodes(ctx: &mut WriterContext) {
    let doc = ctx.doc;
    for &key in &doc.root().nodes {
        let node = doc.node(key);
        let mesh = node.mesh.map(|m| ctx.mesh_indices[&m]);
        let camera = node.camera.map(|c| ctx.camera_indices[&c]);
        let skin = node.skin.map(|s| ctx.skin_indices[&s]);
        let children: Vec<usize> = node.children.iter().map(|c| ctx.node_indices[c]).collect();
        let index = ctx.node_indices[&key];
        let def = &mut ctx.json.nodes[index];
        def.mesh = mesh;
        def.camera = camera;
        def.skin = skin;
        def.children = children;
    }
}

pub(crate) fn write_animations(ctx: &mut WriterContext) {
    let doc = ctx.doc;
    for &key in &doc.root().animations {
        let animation = doc.animation(key);
        let samplers: Vec<json::AnimationSamplerDef> = animation
            .samplers()
            .iter()
            .map(|sampler| json::AnimationSamplerDef {
                input: ctx.accessor_indices[&sampler.input()],
                output: ctx.accessor_indices[&sampler.output()],
                interpolation: sampler.interpolation.as_str().to_string(),
            })
            .collect();
        let channels: Vec<json::AnimationChannelDef> = animation
            .channels()
            .iter()
            .map(|channel| json::AnimationChannelDef {
                sampler: channel.sampler,
                target: json::ChannelTargetDef {
                    node: channel.target_node.map(|n| ctx.node_indices[&n]),
                    path: channel.target_path.as_str().to_string(),
                },
            })
            .collect();
        ctx.json.animations.push(json::AnimationDef {
            samplers,
            channels,
            name: non_empty_name(&animation.name),
            extras: animation.extras.clone(),
            extensions: animation.extensions.clone(),
        });
    }
}

pub(crate) fn write_scenes(ctx: &mut WriterContext) {
    let doc = ctx.doc;
    for &key in &doc.root().scenes {
        let scene = doc.scene(key);
        ctx.json.scenes.push(json::SceneDef {
            nodes: scene.nodes.iter().map(|n| ctx.node_indices[n]).collect(),
            name: non_empty_name(&scene.name),
            extras: scene.extras.clone(),
            extensions: scene.extensions.clone(),
        });
    }
    if !ctx.json.scenes.is_empty() {
        ctx.json.scene = Some(0);
    }
}
