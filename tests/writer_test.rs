use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

use gltfwright::graph::{
    Accessor, AccessorData, AlphaMode, Animation, Buffer, Camera, CameraProjection, Document,
    ElementType, Interpolation, Material, Mesh, MimeType, Node, Primitive, PropertyKey, Scene,
    Skin, TargetPath, Texture, TextureBinding, TextureSlot,
};
use gltfwright::{to_glb, write, Error, WriteOptions, GLB_BUFFER_URI};

fn options(basename: &str) -> WriteOptions {
    WriteOptions::new(basename)
}

fn glb_options(basename: &str) -> WriteOptions {
    WriteOptions {
        basename: basename.to_string(),
        is_glb: true,
        embedded: false,
    }
}

fn embedded_options(basename: &str) -> WriteOptions {
    WriteOptions {
        basename: basename.to_string(),
        is_glb: false,
        embedded: true,
    }
}

/// One triangle: POSITION + NORMAL (VEC3/F32, count 3) and u16 indices.
fn triangle_doc() -> (Document, PropertyKey) {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::new());
    let indices = doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::U16(vec![0, 1, 2])),
        buffer,
    );
    let position = doc.create_accessor(
        Accessor::new(
            ElementType::Vec3,
            AccessorData::F32(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ),
        buffer,
    );
    let normal = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0, 0.0, 1.0].repeat(3))),
        buffer,
    );
    let primitive = doc.create_primitive(Primitive::new());
    doc.set_primitive_attribute(primitive, "POSITION", position);
    doc.set_primitive_attribute(primitive, "NORMAL", normal);
    doc.set_primitive_indices(primitive, indices);
    let mesh = doc.create_mesh(Mesh::new());
    doc.add_mesh_primitive(mesh, primitive);
    (doc, mesh)
}

// ==================== End-to-end scenarios ====================

#[test]
fn test_minimal_material() {
    let mut doc = Document::new();
    let material = doc.create_material(Material::new());
    {
        let m = doc.material_mut(material);
        m.base_color_factor = [1.0, 0.0, 0.0, 1.0];
        m.alpha_mode = AlphaMode::Mask;
        m.alpha_cutoff = 0.33;
        m.double_sided = true;
    }
    let native = write(&doc, &options("mat")).unwrap();

    let def = &native.json["materials"][0];
    let keys: Vec<&String> = def.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["pbrMetallicRoughness", "alphaMode", "alphaCutoff", "doubleSided"]
    );
    assert_eq!(def["alphaMode"], "MASK");
    assert!((def["alphaCutoff"].as_f64().unwrap() - 0.33).abs() < 1e-6);
    assert_eq!(def["doubleSided"], true);

    let pbr = &def["pbrMetallicRoughness"];
    assert_eq!(pbr["baseColorFactor"], serde_json::json!([1.0, 0.0, 0.0, 1.0]));
    assert_eq!(pbr["metallicFactor"], serde_json::json!(1.0));
    assert_eq!(pbr["roughnessFactor"], serde_json::json!(1.0));
}

#[test]
fn test_shared_sampler_and_texture_dedup() {
    let mut doc = Document::new();
    let texture = doc.create_texture(Texture::new(vec![0x89, 0x50, 0x4E, 0x47], MimeType::Png));
    for _ in 0..2 {
        let material = doc.create_material(Material::new());
        doc.set_material_texture(
            material,
            TextureSlot::BaseColor,
            Some(TextureBinding::new(texture)),
        );
    }
    let native = write(&doc, &options("shared")).unwrap();

    assert_eq!(native.json["samplers"].as_array().unwrap().len(), 1);
    assert_eq!(native.json["textures"].as_array().unwrap().len(), 1);
    assert_eq!(native.json["images"].as_array().unwrap().len(), 1);
    assert_eq!(
        native.json["materials"][0]["pbrMetallicRoughness"]["baseColorTexture"]["index"],
        native.json["materials"][1]["pbrMetallicRoughness"]["baseColorTexture"]["index"],
    );
}

#[test]
fn test_interleaved_primitive() {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::new());
    let position = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0; 9])),
        buffer,
    );
    let normal = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(vec![1.0; 9])),
        buffer,
    );
    let primitive = doc.create_primitive(Primitive::new());
    doc.set_primitive_attribute(primitive, "POSITION", position);
    doc.set_primitive_attribute(primitive, "NORMAL", normal);
    let mesh = doc.create_mesh(Mesh::new());
    doc.add_mesh_primitive(mesh, primitive);

    let native = write(&doc, &options("tri")).unwrap();
    let views = native.json["bufferViews"].as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["byteStride"], 24);
    assert_eq!(views[0]["byteLength"], 72);
    assert_eq!(views[0]["target"], 34962);

    let accessors = native.json["accessors"].as_array().unwrap();
    assert_eq!(accessors[0]["byteOffset"], 0);
    assert_eq!(accessors[1]["byteOffset"], 12);
    let attrs = &native.json["meshes"][0]["primitives"][0]["attributes"];
    assert_eq!(attrs["POSITION"], 0);
    assert_eq!(attrs["NORMAL"], 1);
}

#[test]
fn test_glb_single_buffer_with_texture() {
    let (mut doc, _) = triangle_doc();
    let texture = doc.create_texture(Texture::new(vec![1, 2, 3, 4, 5], MimeType::Png));
    let material = doc.create_material(Material::new());
    doc.set_material_texture(
        material,
        TextureSlot::BaseColor,
        Some(TextureBinding::new(texture)),
    );

    let native = write(&doc, &glb_options("model")).unwrap();

    assert_eq!(native.resources.len(), 1);
    assert!(native.resources.contains_key(GLB_BUFFER_URI));

    let image = &native.json["images"][0];
    assert!(image.get("uri").is_none());
    assert_eq!(image["mimeType"], "image/png");
    assert!(image.get("bufferView").is_some());

    let buffer = &native.json["buffers"][0];
    assert!(buffer.get("uri").is_none());
    assert_eq!(
        buffer["byteLength"].as_u64().unwrap() as usize,
        native.resources[GLB_BUFFER_URI].len()
    );

    // the image view is the last one and lives in buffer 0
    let views = native.json["bufferViews"].as_array().unwrap();
    let image_view = &views[image["bufferView"].as_u64().unwrap() as usize];
    assert_eq!(image_view["buffer"], 0);
    assert_eq!(image_view["byteLength"], 5);
}

#[test]
fn test_external_multi_buffer_naming() {
    let mut doc = Document::new();
    for _ in 0..2 {
        let buffer = doc.create_buffer(Buffer::new());
        doc.create_accessor(
            Accessor::new(ElementType::Scalar, AccessorData::F32(vec![1.0])),
            buffer,
        );
    }
    let native = write(&doc, &options("scene")).unwrap();

    let keys: Vec<&String> = native.resources.keys().collect();
    assert_eq!(keys, vec!["scene_1.bin", "scene_2.bin"]);
    assert_eq!(native.json["buffers"][0]["uri"], "scene_1.bin");
    assert_eq!(native.json["buffers"][1]["uri"], "scene_2.bin");
}

#[test]
fn test_empty_buffer_is_skipped() {
    let mut doc = Document::new();
    doc.create_buffer(Buffer::new()); // referenced by nothing
    let used = doc.create_buffer(Buffer::new());
    doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::U32(vec![42])),
        used,
    );
    let native = write(&doc, &options("sparse")).unwrap();

    let buffers = native.json["buffers"].as_array().unwrap();
    assert_eq!(buffers.len(), 1);
    // the surviving buffer keeps a correct, zero-based view reference
    assert_eq!(native.json["bufferViews"][0]["buffer"], 0);
}

// ==================== Boundary behaviors ====================

#[test]
fn test_empty_document_strips_empty_arrays() {
    let doc = Document::new();
    let native = write(&doc, &options("empty")).unwrap();

    let keys: Vec<&String> = native.json.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["asset"]);
    assert!(native.resources.is_empty());
}

#[test]
fn test_preset_uris_take_precedence() {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer {
        uri: Some("custom/geometry.bin".to_string()),
        ..Buffer::new()
    });
    doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::U8(vec![1, 2, 3, 4])),
        buffer,
    );
    let mut texture = Texture::new(vec![9, 9], MimeType::Jpeg);
    texture.uri = Some("textures/wood.jpeg".to_string());
    doc.create_texture(texture);

    let native = write(&doc, &options("ignored")).unwrap();
    assert!(native.resources.contains_key("custom/geometry.bin"));
    assert!(native.resources.contains_key("textures/wood.jpeg"));
    assert_eq!(native.json["images"][0]["uri"], "textures/wood.jpeg");
}

#[test]
fn test_normal_scale_and_occlusion_strength_omitted_iff_one() {
    let mut doc = Document::new();
    let texture = doc.create_texture(Texture::new(vec![1], MimeType::Png));

    let plain = doc.create_material(Material::new());
    doc.set_material_texture(plain, TextureSlot::Normal, Some(TextureBinding::new(texture)));
    doc.set_material_texture(plain, TextureSlot::Occlusion, Some(TextureBinding::new(texture)));

    let scaled = doc.create_material(Material::new());
    doc.material_mut(scaled).normal_scale = 0.5;
    doc.material_mut(scaled).occlusion_strength = 0.25;
    doc.set_material_texture(scaled, TextureSlot::Normal, Some(TextureBinding::new(texture)));
    doc.set_material_texture(scaled, TextureSlot::Occlusion, Some(TextureBinding::new(texture)));

    let native = write(&doc, &options("mats")).unwrap();
    let materials = native.json["materials"].as_array().unwrap();
    assert!(materials[0]["normalTexture"].get("scale").is_none());
    assert!(materials[0]["occlusionTexture"].get("strength").is_none());
    assert_eq!(materials[1]["normalTexture"]["scale"], serde_json::json!(0.5));
    assert_eq!(
        materials[1]["occlusionTexture"]["strength"],
        serde_json::json!(0.25)
    );
}

#[test]
fn test_alpha_cutoff_only_in_mask_mode() {
    let mut doc = Document::new();
    for mode in [AlphaMode::Opaque, AlphaMode::Blend, AlphaMode::Mask] {
        let key = doc.create_material(Material::new());
        doc.material_mut(key).alpha_mode = mode;
    }
    let native = write(&doc, &options("alpha")).unwrap();
    let materials = native.json["materials"].as_array().unwrap();
    assert!(materials[0].get("alphaCutoff").is_none());
    assert!(materials[1].get("alphaCutoff").is_none());
    assert!(materials[2].get("alphaCutoff").is_some());
    assert_eq!(materials[2]["alphaMode"], "MASK");
}

// ==================== Invariants ====================

#[test]
fn test_buffer_byte_length_matches_resources() {
    let (doc, _) = triangle_doc();

    let external = write(&doc, &options("len")).unwrap();
    let byte_length = external.json["buffers"][0]["byteLength"].as_u64().unwrap() as usize;
    assert_eq!(byte_length, external.resources["len.bin"].len());

    let embedded = write(&doc, &embedded_options("len")).unwrap();
    assert!(embedded.resources.is_empty());
    let uri = embedded.json["buffers"][0]["uri"].as_str().unwrap();
    let prefix = "data:application/octet-stream;base64,";
    assert!(uri.starts_with(prefix));
    let decoded = BASE64.decode(&uri[prefix.len()..]).unwrap();
    let byte_length = embedded.json["buffers"][0]["byteLength"].as_u64().unwrap() as usize;
    assert_eq!(byte_length, decoded.len());
}

#[test]
fn test_buffer_view_offsets_are_aligned() {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::new());
    // odd-length index accessor forces padding before the attribute view
    let indices = doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::U16(vec![0, 1, 2])),
        buffer,
    );
    let position = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0; 9])),
        buffer,
    );
    let weights = doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::U8(vec![1, 2, 3, 4, 5])),
        buffer,
    );
    let primitive = doc.create_primitive(Primitive::new());
    doc.set_primitive_attribute(primitive, "POSITION", position);
    doc.set_primitive_indices(primitive, indices);
    let mesh = doc.create_mesh(Mesh::new());
    doc.add_mesh_primitive(mesh, primitive);
    let _ = weights; // left unreferenced: lands in the "other" view

    let native = write(&doc, &options("align")).unwrap();
    for view in native.json["bufferViews"].as_array().unwrap() {
        assert_eq!(view["byteOffset"].as_u64().unwrap() % 4, 0);
    }
}

#[test]
fn test_interleaved_views_share_count_and_stride() {
    let (doc, _) = triangle_doc();
    let native = write(&doc, &options("stride")).unwrap();

    let views = native.json["bufferViews"].as_array().unwrap();
    let accessors = native.json["accessors"].as_array().unwrap();
    for (view_index, view) in views.iter().enumerate() {
        let Some(stride) = view.get("byteStride").and_then(Value::as_u64) else {
            continue;
        };
        let members: Vec<&Value> = accessors
            .iter()
            .filter(|a| a["bufferView"].as_u64().unwrap() as usize == view_index)
            .collect();
        let count = members[0]["count"].as_u64().unwrap();
        for member in &members {
            assert_eq!(member["count"].as_u64().unwrap(), count);
        }
        assert_eq!(view["byteLength"].as_u64().unwrap(), stride * count);
    }
}

#[test]
fn test_component_type_round_trip() {
    let positions = vec![0.5f32, -1.25, 3.75, 2.0, 0.125, -8.5];
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::new());
    let indices = doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::U16(vec![2, 0, 1])),
        buffer,
    );
    let position = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(positions.clone())),
        buffer,
    );
    let primitive = doc.create_primitive(Primitive::new());
    doc.set_primitive_attribute(primitive, "POSITION", position);
    doc.set_primitive_indices(primitive, indices);
    let mesh = doc.create_mesh(Mesh::new());
    doc.add_mesh_primitive(mesh, primitive);

    let native = write(&doc, &options("bytes")).unwrap();
    let blob = &native.resources["bytes.bin"];
    let views = native.json["bufferViews"].as_array().unwrap();
    let accessors = native.json["accessors"].as_array().unwrap();

    // index accessor: concatenated u16
    let index_def = &accessors[0];
    assert_eq!(index_def["componentType"], 5123);
    let view = &views[index_def["bufferView"].as_u64().unwrap() as usize];
    let start = view["byteOffset"].as_u64().unwrap() as usize
        + index_def["byteOffset"].as_u64().unwrap() as usize;
    let read: Vec<u16> = (0..3)
        .map(|i| u16::from_le_bytes([blob[start + 2 * i], blob[start + 2 * i + 1]]))
        .collect();
    assert_eq!(read, vec![2, 0, 1]);

    // position accessor: strided f32
    let pos_def = &accessors[1];
    assert_eq!(pos_def["componentType"], 5126);
    let view = &views[pos_def["bufferView"].as_u64().unwrap() as usize];
    let stride = view["byteStride"].as_u64().unwrap() as usize;
    let base = view["byteOffset"].as_u64().unwrap() as usize
        + pos_def["byteOffset"].as_u64().unwrap() as usize;
    let mut read = Vec::new();
    for element in 0..2 {
        for component in 0..3 {
            let at = base + element * stride + component * 4;
            read.push(f32::from_le_bytes([
                blob[at],
                blob[at + 1],
                blob[at + 2],
                blob[at + 3],
            ]));
        }
    }
    assert_eq!(read, positions);
}

#[test]
fn test_index_fields_are_in_bounds() {
    let native = write(&full_doc(), &options("full")).unwrap();
    let json = &native.json;

    let accessors = json["accessors"].as_array().unwrap().len();
    let views = json["bufferViews"].as_array().unwrap().len();
    let buffers = json["buffers"].as_array().unwrap().len();
    let nodes = json["nodes"].as_array().unwrap().len();

    for accessor in json["accessors"].as_array().unwrap() {
        assert!((accessor["bufferView"].as_u64().unwrap() as usize) < views);
    }
    for view in json["bufferViews"].as_array().unwrap() {
        assert!((view["buffer"].as_u64().unwrap() as usize) < buffers);
    }
    for image in json["images"].as_array().unwrap() {
        if let Some(view) = image.get("bufferView") {
            assert!((view.as_u64().unwrap() as usize) < views);
        }
    }
    for texture in json["textures"].as_array().unwrap() {
        assert!(
            (texture["source"].as_u64().unwrap() as usize)
                < json["images"].as_array().unwrap().len()
        );
        assert!(
            (texture["sampler"].as_u64().unwrap() as usize)
                < json["samplers"].as_array().unwrap().len()
        );
    }
    for mesh in json["meshes"].as_array().unwrap() {
        for primitive in mesh["primitives"].as_array().unwrap() {
            for (_, index) in primitive["attributes"].as_object().unwrap() {
                assert!((index.as_u64().unwrap() as usize) < accessors);
            }
            if let Some(indices) = primitive.get("indices") {
                assert!((indices.as_u64().unwrap() as usize) < accessors);
            }
            if let Some(material) = primitive.get("material") {
                assert!(
                    (material.as_u64().unwrap() as usize)
                        < json["materials"].as_array().unwrap().len()
                );
            }
        }
    }
    for skin in json["skins"].as_array().unwrap() {
        for joint in skin["joints"].as_array().unwrap() {
            assert!((joint.as_u64().unwrap() as usize) < nodes);
        }
        if let Some(ibm) = skin.get("inverseBindMatrices") {
            assert!((ibm.as_u64().unwrap() as usize) < accessors);
        }
    }
    for animation in json["animations"].as_array().unwrap() {
        let samplers = animation["samplers"].as_array().unwrap();
        for sampler in samplers {
            assert!((sampler["input"].as_u64().unwrap() as usize) < accessors);
            assert!((sampler["output"].as_u64().unwrap() as usize) < accessors);
        }
        for channel in animation["channels"].as_array().unwrap() {
            assert!((channel["sampler"].as_u64().unwrap() as usize) < samplers.len());
            assert!((channel["target"]["node"].as_u64().unwrap() as usize) < nodes);
        }
    }
    for scene in json["scenes"].as_array().unwrap() {
        for node in scene["nodes"].as_array().unwrap() {
            assert!((node.as_u64().unwrap() as usize) < nodes);
        }
    }
}

// ==================== Whole-graph emission ====================

/// A document exercising every property kind at once.
fn full_doc() -> Document {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::new());

    let indices = doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::U16(vec![0, 1, 2])),
        buffer,
    );
    let position = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0; 9])),
        buffer,
    );
    let ibm = doc.create_accessor(
        Accessor::new(ElementType::Mat4, AccessorData::F32(vec![0.0; 32])),
        buffer,
    );
    let times = doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::F32(vec![0.0, 1.0])),
        buffer,
    );
    let rotations = doc.create_accessor(
        Accessor::new(ElementType::Vec4, AccessorData::F32(vec![0.0; 8])),
        buffer,
    );

    let texture = doc.create_texture(Texture::new(vec![7; 11], MimeType::Jpeg));
    let material = doc.create_material(Material::new());
    doc.set_material_texture(
        material,
        TextureSlot::BaseColor,
        Some(TextureBinding::new(texture)),
    );

    let primitive = doc.create_primitive(Primitive::new());
    doc.set_primitive_attribute(primitive, "POSITION", position);
    doc.set_primitive_indices(primitive, indices);
    doc.set_primitive_material(primitive, material);
    let mesh = doc.create_mesh(Mesh::new());
    doc.add_mesh_primitive(mesh, primitive);

    let camera = doc.create_camera(Camera::new(CameraProjection::Perspective {
        yfov: 0.66,
        aspect_ratio: Some(1.5),
        znear: 0.01,
        zfar: Some(100.0),
    }));

    let root_node = doc.create_node(Node::new());
    let joint_a = doc.create_node(Node::new());
    let joint_b = doc.create_node(Node::new());
    let camera_node = doc.create_node(Node::new());
    doc.add_node_child(root_node, joint_a);
    doc.add_node_child(joint_a, joint_b);
    doc.set_node_mesh(root_node, mesh);
    doc.set_node_camera(camera_node, camera);

    let skin = doc.create_skin(Skin::new());
    doc.set_skin_inverse_bind_matrices(skin, ibm);
    doc.add_skin_joint(skin, joint_a);
    doc.add_skin_joint(skin, joint_b);
    doc.set_skin_skeleton(skin, joint_a);
    doc.set_node_skin(root_node, skin);

    let animation = doc.create_animation(Animation::new());
    let sampler = doc.add_animation_sampler(animation, times, rotations, Interpolation::Linear);
    doc.add_animation_channel(animation, sampler, Some(joint_b), TargetPath::Rotation);

    let scene = doc.create_scene(Scene::new());
    doc.add_scene_node(scene, root_node);
    doc.add_scene_node(scene, camera_node);

    doc
}

#[test]
fn test_node_attachments_resolve_after_tables() {
    let native = write(&full_doc(), &options("world")).unwrap();
    let nodes = native.json["nodes"].as_array().unwrap();

    assert_eq!(nodes[0]["mesh"], 0);
    assert_eq!(nodes[0]["skin"], 0);
    assert_eq!(nodes[0]["children"], serde_json::json!([1]));
    assert_eq!(nodes[1]["children"], serde_json::json!([2]));
    assert_eq!(nodes[3]["camera"], 0);
    // transforms are always present
    assert_eq!(nodes[2]["rotation"], serde_json::json!([0.0, 0.0, 0.0, 1.0]));
    assert_eq!(nodes[2]["scale"], serde_json::json!([1.0, 1.0, 1.0]));
    assert_eq!(native.json["scene"], 0);
    assert_eq!(native.json["scenes"][0]["nodes"], serde_json::json!([0, 3]));
}

#[test]
fn test_animation_channels_use_local_sampler_indices() {
    let native = write(&full_doc(), &options("anim")).unwrap();
    let animation = &native.json["animations"][0];
    assert_eq!(animation["samplers"].as_array().unwrap().len(), 1);
    assert_eq!(animation["samplers"][0]["interpolation"], "LINEAR");
    assert_eq!(animation["channels"][0]["sampler"], 0);
    assert_eq!(animation["channels"][0]["target"]["path"], "rotation");
}

#[test]
fn test_camera_projection_objects() {
    let mut doc = Document::new();
    doc.create_camera(Camera::new(CameraProjection::Orthographic {
        xmag: 2.0,
        ymag: 1.0,
        znear: 0.1,
        zfar: 50.0,
    }));
    let native = write(&doc, &options("cam")).unwrap();
    let camera = &native.json["cameras"][0];
    assert_eq!(camera["type"], "orthographic");
    assert!(camera.get("perspective").is_none());
    assert_eq!(camera["orthographic"]["xmag"], serde_json::json!(2.0));
}

#[test]
fn test_morph_targets_and_target_names() {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::new());
    let position = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0; 9])),
        buffer,
    );
    let delta = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.1; 9])),
        buffer,
    );
    let primitive = doc.create_primitive(Primitive::new());
    doc.set_primitive_attribute(primitive, "POSITION", position);
    let smile = doc.add_morph_target(primitive, "smile");
    doc.set_target_attribute(primitive, smile, "POSITION", delta);
    let mesh = doc.create_mesh(Mesh::new());
    doc.mesh_mut(mesh).weights = vec![0.5];
    doc.add_mesh_primitive(mesh, primitive);

    let native = write(&doc, &options("morph")).unwrap();
    let mesh_def = &native.json["meshes"][0];
    assert_eq!(mesh_def["extras"]["targetNames"], serde_json::json!(["smile"]));
    assert_eq!(mesh_def["weights"], serde_json::json!([0.5]));
    let targets = &mesh_def["primitives"][0]["targets"];
    assert_eq!(targets.as_array().unwrap().len(), 1);
    assert!(targets[0].get("POSITION").is_some());

    // morph-target deltas pack into the target-less "other" view
    let delta_in_other_view = native.json["accessors"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| {
            let view = a["bufferView"].as_u64().unwrap() as usize;
            native.json["bufferViews"][view].get("target").is_none()
        });
    assert!(delta_in_other_view);
}

#[test]
fn test_morph_target_accessor_is_not_an_attribute() {
    // using the same accessor as both a vertex attribute and a morph
    // target delta mixes the attribute and generic roles
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::new());
    let shared = doc.create_accessor(
        Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0; 9])),
        buffer,
    );
    let primitive = doc.create_primitive(Primitive::new());
    doc.set_primitive_attribute(primitive, "POSITION", shared);
    let target = doc.add_morph_target(primitive, "bulge");
    doc.set_target_attribute(primitive, target, "POSITION", shared);

    assert!(matches!(
        write(&doc, &options("bad")),
        Err(Error::AccessorRoleConflict)
    ));
}

#[test]
fn test_extras_and_extensions_stay_separate() {
    let mut doc = Document::new();
    let material = doc.create_material(Material::new());
    doc.material_mut(material).extras = serde_json::json!({ "artist": "kh" });
    doc.material_mut(material).extensions = serde_json::json!({ "VENDOR_material_tag": {} });

    let native = write(&doc, &options("extras")).unwrap();
    let def = &native.json["materials"][0];
    assert_eq!(def["extras"]["artist"], "kh");
    assert!(def["extensions"].get("VENDOR_material_tag").is_some());
}

#[test]
fn test_glb_container_round_trip() {
    let (doc, _) = triangle_doc();
    let native = write(&doc, &glb_options("pack")).unwrap();
    let glb = to_glb(&native).unwrap();

    assert_eq!(&glb[0..4], b"glTF");
    assert_eq!(
        u32::from_le_bytes(glb[8..12].try_into().unwrap()) as usize,
        glb.len()
    );
    let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
    let bin_offset = 20 + json_len;
    let bin_len =
        u32::from_le_bytes(glb[bin_offset..bin_offset + 4].try_into().unwrap()) as usize;
    let bin = &glb[bin_offset + 8..bin_offset + 8 + bin_len];
    assert_eq!(
        &bin[..native.resources[GLB_BUFFER_URI].len()],
        &native.resources[GLB_BUFFER_URI][..]
    );
}

#[test]
fn test_glb_rejects_second_buffer() {
    let mut doc = Document::new();
    for _ in 0..2 {
        let buffer = doc.create_buffer(Buffer::new());
        doc.create_accessor(
            Accessor::new(ElementType::Scalar, AccessorData::F32(vec![1.0])),
            buffer,
        );
    }
    assert!(matches!(
        write(&doc, &glb_options("two")),
        Err(Error::GlbMultipleBuffers { count: 2 })
    ));
}

#[test]
fn test_glb_conflict_count_ignores_empty_buffers() {
    // data, empty, data: the empty middle buffer is skipped, so only two
    // buffers actually compete for the binary chunk
    let mut doc = Document::new();
    let first = doc.create_buffer(Buffer::new());
    doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::F32(vec![1.0])),
        first,
    );
    doc.create_buffer(Buffer::new());
    let third = doc.create_buffer(Buffer::new());
    doc.create_accessor(
        Accessor::new(ElementType::Scalar, AccessorData::F32(vec![2.0])),
        third,
    );
    assert!(matches!(
        write(&doc, &glb_options("three")),
        Err(Error::GlbMultipleBuffers { count: 2 })
    ));
}
