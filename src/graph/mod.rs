//! In-memory property graph for glTF documents.
//!
//! Properties live in one arena owned by [`Document`] and are identified by
//! opaque [`PropertyKey`] handles, so shared ownership and cycles (node
//! children, accessors reused across primitives) need no reference counting.
//! Edges are recorded in a typed link table; the wiring helpers on
//! [`Document`] keep that table in sync. The writer classifies accessors
//! purely from link kinds, so accessor-bearing edges must go through the
//! helpers; other fields may be set directly.

mod accessor;
mod animation;
mod buffer;
mod material;
mod mesh;
mod node;
mod texture;

pub use accessor::{Accessor, AccessorData, ComponentType, ElementType};
pub use animation::{Animation, AnimationChannel, AnimationSampler, Interpolation, TargetPath};
pub use buffer::Buffer;
pub use material::{
    AlphaMode, Material, TextureBinding, TextureInfo, TextureSampler, TextureSlot,
};
pub use mesh::{Mesh, MorphTarget, Primitive};
pub use node::{Camera, CameraProjection, Node, Scene, Skin};
pub use texture::{MimeType, Texture};

/// Opaque handle to a property in the document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey(u32);

/// Edge discriminant. The writer's accessor classification keys off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A primitive's vertex attribute edge.
    Attribute,
    /// A primitive's index edge.
    Index,
    /// Everything else: ownership, buffers, morph targets, skins, animations.
    Generic,
}

/// A typed parent-to-child edge.
#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub parent: PropertyKey,
    pub child: PropertyKey,
    pub kind: LinkKind,
}

/// A typed property stored in the arena.
#[derive(Debug)]
pub enum Property {
    Root(Root),
    Buffer(Buffer),
    Accessor(Accessor),
    Texture(Texture),
    Material(Material),
    Primitive(Primitive),
    Mesh(Mesh),
    Camera(Camera),
    Node(Node),
    Skin(Skin),
    Animation(Animation),
    Scene(Scene),
}

impl Property {
    /// Lowercase kind name, used in diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Root(_) => "root",
            Self::Buffer(_) => "buffer",
            Self::Accessor(_) => "accessor",
            Self::Texture(_) => "texture",
            Self::Material(_) => "material",
            Self::Primitive(_) => "primitive",
            Self::Mesh(_) => "mesh",
            Self::Camera(_) => "camera",
            Self::Node(_) => "node",
            Self::Skin(_) => "skin",
            Self::Animation(_) => "animation",
            Self::Scene(_) => "scene",
        }
    }
}

/// Ordered listings of every root-owned property kind.
#[derive(Debug, Default)]
pub struct Root {
    pub buffers: Vec<PropertyKey>,
    pub accessors: Vec<PropertyKey>,
    pub textures: Vec<PropertyKey>,
    pub materials: Vec<PropertyKey>,
    pub meshes: Vec<PropertyKey>,
    pub cameras: Vec<PropertyKey>,
    pub nodes: Vec<PropertyKey>,
    pub skins: Vec<PropertyKey>,
    pub animations: Vec<PropertyKey>,
    pub scenes: Vec<PropertyKey>,
}

/// A glTF document as a property graph.
#[derive(Debug)]
pub struct Document {
    properties: Vec<Property>,
    links: Vec<Link>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: vec![Property::Root(Root::default())],
            links: Vec::new(),
        }
    }

    /// Handle of the root property.
    #[must_use]
    pub fn root_key(&self) -> PropertyKey {
        PropertyKey(0)
    }

    #[must_use]
    pub fn root(&self) -> &Root {
        match &self.properties[0] {
            Property::Root(root) => root,
            _ => unreachable!("arena slot 0 always holds the root"),
        }
    }

    fn root_mut(&mut self) -> &mut Root {
        match &mut self.properties[0] {
            Property::Root(root) => root,
            _ => unreachable!("arena slot 0 always holds the root"),
        }
    }

    #[must_use]
    pub fn property(&self, key: PropertyKey) -> &Property {
        &self.properties[key.0 as usize]
    }

    /// Every edge in the graph, in insertion order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Edges whose child is `child`, in insertion order.
    pub fn links_to(&self, child: PropertyKey) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |link| link.child == child)
    }

    /// Parent keys of `child`, in edge insertion order.
    pub fn parents(&self, child: PropertyKey) -> impl Iterator<Item = PropertyKey> + '_ {
        self.links_to(child).map(|link| link.parent)
    }

    fn insert(&mut self, property: Property) -> PropertyKey {
        let key = PropertyKey(self.properties.len() as u32);
        self.properties.push(property);
        key
    }

    fn link(&mut self, parent: PropertyKey, child: PropertyKey, kind: LinkKind) {
        self.links.push(Link {
            parent,
            child,
            kind,
        });
    }

    fn unlink(&mut self, parent: PropertyKey, child: PropertyKey, kind: LinkKind) {
        if let Some(position) = self
            .links
            .iter()
            .position(|l| l.parent == parent && l.child == child && l.kind == kind)
        {
            self.links.remove(position);
        }
    }

    // ==================== Creation ====================

    pub fn create_buffer(&mut self, buffer: Buffer) -> PropertyKey {
        let key = self.insert(Property::Buffer(buffer));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().buffers.push(key);
        key
    }

    /// Creates an accessor owned by `buffer`.
    ///
    /// # Panics
    /// Panics if `buffer` does not refer to a [`Buffer`].
    pub fn create_accessor(&mut self, accessor: Accessor, buffer: PropertyKey) -> PropertyKey {
        let _ = self.buffer(buffer);
        let key = self.insert(Property::Accessor(accessor));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.link(key, buffer, LinkKind::Generic);
        self.root_mut().accessors.push(key);
        key
    }

    pub fn create_texture(&mut self, texture: Texture) -> PropertyKey {
        let key = self.insert(Property::Texture(texture));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().textures.push(key);
        key
    }

    pub fn create_material(&mut self, material: Material) -> PropertyKey {
        let key = self.insert(Property::Material(material));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().materials.push(key);
        key
    }

    /// Creates a primitive. Primitives are owned by meshes, not listed on
    /// the root.
    pub fn create_primitive(&mut self, primitive: Primitive) -> PropertyKey {
        self.insert(Property::Primitive(primitive))
    }

    pub fn create_mesh(&mut self, mesh: Mesh) -> PropertyKey {
        let key = self.insert(Property::Mesh(mesh));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().meshes.push(key);
        key
    }

    pub fn create_camera(&mut self, camera: Camera) -> PropertyKey {
        let key = self.insert(Property::Camera(camera));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().cameras.push(key);
        key
    }

    pub fn create_node(&mut self, node: Node) -> PropertyKey {
        let key = self.insert(Property::Node(node));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().nodes.push(key);
        key
    }

    pub fn create_skin(&mut self, skin: Skin) -> PropertyKey {
        let key = self.insert(Property::Skin(skin));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().skins.push(key);
        key
    }

    pub fn create_animation(&mut self, animation: Animation) -> PropertyKey {
        let key = self.insert(Property::Animation(animation));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().animations.push(key);
        key
    }

    pub fn create_scene(&mut self, scene: Scene) -> PropertyKey {
        let key = self.insert(Property::Scene(scene));
        self.link(self.root_key(), key, LinkKind::Generic);
        self.root_mut().scenes.push(key);
        key
    }

    // ==================== Wiring ====================

    /// Binds or clears a material texture slot.
    pub fn set_material_texture(
        &mut self,
        material: PropertyKey,
        slot: TextureSlot,
        binding: Option<TextureBinding>,
    ) {
        let new_texture = binding.as_ref().map(|b| b.texture);
        let old = std::mem::replace(self.material_mut(material).slot_mut(slot), binding);
        if let Some(old) = old {
            self.unlink(material, old.texture, LinkKind::Generic);
        }
        if let Some(texture) = new_texture {
            self.link(material, texture, LinkKind::Generic);
        }
    }

    /// Sets a vertex attribute on a primitive, recording an attribute edge.
    pub fn set_primitive_attribute(
        &mut self,
        primitive: PropertyKey,
        semantic: impl Into<String>,
        accessor: PropertyKey,
    ) {
        let old = self
            .primitive_mut(primitive)
            .attributes
            .insert(semantic.into(), accessor);
        if let Some(old) = old {
            self.unlink(primitive, old, LinkKind::Attribute);
        }
        self.link(primitive, accessor, LinkKind::Attribute);
    }

    /// Sets the index accessor of a primitive, recording an index edge.
    pub fn set_primitive_indices(&mut self, primitive: PropertyKey, accessor: PropertyKey) {
        let old = self.primitive_mut(primitive).indices.replace(accessor);
        if let Some(old) = old {
            self.unlink(primitive, old, LinkKind::Index);
        }
        self.link(primitive, accessor, LinkKind::Index);
    }

    pub fn set_primitive_material(&mut self, primitive: PropertyKey, material: PropertyKey) {
        let old = self.primitive_mut(primitive).material.replace(material);
        if let Some(old) = old {
            self.unlink(primitive, old, LinkKind::Generic);
        }
        self.link(primitive, material, LinkKind::Generic);
    }

    /// Appends an empty morph target to a primitive and returns its index.
    pub fn add_morph_target(&mut self, primitive: PropertyKey, name: impl Into<String>) -> usize {
        let targets = &mut self.primitive_mut(primitive).targets;
        targets.push(MorphTarget::new(name));
        targets.len() - 1
    }

    /// Sets an attribute on a morph target. Morph-target accessors are
    /// generic consumers, not primitive attributes.
    pub fn set_target_attribute(
        &mut self,
        primitive: PropertyKey,
        target: usize,
        semantic: impl Into<String>,
        accessor: PropertyKey,
    ) {
        let old = self.primitive_mut(primitive).targets[target]
            .attributes
            .insert(semantic.into(), accessor);
        if let Some(old) = old {
            self.unlink(primitive, old, LinkKind::Generic);
        }
        self.link(primitive, accessor, LinkKind::Generic);
    }

    pub fn add_mesh_primitive(&mut self, mesh: PropertyKey, primitive: PropertyKey) {
        self.mesh_mut(mesh).primitives.push(primitive);
        self.link(mesh, primitive, LinkKind::Generic);
    }

    pub fn set_node_mesh(&mut self, node: PropertyKey, mesh: PropertyKey) {
        self.node_mut(node).mesh = Some(mesh);
        self.link(node, mesh, LinkKind::Generic);
    }

    pub fn set_node_camera(&mut self, node: PropertyKey, camera: PropertyKey) {
        self.node_mut(node).camera = Some(camera);
        self.link(node, camera, LinkKind::Generic);
    }

    pub fn set_node_skin(&mut self, node: PropertyKey, skin: PropertyKey) {
        self.node_mut(node).skin = Some(skin);
        self.link(node, skin, LinkKind::Generic);
    }

    pub fn add_node_child(&mut self, parent: PropertyKey, child: PropertyKey) {
        self.node_mut(parent).children.push(child);
        self.link(parent, child, LinkKind::Generic);
    }

    pub fn set_skin_inverse_bind_matrices(&mut self, skin: PropertyKey, accessor: PropertyKey) {
        let old = self.skin_mut(skin).inverse_bind_matrices.replace(accessor);
        if let Some(old) = old {
            self.unlink(skin, old, LinkKind::Generic);
        }
        self.link(skin, accessor, LinkKind::Generic);
    }

    pub fn set_skin_skeleton(&mut self, skin: PropertyKey, node: PropertyKey) {
        self.skin_mut(skin).skeleton = Some(node);
        self.link(skin, node, LinkKind::Generic);
    }

    pub fn add_skin_joint(&mut self, skin: PropertyKey, node: PropertyKey) {
        self.skin_mut(skin).joints.push(node);
        self.link(skin, node, LinkKind::Generic);
    }

    /// Appends a sampler to an animation and returns its local index.
    pub fn add_animation_sampler(
        &mut self,
        animation: PropertyKey,
        input: PropertyKey,
        output: PropertyKey,
        interpolation: Interpolation,
    ) -> usize {
        let samplers = &mut self.animation_mut(animation).samplers;
        samplers.push(AnimationSampler {
            input,
            output,
            interpolation,
        });
        let index = samplers.len() - 1;
        self.link(animation, input, LinkKind::Generic);
        self.link(animation, output, LinkKind::Generic);
        index
    }

    pub fn add_animation_channel(
        &mut self,
        animation: PropertyKey,
        sampler: usize,
        target_node: Option<PropertyKey>,
        target_path: TargetPath,
    ) {
        self.animation_mut(animation).channels.push(AnimationChannel {
            sampler,
            target_node,
            target_path,
        });
        if let Some(node) = target_node {
            self.link(animation, node, LinkKind::Generic);
        }
    }

    pub fn add_scene_node(&mut self, scene: PropertyKey, node: PropertyKey) {
        self.scene_mut(scene).nodes.push(node);
        self.link(scene, node, LinkKind::Generic);
    }

    // ==================== Typed access ====================
    // These panic on kind mismatch; callers either validated the kind
    // (the writer) or hold a key they created themselves.

    #[must_use]
    pub fn buffer(&self, key: PropertyKey) -> &Buffer {
        match self.property(key) {
            Property::Buffer(p) => p,
            other => panic!("expected buffer, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn accessor(&self, key: PropertyKey) -> &Accessor {
        match self.property(key) {
            Property::Accessor(p) => p,
            other => panic!("expected accessor, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn texture(&self, key: PropertyKey) -> &Texture {
        match self.property(key) {
            Property::Texture(p) => p,
            other => panic!("expected texture, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn material(&self, key: PropertyKey) -> &Material {
        match self.property(key) {
            Property::Material(p) => p,
            other => panic!("expected material, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn primitive(&self, key: PropertyKey) -> &Primitive {
        match self.property(key) {
            Property::Primitive(p) => p,
            other => panic!("expected primitive, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn mesh(&self, key: PropertyKey) -> &Mesh {
        match self.property(key) {
            Property::Mesh(p) => p,
            other => panic!("expected mesh, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn camera(&self, key: PropertyKey) -> &Camera {
        match self.property(key) {
            Property::Camera(p) => p,
            other => panic!("expected camera, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn node(&self, key: PropertyKey) -> &Node {
        match self.property(key) {
            Property::Node(p) => p,
            other => panic!("expected node, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn skin(&self, key: PropertyKey) -> &Skin {
        match self.property(key) {
            Property::Skin(p) => p,
            other => panic!("expected skin, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn animation(&self, key: PropertyKey) -> &Animation {
        match self.property(key) {
            Property::Animation(p) => p,
            other => panic!("expected animation, found {}", other.kind_name()),
        }
    }

    #[must_use]
    pub fn scene(&self, key: PropertyKey) -> &Scene {
        match self.property(key) {
            Property::Scene(p) => p,
            other => panic!("expected scene, found {}", other.kind_name()),
        }
    }

    fn property_mut(&mut self, key: PropertyKey) -> &mut Property {
        &mut self.properties[key.0 as usize]
    }

    pub fn buffer_mut(&mut self, key: PropertyKey) -> &mut Buffer {
        match self.property_mut(key) {
            Property::Buffer(p) => p,
            other => panic!("expected buffer, found {}", other.kind_name()),
        }
    }

    pub fn accessor_mut(&mut self, key: PropertyKey) -> &mut Accessor {
        match self.property_mut(key) {
            Property::Accessor(p) => p,
            other => panic!("expected accessor, found {}", other.kind_name()),
        }
    }

    pub fn texture_mut(&mut self, key: PropertyKey) -> &mut Texture {
        match self.property_mut(key) {
            Property::Texture(p) => p,
            other => panic!("expected texture, found {}", other.kind_name()),
        }
    }

    pub fn material_mut(&mut self, key: PropertyKey) -> &mut Material {
        match self.property_mut(key) {
            Property::Material(p) => p,
            other => panic!("expected material, found {}", other.kind_name()),
        }
    }

    pub fn primitive_mut(&mut self, key: PropertyKey) -> &mut Primitive {
        match self.property_mut(key) {
            Property::Primitive(p) => p,
            other => panic!("expected primitive, found {}", other.kind_name()),
        }
    }

    pub fn mesh_mut(&mut self, key: PropertyKey) -> &mut Mesh {
        match self.property_mut(key) {
            Property::Mesh(p) => p,
            other => panic!("expected mesh, found {}", other.kind_name()),
        }
    }

    pub fn camera_mut(&mut self, key: PropertyKey) -> &mut Camera {
        match self.property_mut(key) {
            Property::Camera(p) => p,
            other => panic!("expected camera, found {}", other.kind_name()),
        }
    }

    pub fn node_mut(&mut self, key: PropertyKey) -> &mut Node {
        match self.property_mut(key) {
            Property::Node(p) => p,
            other => panic!("expected node, found {}", other.kind_name()),
        }
    }

    pub fn skin_mut(&mut self, key: PropertyKey) -> &mut Skin {
        match self.property_mut(key) {
            Property::Skin(p) => p,
            other => panic!("expected skin, found {}", other.kind_name()),
        }
    }

    pub fn animation_mut(&mut self, key: PropertyKey) -> &mut Animation {
        match self.property_mut(key) {
            Property::Animation(p) => p,
            other => panic!("expected animation, found {}", other.kind_name()),
        }
    }

    pub fn scene_mut(&mut self, key: PropertyKey) -> &mut Scene {
        match self.property_mut(key) {
            Property::Scene(p) => p,
            other => panic!("expected scene, found {}", other.kind_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_parents_are_accessors_and_root() {
        let mut doc = Document::new();
        let buffer = doc.create_buffer(Buffer::new());
        let a = doc.create_accessor(
            Accessor::new(ElementType::Scalar, AccessorData::U16(vec![0, 1, 2])),
            buffer,
        );
        let b = doc.create_accessor(
            Accessor::new(ElementType::Scalar, AccessorData::U16(vec![3])),
            buffer,
        );

        let parents: Vec<_> = doc.parents(buffer).collect();
        assert_eq!(parents, vec![doc.root_key(), a, b]);
    }

    #[test]
    fn test_attribute_link_kind() {
        let mut doc = Document::new();
        let buffer = doc.create_buffer(Buffer::new());
        let accessor = doc.create_accessor(
            Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0; 9])),
            buffer,
        );
        let primitive = doc.create_primitive(Primitive::new());
        doc.set_primitive_attribute(primitive, "POSITION", accessor);

        let kinds: Vec<_> = doc
            .links_to(accessor)
            .filter(|l| l.parent != doc.root_key())
            .map(|l| l.kind)
            .collect();
        assert_eq!(kinds, vec![LinkKind::Attribute]);
    }

    #[test]
    fn test_replacing_attribute_drops_old_link() {
        let mut doc = Document::new();
        let buffer = doc.create_buffer(Buffer::new());
        let old = doc.create_accessor(
            Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0; 3])),
            buffer,
        );
        let new = doc.create_accessor(
            Accessor::new(ElementType::Vec3, AccessorData::F32(vec![1.0; 3])),
            buffer,
        );
        let primitive = doc.create_primitive(Primitive::new());
        doc.set_primitive_attribute(primitive, "POSITION", old);
        doc.set_primitive_attribute(primitive, "POSITION", new);

        assert!(doc.links_to(old).all(|l| l.parent == doc.root_key() || l.kind != LinkKind::Attribute));
        assert_eq!(doc.primitive(primitive).attributes()["POSITION"], new);
    }

    #[test]
    fn test_animation_sampler_local_indices() {
        let mut doc = Document::new();
        let buffer = doc.create_buffer(Buffer::new());
        let input = doc.create_accessor(
            Accessor::new(ElementType::Scalar, AccessorData::F32(vec![0.0, 1.0])),
            buffer,
        );
        let output = doc.create_accessor(
            Accessor::new(ElementType::Vec3, AccessorData::F32(vec![0.0; 6])),
            buffer,
        );
        let animation = doc.create_animation(Animation::new());
        let s0 = doc.add_animation_sampler(animation, input, output, Interpolation::Linear);
        let s1 = doc.add_animation_sampler(animation, input, output, Interpolation::Step);
        assert_eq!((s0, s1), (0, 1));
    }
}
