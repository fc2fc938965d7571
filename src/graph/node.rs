//! Node, camera, skin, and scene properties.

use serde_json::Value;

use super::PropertyKey;

/// Camera projection parameters.
#[derive(Debug, Clone)]
pub enum CameraProjection {
    Perspective {
        yfov: f32,
        aspect_ratio: Option<f32>,
        znear: f32,
        zfar: Option<f32>,
    },
    Orthographic {
        xmag: f32,
        ymag: f32,
        znear: f32,
        zfar: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub projection: CameraProjection,
}

impl Camera {
    #[must_use]
    pub fn new(projection: CameraProjection) -> Self {
        Self {
            name: String::new(),
            extras: Value::Null,
            extensions: Value::Null,
            projection,
        }
    }
}

/// Scene-graph node with a local TRS transform and optional attachments.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub weights: Vec<f32>,
    pub mesh: Option<PropertyKey>,
    pub camera: Option<PropertyKey>,
    pub skin: Option<PropertyKey>,
    pub children: Vec<PropertyKey>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: String::new(),
            extras: Value::Null,
            extensions: Value::Null,
            translation: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
            weights: Vec::new(),
            mesh: None,
            camera: None,
            skin: None,
            children: Vec::new(),
        }
    }
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Joint list for skeletal animation.
#[derive(Debug, Clone, Default)]
pub struct Skin {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub skeleton: Option<PropertyKey>,
    pub joints: Vec<PropertyKey>,
    pub(crate) inverse_bind_matrices: Option<PropertyKey>,
}

impl Skin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn inverse_bind_matrices(&self) -> Option<PropertyKey> {
        self.inverse_bind_matrices
    }
}

/// Root node list of one displayable scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub nodes: Vec<PropertyKey>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
