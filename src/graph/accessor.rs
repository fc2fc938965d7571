//! Typed accessor properties.

use serde_json::Value;

/// Element shape of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementType {
    /// Number of components per element.
    #[must_use]
    pub fn component_count(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }

    /// The glTF `type` string.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Mat2 => "MAT2",
            Self::Mat3 => "MAT3",
            Self::Mat4 => "MAT4",
        }
    }
}

/// Scalar component type of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
}

impl ComponentType {
    /// Size of one component in bytes.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::U32 | Self::F32 => 4,
        }
    }

    /// The glTF `componentType` code.
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            Self::I8 => 5120,
            Self::U8 => 5121,
            Self::I16 => 5122,
            Self::U16 => 5123,
            Self::U32 => 5125,
            Self::F32 => 5126,
        }
    }
}

/// Raw accessor payload. The variant fixes the component type.
#[derive(Debug, Clone)]
pub enum AccessorData {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    F32(Vec<f32>),
}

impl AccessorData {
    /// Total number of scalars.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::I8(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::F32(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The component type implied by the variant.
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::I8(_) => ComponentType::I8,
            Self::U8(_) => ComponentType::U8,
            Self::I16(_) => ComponentType::I16,
            Self::U16(_) => ComponentType::U16,
            Self::U32(_) => ComponentType::U32,
            Self::F32(_) => ComponentType::F32,
        }
    }

    /// Scalar at `index`, widened to `f64`.
    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        match self {
            Self::I8(v) => f64::from(v[index]),
            Self::U8(v) => f64::from(v[index]),
            Self::I16(v) => f64::from(v[index]),
            Self::U16(v) => f64::from(v[index]),
            Self::U32(v) => f64::from(v[index]),
            Self::F32(v) => f64::from(v[index]),
        }
    }
}

/// Typed view over a range of bytes in a buffer, producing an array of
/// scalars or vectors.
#[derive(Debug, Clone)]
pub struct Accessor {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub element_type: ElementType,
    pub normalized: bool,
    pub data: AccessorData,
}

impl Accessor {
    #[must_use]
    pub fn new(element_type: ElementType, data: AccessorData) -> Self {
        Self {
            name: String::new(),
            extras: Value::Null,
            extensions: Value::Null,
            element_type,
            normalized: false,
            data,
        }
    }

    /// Number of elements (scalar count divided by components per element).
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.len() / self.element_type.component_count()
    }

    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        self.data.component_type()
    }

    /// Unpadded byte length of the raw data.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.data.len() * self.component_type().size()
    }

    /// Per-component minimum across all elements.
    #[must_use]
    pub fn min(&self) -> Vec<f64> {
        self.fold(f64::INFINITY, f64::min)
    }

    /// Per-component maximum across all elements.
    #[must_use]
    pub fn max(&self) -> Vec<f64> {
        self.fold(f64::NEG_INFINITY, f64::max)
    }

    fn fold(&self, init: f64, pick: fn(f64, f64) -> f64) -> Vec<f64> {
        let components = self.element_type.component_count();
        if self.count() == 0 {
            return Vec::new();
        }
        let mut out = vec![init; components];
        for element in 0..self.count() {
            for (component, slot) in out.iter_mut().enumerate() {
                *slot = pick(*slot, self.data.get(element * components + component));
            }
        }
        out
    }
}
