//! Animation properties.

use serde_json::Value;

use super::PropertyKey;

/// Keyframe interpolation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

impl Interpolation {
    /// The glTF `interpolation` string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "LINEAR",
            Self::Step => "STEP",
            Self::CubicSpline => "CUBICSPLINE",
        }
    }
}

/// Node transform component driven by a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    Weights,
}

impl TargetPath {
    /// The glTF `path` string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
            Self::Weights => "weights",
        }
    }
}

/// Input/output accessor pair with an interpolation mode.
#[derive(Debug, Clone)]
pub struct AnimationSampler {
    pub(crate) input: PropertyKey,
    pub(crate) output: PropertyKey,
    pub interpolation: Interpolation,
}

impl AnimationSampler {
    #[must_use]
    pub fn input(&self) -> PropertyKey {
        self.input
    }

    #[must_use]
    pub fn output(&self) -> PropertyKey {
        self.output
    }
}

/// Wires one sampler (by local index within the animation) to a node path.
#[derive(Debug, Clone)]
pub struct AnimationChannel {
    pub sampler: usize,
    pub target_node: Option<PropertyKey>,
    pub target_path: TargetPath,
}

/// A set of samplers and the channels that apply them.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    pub name: String,
    pub extras: Value,
    pub extensions: Value,
    pub(crate) samplers: Vec<AnimationSampler>,
    pub(crate) channels: Vec<AnimationChannel>,
}

impl Animation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn samplers(&self) -> &[AnimationSampler] {
        &self.samplers
    }

    #[must_use]
    pub fn channels(&self) -> &[AnimationChannel] {
        &self.channels
    }
}
