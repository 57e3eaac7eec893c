//! Keyframe animations.

use std::sync::Arc;

use super::{Accessor, ExtensionData, Node};

/// Node property driven by a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    Weights,
}

impl TargetPath {
    pub const ALL: [TargetPath; 4] = [
        TargetPath::Translation,
        TargetPath::Rotation,
        TargetPath::Scale,
        TargetPath::Weights,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetPath::Translation => "translation",
            TargetPath::Rotation => "rotation",
            TargetPath::Scale => "scale",
            TargetPath::Weights => "weights",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// Keyframe interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

impl Interpolation {
    pub const ALL: [Interpolation; 3] = [
        Interpolation::Linear,
        Interpolation::Step,
        Interpolation::CubicSpline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Interpolation::Linear => "LINEAR",
            Interpolation::Step => "STEP",
            Interpolation::CubicSpline => "CUBICSPLINE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == name)
    }
}

/// Keyframe times paired with output values.
#[derive(Debug, Clone)]
pub struct AnimationSampler {
    /// Keyframe times in seconds.
    pub input: Arc<Accessor>,
    pub interpolation: Interpolation,
    pub output: Arc<Accessor>,
    pub extensions: ExtensionData,
}

#[derive(Debug, Clone)]
pub struct AnimationTarget {
    /// `None` when the target is supplied by an extension.
    pub node: Option<Arc<Node>>,
    pub path: TargetPath,
    pub extensions: ExtensionData,
}

/// Connects a sampler to the node property it animates.
#[derive(Debug, Clone)]
pub struct Channel {
    /// One of the owning animation's `samplers`.
    pub sampler: Arc<AnimationSampler>,
    pub target: AnimationTarget,
    pub extensions: ExtensionData,
}

#[derive(Debug, Clone)]
pub struct Animation {
    pub index: usize,
    pub channels: Vec<Channel>,
    pub samplers: Vec<Arc<AnimationSampler>>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}
