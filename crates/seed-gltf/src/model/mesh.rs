//! Meshes and their primitives.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{Accessor, ExtensionData, Material};

/// Attribute semantic (POSITION, NORMAL, ...) to accessor.
pub type Attributes = IndexMap<String, Arc<Accessor>>;

/// Topology of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl PrimitiveMode {
    pub const ALL: [PrimitiveMode; 7] = [
        PrimitiveMode::Points,
        PrimitiveMode::Lines,
        PrimitiveMode::LineLoop,
        PrimitiveMode::LineStrip,
        PrimitiveMode::Triangles,
        PrimitiveMode::TriangleStrip,
        PrimitiveMode::TriangleFan,
    ];

    /// GL enum value.
    pub fn code(self) -> i64 {
        match self {
            PrimitiveMode::Points => 0,
            PrimitiveMode::Lines => 1,
            PrimitiveMode::LineLoop => 2,
            PrimitiveMode::LineStrip => 3,
            PrimitiveMode::Triangles => 4,
            PrimitiveMode::TriangleStrip => 5,
            PrimitiveMode::TriangleFan => 6,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

/// Geometry drawn with a single material.
#[derive(Debug, Clone)]
pub struct Primitive {
    /// Never empty.
    pub attributes: Attributes,
    pub indices: Option<Arc<Accessor>>,
    pub material: Arc<Material>,
    pub mode: PrimitiveMode,
    /// Morph targets, each a non-empty attribute map.
    pub targets: Option<Vec<Attributes>>,
    pub extensions: ExtensionData,
}

impl Primitive {
    /// Accessor bound to an attribute semantic.
    pub fn attribute(&self, semantic: &str) -> Option<&Arc<Accessor>> {
        self.attributes.get(semantic)
    }
}

/// A set of primitives rendered together.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub index: usize,
    /// Never empty.
    pub primitives: Vec<Primitive>,
    /// Default morph target weights.
    pub weights: Option<Vec<f32>>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}
