//! The resolved asset graph.
//!
//! Every cross-reference in the JSON document becomes an [`Arc`] to the
//! object it names. Objects shared by several referrers (a child node
//! listed under two parents, a texture used by two materials) are the same
//! allocation, so [`Arc::ptr_eq`] holds between them.
//!
//! The graph is built once by the mapper and never mutated afterwards.

pub mod animation;
pub mod buffer;
pub mod camera;
pub mod material;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod texture;

pub use animation::*;
pub use buffer::*;
pub use camera::*;
pub use material::*;
pub use mesh::*;
pub use node::*;
pub use scene::*;
pub use texture::*;

use std::sync::Arc;

use crate::raw::Extensions;

/// Vendor extension data carried by an entity, preserved but not
/// interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionData {
    /// Objects keyed by extension name.
    pub extensions: Option<Extensions>,
    /// Application-specific data.
    pub extras: Option<serde_json::Value>,
}

impl ExtensionData {
    pub(crate) fn from_raw(
        extensions: &Option<Extensions>,
        extras: &Option<serde_json::Value>,
    ) -> Self {
        Self {
            extensions: extensions.clone(),
            extras: extras.clone(),
        }
    }

    /// True when neither extensions nor extras were present.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_none() && self.extras.is_none()
    }
}

/// Asset information from the `asset` block.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub copyright: Option<String>,
    pub generator: Option<String>,
    pub version: String,
    pub min_version: Option<String>,
    pub extensions: ExtensionData,
}

/// A fully resolved glTF asset.
#[derive(Debug, Clone, Default)]
pub struct Asset {
    pub metadata: Metadata,
    pub extensions_used: Option<Vec<String>>,
    pub extensions_required: Option<Vec<String>>,
    pub buffers: Vec<Arc<Buffer>>,
    pub buffer_views: Vec<Arc<BufferView>>,
    pub accessors: Vec<Arc<Accessor>>,
    pub samplers: Vec<Arc<Sampler>>,
    pub images: Vec<Arc<Image>>,
    pub textures: Vec<Arc<Texture>>,
    pub materials: Vec<Arc<Material>>,
    pub meshes: Vec<Arc<Mesh>>,
    pub cameras: Vec<Arc<Camera>>,
    pub nodes: Vec<Arc<Node>>,
    pub skins: Vec<Arc<Skin>>,
    pub animations: Vec<Animation>,
    pub scenes: Vec<Arc<Scene>>,
    /// The scene named by the root `scene` index.
    pub scene: Option<Arc<Scene>>,
    pub extensions: ExtensionData,
}

impl Asset {
    /// The scene to display: the declared default, else the first scene.
    pub fn default_scene(&self) -> Option<&Arc<Scene>> {
        self.scene.as_ref().or_else(|| self.scenes.first())
    }
}
