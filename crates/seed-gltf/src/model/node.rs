//! Scene graph nodes and skins.

use std::sync::{Arc, OnceLock, Weak};

use glam::{Mat4, Quat, Vec3};

use super::{Accessor, Camera, ExtensionData, Mesh};

/// A node in the scene hierarchy.
///
/// Children are resolved before their parents, so `children` always holds
/// fully built nodes. A node listed under several parents is a single
/// shared allocation.
#[derive(Debug, Clone)]
pub struct Node {
    pub index: usize,
    pub camera: Option<Arc<Camera>>,
    pub children: Vec<Arc<Node>>,
    pub mesh: Option<Arc<Mesh>>,
    /// Local transform: the document's matrix, or TRS composed.
    pub matrix: Mat4,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Morph target weights overriding the mesh defaults.
    pub weights: Option<Vec<f32>>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
    pub(crate) skin: OnceLock<Weak<Skin>>,
}

impl Node {
    /// The skin deforming this node's mesh.
    ///
    /// Skins are owned by [`Asset::skins`](super::Asset::skins); this link is
    /// weak to break the node/skin cycle and yields `None` once the asset
    /// has been dropped.
    pub fn skin(&self) -> Option<Arc<Skin>> {
        self.skin.get().and_then(Weak::upgrade)
    }

    /// Bind the skin once both nodes and skins exist. Returns `false` if a
    /// skin was already bound.
    pub(crate) fn bind_skin(&self, skin: &Arc<Skin>) -> bool {
        self.skin.set(Arc::downgrade(skin)).is_ok()
    }

    /// Depth-first iterator over this node and its descendants.
    pub fn descendants(self: &Arc<Self>) -> Descendants {
        Descendants {
            stack: vec![Arc::clone(self)],
        }
    }
}

/// Pre-order walk of a node subtree. See [`Node::descendants`].
pub struct Descendants {
    stack: Vec<Arc<Node>>,
}

impl Iterator for Descendants {
    type Item = Arc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev().cloned());
        Some(node)
    }
}

/// Joints and bind matrices for vertex skinning.
#[derive(Debug, Clone)]
pub struct Skin {
    pub index: usize,
    /// MAT4 accessor with one inverse bind matrix per joint; identity when
    /// absent.
    pub inverse_bind_matrices: Option<Arc<Accessor>>,
    /// Common root of the joint hierarchy.
    pub skeleton: Option<Arc<Node>>,
    /// Never empty.
    pub joints: Vec<Arc<Node>>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}
