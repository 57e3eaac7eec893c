//! Scenes.

use std::sync::Arc;

use super::{ExtensionData, Node};

/// A set of root nodes to display together.
#[derive(Debug, Clone)]
pub struct Scene {
    pub index: usize,
    /// Root nodes; empty when the scene declares none.
    pub nodes: Vec<Arc<Node>>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

impl Scene {
    /// Every node reachable from the roots, parents before children.
    ///
    /// A node shared by several parents is yielded once per path.
    pub fn walk(&self) -> impl Iterator<Item = Arc<Node>> + '_ {
        self.nodes.iter().flat_map(|root| root.descendants())
    }
}
