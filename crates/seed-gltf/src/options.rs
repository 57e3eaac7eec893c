//! Load options.

use serde::{Deserialize, Serialize};

/// Options controlling how an asset is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Check reference indices against the length of their target list
    /// during validation, and buffer view ranges against their buffer.
    ///
    /// When disabled only non-negativity is validated and bad indices are
    /// reported later as resolution errors.
    pub strict_bounds: bool,
    /// Resolve image URIs (data URIs and external files) into bytes.
    pub load_images: bool,
    /// Maximum number of levels below any node in the hierarchy. The
    /// limit holds whatever order the nodes are declared in.
    pub max_node_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strict_bounds: true,
            load_images: true,
            max_node_depth: 512,
        }
    }
}

impl LoadOptions {
    /// Create default load options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable upper-bound checks on reference indices.
    pub fn with_strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    /// Enable or disable loading image payloads.
    pub fn with_images(mut self, load: bool) -> Self {
        self.load_images = load;
        self
    }

    /// Set the maximum node hierarchy depth.
    pub fn with_max_node_depth(mut self, depth: usize) -> Self {
        self.max_node_depth = depth;
        self
    }
}
