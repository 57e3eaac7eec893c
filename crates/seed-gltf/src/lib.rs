//! seed-gltf: glTF 2.0 asset loading for Seed.
//!
//! This crate loads a glTF 2.0 asset from a `.gltf` (JSON) or `.glb`
//! (binary) container and produces an immutable scene graph in which every
//! index of the document has been replaced by a shared reference to the
//! object it names.
//!
//! # Quick Start
//!
//! ```ignore
//! use seed_gltf::load_asset;
//!
//! let asset = load_asset("models/helmet.glb")?;
//! for node in asset.default_scene().into_iter().flat_map(|s| s.walk()) {
//!     println!("{:?} {}", node.name, node.translation);
//! }
//! ```
//!
//! # Architecture
//!
//! Loading runs three stages; the first failure aborts the load and no
//! partial asset is returned:
//!
//! ```text
//! path ─> ContainerReader ─> RawAsset ─> Validator ─> Mapper ─> Asset
//!          (.gltf / .glb)    (JSON +      (field      (indices ->
//!                             buffers)     rules)      references)
//! ```
//!
//! Each stage has its own error type, all wrapped by [`GltfError`].
//!
//! # Custom Containers
//!
//! The [`ContainerRegistry`] maps file extensions to readers and accepts
//! custom ones:
//!
//! ```ignore
//! use seed_gltf::{ContainerRegistry, Loader, LoadOptions};
//!
//! let mut registry = ContainerRegistry::with_defaults();
//! registry.register(MyZipReader::new());
//! let asset = Loader::new(registry, LoadOptions::default()).load("scene.zip")?;
//! ```

pub mod container;
pub mod error;
pub mod mapper;
pub mod math;
pub mod model;
pub mod options;
pub mod raw;
pub mod validation;

pub use container::{ContainerReader, ContainerRegistry, GlbReader, GltfReader};
pub use error::{ContainerError, GltfError, ResolveError, Result, ValidationError};
pub use model::{
    Accessor, Animation, Asset, Buffer, BufferView, Camera, Image, Material, Mesh, Node, Primitive,
    Sampler, Scene, Skin, Texture,
};
pub use options::LoadOptions;
pub use raw::RawAsset;

use std::path::Path;

/// Load an asset with default options.
///
/// The container is chosen by file extension (`gltf` or `glb`).
///
/// # Example
///
/// ```ignore
/// use seed_gltf::load_asset;
///
/// let asset = load_asset("scene.gltf")?;
/// println!("Loaded {} nodes", asset.nodes.len());
/// ```
pub fn load_asset(path: impl AsRef<Path>) -> Result<Asset> {
    load_asset_with(path, &LoadOptions::default())
}

/// Load an asset with explicit options.
///
/// # Example
///
/// ```ignore
/// use seed_gltf::{load_asset_with, LoadOptions};
///
/// let options = LoadOptions::new().with_images(false);
/// let asset = load_asset_with("scene.glb", &options)?;
/// ```
pub fn load_asset_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Asset> {
    load_with_registry(&ContainerRegistry::with_defaults(), path.as_ref(), options)
}

/// Loads assets through a configurable container registry.
pub struct Loader {
    registry: ContainerRegistry,
    options: LoadOptions,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(ContainerRegistry::with_defaults(), LoadOptions::default())
    }
}

impl Loader {
    pub fn new(registry: ContainerRegistry, options: LoadOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn registry_mut(&mut self) -> &mut ContainerRegistry {
        &mut self.registry
    }

    /// Read, validate and map the asset at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Asset> {
        load_with_registry(&self.registry, path.as_ref(), &self.options)
    }
}

fn load_with_registry(
    registry: &ContainerRegistry,
    path: &Path,
    options: &LoadOptions,
) -> Result<Asset> {
    let raw = registry.read(path, options)?;
    validation::validate(&raw.gltf, options)?;
    let asset = mapper::map(raw, options)?;

    tracing::debug!(
        path = %path.display(),
        nodes = asset.nodes.len(),
        scenes = asset.scenes.len(),
        "loaded glTF asset"
    );
    Ok(asset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_defaults() {
        let loader = Loader::default();
        assert_eq!(loader.options(), &LoadOptions::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_asset("scene.obj").unwrap_err();
        assert!(matches!(err, GltfError::UnsupportedExtension(ext) if ext == "obj"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_asset("/nonexistent/scene.gltf").unwrap_err();
        assert!(matches!(err, GltfError::Container(ContainerError::Io { .. })));
    }
}
