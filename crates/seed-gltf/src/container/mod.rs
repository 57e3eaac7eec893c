//! Container readers.
//!
//! A container reader turns a file on disk into a [`RawAsset`]: the parsed
//! JSON document plus the bytes of every buffer (and image) it declares.
//! Readers are chosen by file extension through a [`ContainerRegistry`].

mod glb;
mod gltf;
mod resources;

pub use glb::GlbReader;
pub use gltf::GltfReader;
pub use resources::decode_data_uri;

use std::path::Path;

use indexmap::IndexMap;

use crate::error::{ContainerError, GltfError, Result};
use crate::options::LoadOptions;
use crate::raw::RawAsset;

/// Trait for container readers.
///
/// Implement this trait to load glTF documents from another container.
pub trait ContainerReader: Send + Sync {
    /// Container name (e.g., "gltf", "glb").
    fn name(&self) -> &'static str;

    /// File extensions handled by this reader, without the dot.
    fn extensions(&self) -> &[&'static str];

    /// Read the container at `path` and resolve its buffers.
    fn read(
        &self,
        path: &Path,
        options: &LoadOptions,
    ) -> std::result::Result<RawAsset, ContainerError>;
}

/// Registry mapping file extensions to container readers.
pub struct ContainerRegistry {
    readers: IndexMap<String, Box<dyn ContainerReader>>,
    extension_to_reader: IndexMap<String, String>,
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ContainerRegistry {
    /// Create a registry with no readers.
    pub fn new() -> Self {
        Self {
            readers: IndexMap::new(),
            extension_to_reader: IndexMap::new(),
        }
    }

    /// Create a registry with the `.gltf` and `.glb` readers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(GltfReader::new());
        registry.register(GlbReader::new());
        registry
    }

    /// Register a reader, replacing any reader previously registered for
    /// the same extensions.
    pub fn register<R: ContainerReader + 'static>(&mut self, reader: R) {
        let name = reader.name().to_lowercase();

        for ext in reader.extensions() {
            self.extension_to_reader
                .insert(ext.to_lowercase(), name.clone());
        }

        self.readers.insert(name, Box::new(reader));
    }

    /// Get a reader by name.
    pub fn get(&self, name: &str) -> Option<&dyn ContainerReader> {
        self.readers.get(&name.to_lowercase()).map(|r| r.as_ref())
    }

    /// Get a reader by file extension; a leading dot is ignored.
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn ContainerReader> {
        let ext_lower = ext.trim_start_matches('.').to_lowercase();
        let name = self.extension_to_reader.get(&ext_lower)?;
        self.get(name)
    }

    /// Registered reader names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.readers.keys().map(String::as_str)
    }

    /// Read `path` with the reader registered for its extension.
    pub fn read(&self, path: &Path, options: &LoadOptions) -> Result<RawAsset> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let reader = self
            .reader_for_extension(ext)
            .ok_or_else(|| GltfError::UnsupportedExtension(ext.to_string()))?;

        tracing::debug!(path = %path.display(), container = reader.name(), "reading container");
        Ok(reader.read(path, options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockReader;

    impl ContainerReader for MockReader {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn extensions(&self) -> &[&'static str] {
            &["mock", "MCK"]
        }

        fn read(
            &self,
            _path: &Path,
            _options: &LoadOptions,
        ) -> std::result::Result<RawAsset, ContainerError> {
            Ok(RawAsset::default())
        }
    }

    #[test]
    fn test_default_readers() {
        let registry = ContainerRegistry::with_defaults();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["gltf", "glb"]);
        assert_eq!(registry.reader_for_extension("gltf").map(|r| r.name()), Some("gltf"));
        assert_eq!(registry.reader_for_extension(".GLB").map(|r| r.name()), Some("glb"));
        assert!(registry.reader_for_extension("obj").is_none());
    }

    #[test]
    fn test_register_custom_reader() {
        let mut registry = ContainerRegistry::new();
        registry.register(MockReader);

        assert!(registry.get("Mock").is_some());
        assert!(registry.reader_for_extension("mck").is_some());

        let raw = registry.read(Path::new("scene.mock"), &LoadOptions::default()).unwrap();
        assert!(raw.buffers.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let registry = ContainerRegistry::with_defaults();
        let err = registry
            .read(Path::new("scene.fbx"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, GltfError::UnsupportedExtension(ext) if ext == "fbx"));

        let err = registry
            .read(Path::new("no_extension"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, GltfError::UnsupportedExtension(ext) if ext.is_empty()));
    }
}
