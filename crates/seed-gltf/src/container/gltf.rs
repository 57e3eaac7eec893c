//! Reader for the JSON `.gltf` container.

use std::path::Path;

use crate::error::ContainerError;
use crate::options::LoadOptions;
use crate::raw::{Gltf, RawAsset};

use super::resources::{load_buffer, load_images};
use super::ContainerReader;

/// Reader for `.gltf` files.
///
/// Buffers and images are resolved from base64 data URIs or from files
/// relative to the document's directory.
pub struct GltfReader;

impl GltfReader {
    /// Create a new glTF reader.
    pub fn new() -> Self {
        Self
    }

    /// Parse a JSON document and resolve its resources against `base_dir`.
    pub fn read_slice(
        &self,
        json: &[u8],
        base_dir: &Path,
        options: &LoadOptions,
    ) -> Result<RawAsset, ContainerError> {
        let gltf: Gltf = serde_json::from_slice(json)?;

        let buffers = gltf
            .buffers
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, buffer)| load_buffer(i, buffer, base_dir))
            .collect::<Result<Vec<_>, _>>()?;
        let images = load_images(&gltf, base_dir, options)?;

        tracing::debug!(
            buffers = buffers.len(),
            images = images.len(),
            "parsed glTF document"
        );

        Ok(RawAsset { gltf, buffers, images })
    }
}

impl Default for GltfReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerReader for GltfReader {
    fn name(&self) -> &'static str {
        "gltf"
    }

    fn extensions(&self) -> &[&'static str] {
        &["gltf"]
    }

    fn read(&self, path: &Path, options: &LoadOptions) -> Result<RawAsset, ContainerError> {
        let json = std::fs::read(path).map_err(|source| ContainerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.read_slice(&json, base_dir, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_gltf() {
        let reader = GltfReader::new();
        let json = br#"{
            "asset": {"version": "2.0"},
            "scenes": [{"nodes": [0]}],
            "nodes": [{"name": "TestNode"}]
        }"#;

        let raw = reader
            .read_slice(json, Path::new(""), &LoadOptions::default())
            .unwrap();
        assert!(raw.buffers.is_empty());
        assert_eq!(raw.gltf.nodes.unwrap()[0].name.as_deref(), Some("TestNode"));
    }

    #[test]
    fn test_embedded_buffer() {
        let reader = GltfReader::new();
        let json = br#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 5, "uri": "data:application/octet-stream;base64,SGVsbG8="}]
        }"#;

        let raw = reader
            .read_slice(json, Path::new(""), &LoadOptions::default())
            .unwrap();
        assert_eq!(raw.buffers, vec![b"Hello".to_vec()]);
    }

    #[test]
    fn test_buffer_without_uri() {
        let reader = GltfReader::new();
        let json = br#"{"asset": {"version": "2.0"}, "buffers": [{"byteLength": 4}]}"#;

        let err = reader
            .read_slice(json, Path::new(""), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ContainerError::MissingBufferData { index: 0 }));
    }

    #[test]
    fn test_external_buffer_relative_to_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.bin"), [1u8, 2, 3, 4]).unwrap();
        let path = dir.path().join("scene.gltf");
        std::fs::write(
            &path,
            r#"{"asset": {"version": "2.0"}, "buffers": [{"byteLength": 4, "uri": "data.bin"}]}"#,
        )
        .unwrap();

        let raw = GltfReader::new().read(&path, &LoadOptions::default()).unwrap();
        assert_eq!(raw.buffers, vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn test_malformed_json() {
        let err = GltfReader::new()
            .read_slice(b"{\"asset\":", Path::new(""), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ContainerError::Json(_)));
    }
}
