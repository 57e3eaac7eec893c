//! End-to-end loading of `.gltf` and `.glb` files from disk.

use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use glam::Vec3;
use seed_gltf::container::ContainerReader;
use seed_gltf::error::ContainerError;
use seed_gltf::model::{AlphaMode, ComponentType, MimeType};
use seed_gltf::{
    load_asset, load_asset_with, ContainerRegistry, GltfError, LoadOptions, Loader, RawAsset,
    ResolveError,
};

/// Triangle positions followed by u16 indices, padded to 4 bytes.
fn triangle_bytes() -> Vec<u8> {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 1.0, 0.0];
    let indices: [u16; 4] = [0, 1, 2, 0];
    let mut bytes: Vec<u8> = positions.iter().flat_map(|f| f.to_le_bytes()).collect();
    bytes.extend(indices.iter().flat_map(|i| i.to_le_bytes()));
    bytes
}

fn triangle_json(buffer: &str) -> String {
    format!(
        r#"{{
            "asset": {{"version": "2.0", "generator": "seed-gltf tests"}},
            "buffers": [{buffer}],
            "bufferViews": [
                {{"buffer": 0, "byteLength": 36, "target": 34962}},
                {{"buffer": 0, "byteOffset": 36, "byteLength": 6, "target": 34963}}
            ],
            "accessors": [
                {{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "max": [1, 1, 0], "min": [0, 0, 0]}},
                {{"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}}
            ],
            "materials": [{{"alphaMode": "BLEND", "name": "glass"}}],
            "meshes": [{{"primitives": [
                {{"attributes": {{"POSITION": 0}}, "indices": 1, "material": 0}}
            ]}}],
            "nodes": [
                {{"children": [1], "translation": [0, 1, 0]}},
                {{"mesh": 0, "name": "triangle"}}
            ],
            "scenes": [{{"nodes": [0]}}],
            "scene": 0
        }}"#
    )
}

fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    fn chunk(kind: &[u8; 4], data: &[u8], pad: u8) -> Vec<u8> {
        let mut data = data.to_vec();
        while data.len() % 4 != 0 {
            data.push(pad);
        }
        let mut out = (data.len() as u32).to_le_bytes().to_vec();
        out.extend(kind);
        out.extend(data);
        out
    }

    let mut body = chunk(b"JSON", json.as_bytes(), b' ');
    body.extend(chunk(b"BIN\0", bin, 0));

    let mut out = b"glTF".to_vec();
    out.extend(2u32.to_le_bytes());
    out.extend((body.len() as u32 + 12).to_le_bytes());
    out.extend(body);
    out
}

fn assert_triangle(asset: &seed_gltf::Asset) {
    assert_eq!(asset.metadata.generator.as_deref(), Some("seed-gltf tests"));

    let scene = asset.default_scene().expect("default scene");
    let root = &scene.nodes[0];
    assert_eq!(root.translation, Vec3::Y);

    let child = &root.children[0];
    assert!(Arc::ptr_eq(child, &asset.nodes[1]));
    assert_eq!(child.name.as_deref(), Some("triangle"));

    let primitive = &child.mesh.as_ref().expect("mesh").primitives[0];
    assert_eq!(primitive.material.alpha_mode, AlphaMode::Blend);
    assert!(Arc::ptr_eq(&primitive.material, &asset.materials[0]));

    let indices = primitive.indices.as_ref().expect("indices");
    assert_eq!(indices.component_type, ComponentType::UnsignedShort);
    let view = indices.buffer_view.as_ref().expect("view");
    assert_eq!(view.data(), &[0, 0, 1, 0, 2, 0]);

    let positions = primitive.attribute("POSITION").expect("positions");
    let bytes = positions.buffer_view.as_ref().expect("view").data();
    assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
}

#[test]
fn test_gltf_with_external_buffer() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("triangle.bin"), triangle_bytes()).unwrap();
    let path = dir.path().join("triangle.gltf");
    std::fs::write(&path, triangle_json(r#"{"byteLength": 44, "uri": "triangle.bin"}"#)).unwrap();

    let asset = load_asset(&path).unwrap();
    assert_triangle(&asset);
    assert_eq!(asset.buffers[0].uri.as_deref(), Some("triangle.bin"));
}

#[test]
fn test_gltf_with_data_uri() {
    let dir = tempfile::tempdir().unwrap();
    let encoded = base64::engine::general_purpose::STANDARD.encode(triangle_bytes());
    let uri = format!("data:application/octet-stream;base64,{encoded}");
    let buffer = format!(r#"{{"byteLength": 44, "uri": "{uri}"}}"#);
    let path = dir.path().join("embedded.gltf");
    std::fs::write(&path, triangle_json(&buffer)).unwrap();

    assert_triangle(&load_asset(&path).unwrap());
}

#[test]
fn test_glb() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triangle.GLB");
    std::fs::write(&path, glb(&triangle_json(r#"{"byteLength": 44}"#), &triangle_bytes())).unwrap();

    let asset = load_asset(&path).unwrap();
    assert_triangle(&asset);
    assert!(asset.buffers[0].uri.is_none());
}

#[test]
fn test_glb_embedded_image() {
    let json = r#"{
        "asset": {"version": "2.0"},
        "buffers": [{"byteLength": 8}],
        "bufferViews": [{"buffer": 0, "byteLength": 8}],
        "images": [{"bufferView": 0, "mimeType": "image/png"}],
        "textures": [{"source": 0}]
    }"#;
    let png_magic = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("textured.glb");
    std::fs::write(&path, glb(json, &png_magic)).unwrap();

    let asset = load_asset(&path).unwrap();
    let image = &asset.images[0];
    assert_eq!(image.mime_type, Some(MimeType::Png));
    assert_eq!(image.bytes(), Some(&png_magic[..]));
    assert!(asset.textures[0].sampler.index.is_none());
}

#[test]
fn test_external_image_loading_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("albedo.png"), b"not really a png").unwrap();
    let path = dir.path().join("scene.gltf");
    std::fs::write(
        &path,
        r#"{"asset": {"version": "2.0"}, "images": [{"uri": "albedo.png"}]}"#,
    )
    .unwrap();

    let asset = load_asset(&path).unwrap();
    assert_eq!(asset.images[0].bytes(), Some(&b"not really a png"[..]));

    let asset = load_asset_with(&path, &LoadOptions::new().with_images(false)).unwrap();
    assert!(asset.images[0].bytes().is_none());
}

#[test]
fn test_validation_failure_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invalid.gltf");
    std::fs::write(
        &path,
        r#"{"asset": {"version": "2.0"}, "materials": [{"alphaMode": "FOO"}]}"#,
    )
    .unwrap();

    let err = load_asset(&path).unwrap_err();
    match err {
        GltfError::Validation(err) => assert_eq!(err.path, "materials[0].alphaMode"),
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn test_lenient_bounds_defer_to_mapper() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dangling.gltf");
    std::fs::write(
        &path,
        r#"{"asset": {"version": "2.0"}, "nodes": [{"mesh": 2}]}"#,
    )
    .unwrap();

    let err = load_asset(&path).unwrap_err();
    assert!(matches!(err, GltfError::Validation(_)));

    let options = LoadOptions::new().with_strict_bounds(false);
    let err = load_asset_with(&path, &options).unwrap_err();
    assert!(matches!(
        err,
        GltfError::Resolve(ResolveError::OutOfBounds { kind: "mesh", index: 2, .. })
    ));
}

#[test]
fn test_bad_glb_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.glb");
    let mut bytes = glb(r#"{"asset": {"version": "2.0"}}"#, &[0; 4]);
    bytes[..4].copy_from_slice(b"gltf");
    std::fs::write(&path, bytes).unwrap();

    let err = load_asset(&path).unwrap_err();
    assert!(matches!(err, GltfError::Container(ContainerError::InvalidMagic(_))));
}

#[test]
fn test_missing_external_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.gltf");
    std::fs::write(
        &path,
        r#"{"asset": {"version": "2.0"}, "buffers": [{"byteLength": 4, "uri": "missing.bin"}]}"#,
    )
    .unwrap();

    let err = load_asset(&path).unwrap_err();
    assert!(err.to_string().contains("missing.bin"), "{err}");
}

#[test]
fn test_unsupported_extension() {
    let err = load_asset("model.fbx").unwrap_err();
    assert!(matches!(err, GltfError::UnsupportedExtension(ext) if ext == "fbx"));
}

struct FixedReader;

impl ContainerReader for FixedReader {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn extensions(&self) -> &[&'static str] {
        &["fixed"]
    }

    fn read(&self, _path: &Path, _options: &LoadOptions) -> Result<RawAsset, ContainerError> {
        let gltf = serde_json::from_str(
            r#"{
                "asset": {"version": "2.0"},
                "nodes": [{"name": "a"}],
                "scenes": [{"nodes": [0]}]
            }"#,
        )?;
        Ok(RawAsset {
            gltf,
            ..Default::default()
        })
    }
}

#[test]
fn test_custom_reader() {
    let mut registry = ContainerRegistry::with_defaults();
    registry.register(FixedReader);

    let loader = Loader::new(registry, LoadOptions::default());
    let asset = loader.load("anything.fixed").unwrap();
    assert_eq!(asset.nodes[0].name.as_deref(), Some("a"));
}
