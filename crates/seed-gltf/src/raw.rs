//! glTF 2.0 raw JSON schema types.
//!
//! These mirror the JSON document exactly: optional fields stay optional,
//! numbers stay wide (`i64` for integers so negative indices survive
//! parsing, `f64` for floats) and every relationship is an index into a
//! sibling list. Nothing here is validated; see [`crate::validation`].

use indexmap::IndexMap;
use serde::Deserialize;

/// Opaque vendor extension objects keyed by extension name.
pub type Extensions = serde_json::Map<String, serde_json::Value>;

/// A parsed document together with the bytes its buffers and images
/// resolved to.
#[derive(Debug, Clone, Default)]
pub struct RawAsset {
    /// The JSON document.
    pub gltf: Gltf,
    /// One entry per declared buffer, in declaration order.
    pub buffers: Vec<Vec<u8>>,
    /// One entry per declared image; `None` for images backed by a buffer
    /// view, or when image loading is disabled.
    pub images: Vec<Option<Vec<u8>>>,
}

/// Root glTF object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gltf {
    pub extensions_used: Option<Vec<String>>,
    pub extensions_required: Option<Vec<String>>,
    pub accessors: Option<Vec<Accessor>>,
    pub animations: Option<Vec<Animation>>,
    pub asset: Asset,
    pub buffers: Option<Vec<Buffer>>,
    pub buffer_views: Option<Vec<BufferView>>,
    pub cameras: Option<Vec<Camera>>,
    pub images: Option<Vec<Image>>,
    pub materials: Option<Vec<Material>>,
    pub meshes: Option<Vec<Mesh>>,
    pub nodes: Option<Vec<Node>>,
    pub samplers: Option<Vec<Sampler>>,
    /// Default scene index.
    pub scene: Option<i64>,
    pub scenes: Option<Vec<Scene>>,
    pub skins: Option<Vec<Skin>>,
    pub textures: Option<Vec<Texture>>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Asset metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub copyright: Option<String>,
    pub generator: Option<String>,
    /// glTF version this asset targets.
    pub version: String,
    pub min_version: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A buffer containing binary data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    /// Data URI or path relative to the asset file. Absent for the GLB
    /// binary chunk.
    pub uri: Option<String>,
    pub byte_length: i64,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A view into a buffer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: i64,
    pub byte_offset: Option<i64>,
    pub byte_length: i64,
    pub byte_stride: Option<i64>,
    /// 34962 = ARRAY_BUFFER, 34963 = ELEMENT_ARRAY_BUFFER.
    pub target: Option<i64>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Indices of the elements a sparse accessor replaces.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseIndices {
    pub buffer_view: i64,
    pub byte_offset: Option<i64>,
    pub component_type: i64,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Replacement values of a sparse accessor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseValues {
    pub buffer_view: i64,
    pub byte_offset: Option<i64>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Sparse storage of accessor elements that deviate from their base.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sparse {
    pub count: i64,
    pub indices: SparseIndices,
    pub values: SparseValues,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// An accessor for typed buffer data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    pub buffer_view: Option<i64>,
    pub byte_offset: Option<i64>,
    /// 5120=BYTE, 5121=UNSIGNED_BYTE, 5122=SHORT, 5123=UNSIGNED_SHORT,
    /// 5125=UNSIGNED_INT, 5126=FLOAT.
    pub component_type: i64,
    pub normalized: Option<bool>,
    pub count: i64,
    /// "SCALAR", "VEC2", "VEC3", "VEC4", "MAT2", "MAT3" or "MAT4".
    #[serde(rename = "type")]
    pub accessor_type: String,
    pub max: Option<Vec<f64>>,
    pub min: Option<Vec<f64>>,
    pub sparse: Option<Sparse>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A texture sampler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
    pub mag_filter: Option<i64>,
    pub min_filter: Option<i64>,
    pub wrap_s: Option<i64>,
    pub wrap_t: Option<i64>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// An image, sourced from a URI or a buffer view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<i64>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A texture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Texture {
    pub sampler: Option<i64>,
    /// Image index.
    pub source: Option<i64>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Reference to a texture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
    pub index: i64,
    pub tex_coord: Option<i64>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Reference to a normal map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalTextureInfo {
    pub index: i64,
    pub tex_coord: Option<i64>,
    pub scale: Option<f64>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Reference to an occlusion map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcclusionTextureInfo {
    pub index: i64,
    pub tex_coord: Option<i64>,
    pub strength: Option<f64>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// PBR metallic-roughness parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    pub base_color_factor: Option<Vec<f64>>,
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_factor: Option<f64>,
    pub roughness_factor: Option<f64>,
    pub metallic_roughness_texture: Option<TextureInfo>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A material.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: Option<String>,
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    pub normal_texture: Option<NormalTextureInfo>,
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    pub emissive_texture: Option<TextureInfo>,
    pub emissive_factor: Option<Vec<f64>>,
    /// "OPAQUE", "MASK" or "BLEND".
    pub alpha_mode: Option<String>,
    pub alpha_cutoff: Option<f64>,
    pub double_sided: Option<bool>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A mesh primitive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Primitive {
    /// Vertex attributes (POSITION, NORMAL, TEXCOORD_0, ...) to accessors.
    pub attributes: IndexMap<String, i64>,
    pub indices: Option<i64>,
    pub material: Option<i64>,
    /// 0=POINTS .. 6=TRIANGLE_FAN.
    pub mode: Option<i64>,
    pub targets: Option<Vec<IndexMap<String, i64>>>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A mesh.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
    pub weights: Option<Vec<f64>>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Orthographic projection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Orthographic {
    pub xmag: f64,
    pub ymag: f64,
    pub zfar: f64,
    pub znear: f64,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Perspective projection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    pub aspect_ratio: Option<f64>,
    pub yfov: f64,
    pub zfar: Option<f64>,
    pub znear: f64,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A camera.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Camera {
    pub orthographic: Option<Orthographic>,
    pub perspective: Option<Perspective>,
    /// "perspective" or "orthographic".
    #[serde(rename = "type")]
    pub camera_type: String,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A node in the scene graph.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
    pub camera: Option<i64>,
    pub children: Option<Vec<i64>>,
    pub skin: Option<i64>,
    /// Column-major 4x4 local transform.
    pub matrix: Option<Vec<f64>>,
    pub mesh: Option<i64>,
    /// Unit quaternion as (x, y, z, w).
    pub rotation: Option<Vec<f64>>,
    pub scale: Option<Vec<f64>>,
    pub translation: Option<Vec<f64>>,
    pub weights: Option<Vec<f64>>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A skin for skeletal animation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
    pub inverse_bind_matrices: Option<i64>,
    /// Skeleton root node.
    pub skeleton: Option<i64>,
    pub joints: Vec<i64>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Node property targeted by an animation channel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimationTarget {
    pub node: Option<i64>,
    /// "translation", "rotation", "scale" or "weights".
    pub path: String,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Keyframe input/output pair of an animation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimationSampler {
    pub input: i64,
    /// "LINEAR", "STEP" or "CUBICSPLINE".
    pub interpolation: Option<String>,
    pub output: i64,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// Binds an animation sampler to a node property.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Channel {
    /// Index into the owning animation's samplers.
    pub sampler: i64,
    pub target: AnimationTarget,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// An animation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Animation {
    pub channels: Vec<Channel>,
    pub samplers: Vec<AnimationSampler>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}

/// A scene containing root nodes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scene {
    pub nodes: Option<Vec<i64>>,
    pub name: Option<String>,
    pub extensions: Option<Extensions>,
    pub extras: Option<serde_json::Value>,
}
