//! Samplers, images and textures.

use std::sync::Arc;

use super::{BufferView, ExtensionData};

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl Filter {
    pub const ALL: [Filter; 6] = [
        Filter::Nearest,
        Filter::Linear,
        Filter::NearestMipmapNearest,
        Filter::LinearMipmapNearest,
        Filter::NearestMipmapLinear,
        Filter::LinearMipmapLinear,
    ];

    /// Filters legal for magnification; mipmapping only applies when minifying.
    pub const MAGNIFICATION: [Filter; 2] = [Filter::Nearest, Filter::Linear];

    /// GL enum value.
    pub fn code(self) -> i64 {
        match self {
            Filter::Nearest => 9728,
            Filter::Linear => 9729,
            Filter::NearestMipmapNearest => 9984,
            Filter::LinearMipmapNearest => 9985,
            Filter::NearestMipmapLinear => 9986,
            Filter::LinearMipmapLinear => 9987,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }
}

/// Texture coordinate wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    ClampToEdge,
    MirroredRepeat,
    #[default]
    Repeat,
}

impl WrapMode {
    pub const ALL: [WrapMode; 3] = [
        WrapMode::Repeat,
        WrapMode::MirroredRepeat,
        WrapMode::ClampToEdge,
    ];

    /// GL enum value.
    pub fn code(self) -> i64 {
        match self {
            WrapMode::ClampToEdge => 33071,
            WrapMode::MirroredRepeat => 33648,
            WrapMode::Repeat => 10497,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.code() == code)
    }
}

/// Filtering and wrapping applied when sampling a texture.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    /// Position in the asset's sampler list, or `None` for the implicit
    /// default sampler of a texture that names none.
    pub index: Option<usize>,
    pub mag_filter: Option<Filter>,
    pub min_filter: Option<Filter>,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

/// Encoded image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Jpeg,
    Png,
}

impl MimeType {
    pub const ALL: [MimeType; 2] = [MimeType::Jpeg, MimeType::Png];

    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

/// Encoded image data.
#[derive(Debug, Clone)]
pub struct Image {
    pub index: usize,
    pub uri: Option<String>,
    /// Bytes loaded from `uri`, when present and loaded.
    pub data: Option<Vec<u8>>,
    pub mime_type: Option<MimeType>,
    pub buffer_view: Option<Arc<BufferView>>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

impl Image {
    /// The encoded image bytes, from the buffer view if there is one,
    /// otherwise from the loaded URI payload.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.buffer_view {
            Some(view) => Some(view.data()),
            None => self.data.as_deref(),
        }
    }
}

/// An image paired with a sampler.
#[derive(Debug, Clone)]
pub struct Texture {
    pub index: usize,
    pub sampler: Arc<Sampler>,
    pub source: Option<Arc<Image>>,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

/// Reference from a material to a texture.
#[derive(Debug, Clone)]
pub struct TextureInfo {
    pub texture: Arc<Texture>,
    /// TEXCOORD_n attribute set used for lookups.
    pub tex_coord: u32,
    pub extensions: ExtensionData,
}

/// Reference to a tangent-space normal map.
#[derive(Debug, Clone)]
pub struct NormalTextureInfo {
    pub texture: Arc<Texture>,
    pub tex_coord: u32,
    pub scale: f32,
    pub extensions: ExtensionData,
}

/// Reference to an ambient occlusion map.
#[derive(Debug, Clone)]
pub struct OcclusionTextureInfo {
    pub texture: Arc<Texture>,
    pub tex_coord: u32,
    pub strength: f32,
    pub extensions: ExtensionData,
}
