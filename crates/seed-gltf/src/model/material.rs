//! PBR materials.

use glam::{Vec3, Vec4};

use super::{ExtensionData, NormalTextureInfo, OcclusionTextureInfo, TextureInfo};

/// How the alpha channel of the base color is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

impl AlphaMode {
    pub const ALL: [AlphaMode; 3] = [AlphaMode::Opaque, AlphaMode::Mask, AlphaMode::Blend];

    pub fn as_str(self) -> &'static str {
        match self {
            AlphaMode::Opaque => "OPAQUE",
            AlphaMode::Mask => "MASK",
            AlphaMode::Blend => "BLEND",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

/// Metallic-roughness parameters.
#[derive(Debug, Clone)]
pub struct PbrMetallicRoughness {
    /// Linear RGBA multiplier, white by default.
    pub base_color_factor: Vec4,
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub metallic_roughness_texture: Option<TextureInfo>,
    pub extensions: ExtensionData,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: Vec4::ONE,
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
            extensions: ExtensionData::default(),
        }
    }
}

/// Surface appearance of a primitive.
#[derive(Debug, Clone)]
pub struct Material {
    /// Position in the asset's material list, or `None` for the default
    /// material given to primitives that name none.
    pub index: Option<usize>,
    pub pbr_metallic_roughness: PbrMetallicRoughness,
    pub normal_texture: Option<NormalTextureInfo>,
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    pub emissive_texture: Option<TextureInfo>,
    pub emissive_factor: Vec3,
    pub alpha_mode: AlphaMode,
    /// Only meaningful with [`AlphaMode::Mask`].
    pub alpha_cutoff: f32,
    pub double_sided: bool,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            index: None,
            pbr_metallic_roughness: PbrMetallicRoughness::default(),
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: Vec3::ZERO,
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            name: None,
            extensions: ExtensionData::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let material = Material::default();
        assert!(material.index.is_none());
        assert_eq!(material.pbr_metallic_roughness.base_color_factor, Vec4::ONE);
        assert_eq!(material.emissive_factor, Vec3::ZERO);
        assert_eq!(material.alpha_mode, AlphaMode::Opaque);
        assert_eq!(material.alpha_cutoff, 0.5);
    }

    #[test]
    fn test_alpha_mode_names() {
        assert_eq!(AlphaMode::from_name("BLEND"), Some(AlphaMode::Blend));
        assert_eq!(AlphaMode::from_name("blend"), None);
    }
}
