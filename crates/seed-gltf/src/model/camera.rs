//! Cameras.

use super::ExtensionData;

/// Camera projection kind as named in the JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraType {
    Perspective,
    Orthographic,
}

impl CameraType {
    pub const ALL: [CameraType; 2] = [CameraType::Perspective, CameraType::Orthographic];

    pub fn as_str(self) -> &'static str {
        match self {
            CameraType::Perspective => "perspective",
            CameraType::Orthographic => "orthographic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Orthographic projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    pub xmag: f32,
    pub ymag: f32,
    /// Strictly positive.
    pub zfar: f32,
    pub znear: f32,
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub aspect_ratio: Option<f32>,
    /// Vertical field of view in radians.
    pub yfov: f32,
    /// `None` means an infinite projection.
    pub zfar: Option<f32>,
    pub znear: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective(Perspective),
    Orthographic(Orthographic),
}

/// A camera.
#[derive(Debug, Clone)]
pub struct Camera {
    pub index: usize,
    pub projection: Projection,
    pub name: Option<String>,
    pub extensions: ExtensionData,
}

impl Camera {
    pub fn camera_type(&self) -> CameraType {
        match self.projection {
            Projection::Perspective(_) => CameraType::Perspective,
            Projection::Orthographic(_) => CameraType::Orthographic,
        }
    }
}
