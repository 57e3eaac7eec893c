//! Transform helpers.

use glam::{Mat4, Quat, Vec3, Vec4};

/// Narrow the leading `N` values to `f32`, zero-filling a short slice.
fn floats<const N: usize>(values: &[f64]) -> [f32; N] {
    let mut out = [0.0f32; N];
    for (dst, src) in out.iter_mut().zip(values) {
        *dst = *src as f32;
    }
    out
}

/// Matrix from the 16 column-major floats of a node's `matrix`.
pub(crate) fn mat4_from_slice(values: &[f64]) -> Mat4 {
    Mat4::from_cols_array(&floats(values))
}

pub(crate) fn vec3_from_slice(values: &[f64]) -> Vec3 {
    Vec3::from_array(floats(values))
}

pub(crate) fn vec4_from_slice(values: &[f64]) -> Vec4 {
    Vec4::from_array(floats(values))
}

/// Rotation from (x, y, z, w).
pub(crate) fn quat_from_slice(values: &[f64]) -> Quat {
    Quat::from_array(floats(values))
}

/// Split an affine matrix into translation, rotation and scale.
///
/// Translation is the fourth column and scale the lengths of the first
/// three columns. Rotation is read from the upper 3x3 after normalizing
/// each column, so the matrix must not contain shear or a zero scale.
pub fn decompose(matrix: &Mat4) -> (Vec3, Quat, Vec3) {
    let x = matrix.x_axis.truncate();
    let y = matrix.y_axis.truncate();
    let z = matrix.z_axis.truncate();

    let translation = matrix.w_axis.truncate();
    let scale = Vec3::new(x.length(), y.length(), z.length());
    let rotation = quat_from_normalized_axes(x / scale.x, y / scale.y, z / scale.z);

    (translation, rotation, scale)
}

/// Quaternion from an orthonormal basis given as columns.
///
/// `mCR` below names column C, row R.
fn quat_from_normalized_axes(x: Vec3, y: Vec3, z: Vec3) -> Quat {
    let (m00, m01, m02) = (x.x, x.y, x.z);
    let (m10, m11, m12) = (y.x, y.y, y.z);
    let (m20, m21, m22) = (z.x, z.y, z.z);

    let trace = m00 + m11 + m22;
    if trace > 0.0 {
        let s = (trace + 1.0).sqrt();
        let w = s * 0.5;
        let t = 0.5 / s;
        Quat::from_xyzw((m12 - m21) * t, (m20 - m02) * t, (m01 - m10) * t, w)
    } else if m00 >= m11 && m00 >= m22 {
        let s = (m00 - (m11 + m22) + 1.0).sqrt();
        let t = 0.5 / s;
        Quat::from_xyzw(s * 0.5, (m10 + m01) * t, (m02 + m20) * t, (m12 - m21) * t)
    } else if m11 > m22 {
        let s = (m11 - (m22 + m00) + 1.0).sqrt();
        let t = 0.5 / s;
        Quat::from_xyzw((m10 + m01) * t, s * 0.5, (m21 + m12) * t, (m20 - m02) * t)
    } else {
        let s = (m22 - (m00 + m11) + 1.0).sqrt();
        let t = 0.5 / s;
        Quat::from_xyzw((m02 + m20) * t, (m21 + m12) * t, s * 0.5, (m01 - m10) * t)
    }
}
