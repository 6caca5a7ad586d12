//! Rigid 4×4 poses built from row-major rotation bases.
//!
//! Camera and light placement is authored as a 3×3 basis written
//! row by row plus a translation. `glam` stores matrices column-major,
//! so the basis is transposed on the way in.

use glam::{Mat3, Mat4, Vec3};

/// Converts a row-major 3×3 basis into a `glam::Mat3`.
#[inline]
pub fn basis_from_rows(rows: [[f32; 3]; 3]) -> Mat3 {
    Mat3::from_cols_array_2d(&rows).transpose()
}

/// Builds a 4×4 pose with the given row-major basis and translation.
///
/// The upper-left 3×3 block is `rows`, the last column is `translation`
/// and the bottom row is `[0, 0, 0, 1]`.
pub fn pose_from_rows(rows: [[f32; 3]; 3], translation: Vec3) -> Mat4 {
    let basis = basis_from_rows(rows);
    Mat4::from_cols(
        basis.x_axis.extend(0.0),
        basis.y_axis.extend(0.0),
        basis.z_axis.extend(0.0),
        translation.extend(1.0),
    )
}

/// Returns the translation column of a pose.
#[inline]
pub fn pose_translation(pose: &Mat4) -> Vec3 {
    pose.w_axis.truncate()
}

/// Returns the forward (viewing) direction of a pose: its local -Z axis.
///
/// Not normalized, because light bases are not required to be orthonormal.
#[inline]
pub fn pose_forward(pose: &Mat4) -> Vec3 {
    -pose.z_axis.truncate()
}

/// Returns true if the 3×3 block of `pose` is a proper rotation.
pub fn is_rigid(pose: &Mat4, tolerance: f32) -> bool {
    let m = Mat3::from_mat4(*pose);
    let should_be_identity = m.transpose() * m;
    let identity_err = (should_be_identity - Mat3::IDENTITY)
        .to_cols_array()
        .iter()
        .fold(0.0_f32, |acc, v| acc.max(v.abs()));
    identity_err < tolerance && (m.determinant() - 1.0).abs() < tolerance
}

/// Standoff distance that frames a region of width `scale` inside a
/// horizontal half field of view `half_fov`.
#[inline]
pub fn framing_distance(scale: f32, half_fov: f32) -> f32 {
    scale / (2.0 * half_fov.tan())
}
