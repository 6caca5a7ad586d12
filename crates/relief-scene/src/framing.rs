//! Camera and key light placement around the scene centroid.

use relief_math::pose::{framing_distance, pose_from_rows};
use relief_math::{Mat4, Vec3};
use relief_mesh::TriangleMesh;
use relief_types::{ReliefError, ReliefResult};

use crate::config::{CameraConfig, KeyLightConfig};

/// Unweighted mean of the per-mesh centroids.
///
/// Each mesh counts once regardless of its vertex count.
pub fn combined_centroid<'m>(
    meshes: impl IntoIterator<Item = &'m TriangleMesh>,
) -> ReliefResult<Vec3> {
    let mut sum = Vec3::ZERO;
    let mut count = 0usize;
    for (k, mesh) in meshes.into_iter().enumerate() {
        let c = mesh
            .centroid()
            .ok_or_else(|| ReliefError::InvalidMesh(format!("mesh {k} has no vertices")))?;
        sum += c;
        count += 1;
    }
    if count == 0 {
        return Err(ReliefError::EmptyMeshList);
    }
    Ok(sum / count as f32)
}

/// Distance from the centroid at which the camera frames
/// `framing_scale` inside `half_fov`.
#[inline]
pub fn standoff_distance(camera: &CameraConfig) -> f32 {
    framing_distance(camera.framing_scale, camera.half_fov)
}

/// Camera pose: configured basis, placed at `centroid + dist * offset`.
pub fn camera_pose(centroid: Vec3, dist: f32, camera: &CameraConfig) -> Mat4 {
    pose_from_rows(camera.basis, centroid + dist * Vec3::from(camera.offset))
}

/// Key light pose: configured basis, placed at `centroid + dist * offset`.
pub fn key_light_pose(centroid: Vec3, dist: f32, light: &KeyLightConfig) -> Mat4 {
    pose_from_rows(light.basis, centroid + dist * Vec3::from(light.offset))
}
