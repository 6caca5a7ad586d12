//! Spot light shadow map.
//!
//! Stores the linear depth of the closest surface seen from the light.
//! Lookups use a slope-scaled bias and a 3×3 percentage-closer filter.

use relief_math::{Mat4, Vec3};
use relief_scene::{LightNode, Scene};
use relief_types::constants::{MAX_VIEWPORT_SIDE, SHADOW_MAX_FOV};

use crate::raster::{project, rasterize_triangle};

/// Bias in texels at normal incidence.
const BIAS_TEXELS: f32 = 1.0;
/// Extra bias in texels per unit of surface slope.
const SLOPE_BIAS_TEXELS: f32 = 2.0;
/// Slope above which the bias stops growing.
const MAX_SLOPE: f32 = 10.0;

/// Depth map rendered from a spot light.
#[derive(Debug, Clone)]
pub struct ShadowMap {
    resolution: u32,
    view_proj: Mat4,
    near: f32,
    tan_half_fov: f32,
    depth: Vec<f32>,
}

/// Bounding sphere of every vertex in the scene.
fn scene_bounds(scene: &Scene<'_>) -> Option<(Vec3, f32)> {
    let mut lo = Vec3::splat(f32::INFINITY);
    let mut hi = Vec3::splat(f32::NEG_INFINITY);
    for node in scene.meshes() {
        if let Some((min, max)) = node.mesh.bounds() {
            lo = lo.min(min);
            hi = hi.max(max);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let center = 0.5 * (lo + hi);
    Some((center, 0.5 * (hi - lo).length()))
}

impl ShadowMap {
    /// Renders the scene's meshes from `light`.
    ///
    /// Returns `None` when the scene has no geometry.
    pub fn build(scene: &Scene<'_>, light: &LightNode, resolution: u32) -> Option<Self> {
        let resolution = resolution.clamp(1, MAX_VIEWPORT_SIDE);
        let (center, radius) = scene_bounds(scene)?;
        let eye = light.position();
        let to_center = center - eye;
        let dist = to_center.length();
        let max_half = 0.5 * SHADOW_MAX_FOV;

        let (dir, half_fov) = if dist > radius * 1.001 && dist > f32::EPSILON {
            let fit = (radius / dist).clamp(0.0, 1.0).asin() * 1.05;
            (to_center / dist, fit.clamp(1e-3, max_half))
        } else {
            let axis = light.direction();
            let axis = if axis == Vec3::ZERO { Vec3::NEG_Z } else { axis };
            (axis, light.light.outer_cone_angle.clamp(1e-3, max_half))
        };

        let up = if dir.dot(Vec3::Z).abs() < 0.99 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let near = 1e-3 * dist.max(radius).max(1.0);
        let view = Mat4::look_to_rh(eye, dir, up);
        let proj = Mat4::perspective_infinite_rh(2.0 * half_fov, 1.0, near);
        let view_proj = proj * view;

        let mut depth = vec![f32::INFINITY; resolution as usize * resolution as usize];
        for node in scene.meshes() {
            let mesh = node.mesh;
            let clip: Vec<_> = (0..mesh.vertex_count())
                .map(|i| view_proj * mesh.position_vec3(i).extend(1.0))
                .collect();
            for t in 0..mesh.triangle_count() {
                let ids = mesh.triangle(t).map(|i| i as usize);
                if ids.iter().any(|&i| clip[i].w < near) {
                    continue;
                }
                let sv = ids.map(|i| project(clip[i], resolution, resolution));
                rasterize_triangle(&sv, resolution, resolution, false, |f| {
                    let idx = f.row as usize * resolution as usize + f.x as usize;
                    if f.depth < depth[idx] {
                        depth[idx] = f.depth;
                    }
                });
            }
        }

        tracing::debug!(
            resolution,
            fov_deg = (2.0 * half_fov).to_degrees(),
            "built shadow map"
        );

        Some(Self {
            resolution,
            view_proj,
            near,
            tan_half_fov: half_fov.tan(),
            depth,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Stored depth at texel `(x, row)`; infinite where nothing was drawn.
    pub fn depth_at(&self, x: u32, row: u32) -> f32 {
        self.depth[row as usize * self.resolution as usize + x as usize]
    }

    /// Fraction of the filter footprint around `pos` that sees the light.
    ///
    /// `n_dot_l` is the cosine between the surface normal and the
    /// direction to the light. Points outside the map are lit.
    pub fn visibility(&self, pos: Vec3, n_dot_l: f32) -> f32 {
        let clip = self.view_proj * pos.extend(1.0);
        if clip.w <= self.near {
            return 1.0;
        }
        let nx = clip.x / clip.w;
        let ny = clip.y / clip.w;
        if !(-1.0..=1.0).contains(&nx) || !(-1.0..=1.0).contains(&ny) {
            return 1.0;
        }

        let res = self.resolution as f32;
        let px = ((nx * 0.5 + 0.5) * res).floor().min(res - 1.0) as i64;
        let py = ((ny * 0.5 + 0.5) * res).floor().min(res - 1.0) as i64;
        let row = self.resolution as i64 - 1 - py;

        let cos = n_dot_l.clamp(1e-3, 1.0);
        let slope = ((1.0 - cos * cos).sqrt() / cos).min(MAX_SLOPE);
        let texel = 2.0 * clip.w * self.tan_half_fov / res;
        let bias = texel * (BIAS_TEXELS + SLOPE_BIAS_TEXELS * slope);
        let fragment_depth = clip.w - bias;

        let last = self.resolution as i64 - 1;
        let mut lit = 0u32;
        let mut taps = 0u32;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let x = (px + dx).clamp(0, last) as u32;
                let r = (row + dy).clamp(0, last) as u32;
                taps += 1;
                if fragment_depth <= self.depth_at(x, r) {
                    lit += 1;
                }
            }
        }
        lit as f32 / taps as f32
    }
}
