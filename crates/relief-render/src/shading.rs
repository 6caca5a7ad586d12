//! Per-fragment lighting: ambient plus one spot light.

use std::f32::consts::FRAC_1_PI;

use relief_math::Vec3;
use relief_scene::{LightNode, Scene};

use crate::shadow::ShadowMap;

/// Display gamma applied when encoding to 8-bit.
pub const DISPLAY_GAMMA: f32 = 2.2;

/// Hermite interpolation between `edge0` and `edge1`, clamped to `[0, 1]`.
///
/// Equal edges degrade to a step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x >= edge0 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// A spot light resolved to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotParams {
    pub position: Vec3,
    /// Unit axis of the cone.
    pub direction: Vec3,
    /// Colour times intensity.
    pub radiance: Vec3,
    pub cos_inner: f32,
    pub cos_outer: f32,
}

impl SpotParams {
    pub fn from_node(node: &LightNode) -> Self {
        let light = &node.light;
        Self {
            position: node.position(),
            direction: node.direction(),
            radiance: Vec3::from(light.color) * light.intensity,
            cos_inner: light.inner_cone_angle.cos(),
            cos_outer: light.outer_cone_angle.cos(),
        }
    }

    /// Cone falloff for a fragment lit along unit vector `to_light`.
    #[inline]
    pub fn cone(&self, to_light: Vec3) -> f32 {
        smoothstep(self.cos_outer, self.cos_inner, (-to_light).dot(self.direction))
    }
}

/// Lighting environment of one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: Vec3,
    pub spot: Option<SpotParams>,
}

impl Lighting {
    pub fn from_scene(scene: &Scene<'_>) -> Self {
        let [r, g, b, _] = scene.ambient_light;
        Self {
            ambient: Vec3::new(r, g, b),
            spot: scene.light().map(SpotParams::from_node),
        }
    }

    /// Linear radiance leaving `pos` with unit normal `normal`.
    pub fn shade(
        &self,
        base: Vec3,
        pos: Vec3,
        normal: Vec3,
        shadow: Option<&ShadowMap>,
    ) -> Vec3 {
        let mut color = self.ambient * base;

        let Some(spot) = &self.spot else {
            return color;
        };
        let to_light = spot.position - pos;
        let d2 = to_light.length_squared();
        if d2 <= f32::EPSILON {
            return color;
        }
        let l = to_light / d2.sqrt();
        let n_dot_l = normal.dot(l);
        if n_dot_l <= 0.0 {
            return color;
        }
        let cone = spot.cone(l);
        if cone <= 0.0 {
            return color;
        }
        let visibility = shadow.map_or(1.0, |s| s.visibility(pos, n_dot_l));

        color += base * FRAC_1_PI * spot.radiance * (n_dot_l * cone * visibility / d2);
        color
    }
}

/// Gamma-encodes a linear colour to 8-bit RGB.
#[inline]
pub fn encode_rgb(linear: Vec3) -> [u8; 3] {
    let inv = 1.0 / DISPLAY_GAMMA;
    let c = linear.max(Vec3::ZERO).powf(inv).min(Vec3::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}

/// Converts an RGBA colour in `[0, 1]` to 8-bit RGB without gamma.
#[inline]
pub fn to_rgb8(color: [f32; 4]) -> [u8; 3] {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(color[0]), q(color[1]), q(color[2])]
}
