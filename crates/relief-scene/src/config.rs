//! Scene configuration.
//!
//! Every placement and lighting constant used by the composer lives here,
//! with defaults taken from `relief_types::constants`. Configs load from
//! TOML; missing keys fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use relief_types::constants as c;
use relief_types::{ReliefError, ReliefResult};

use crate::backend::{RenderFlags, Viewport};

/// Top-level scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Ambient light colour and intensity (RGBA, 0..1).
    pub ambient_light: [f32; 4],
    /// Background colour (8-bit RGB).
    pub background: [u8; 3],
    /// Base colour of every mesh node (8-bit RGB).
    pub mesh_color: [u8; 3],
    /// Interpolate vertex normals across faces.
    pub smooth: bool,
    /// Offscreen camera placement.
    pub camera: CameraConfig,
    /// Offscreen key light placement.
    pub key_light: KeyLightConfig,
    /// Offscreen render target.
    pub offscreen: OffscreenConfig,
    /// Interactive viewer settings.
    pub viewer: ViewerConfig,
}

/// Perspective camera framing the scene centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view (radians).
    pub yfov: f32,
    /// Near clip distance.
    pub znear: f32,
    /// Width of the framed region.
    pub framing_scale: f32,
    /// Horizontal half field of view used for the standoff distance (radians).
    pub half_fov: f32,
    /// Rotation basis, row-major.
    pub basis: [[f32; 3]; 3],
    /// Offset from the centroid in units of the standoff distance.
    pub offset: [f32; 3],
}

/// Spot light providing cross-lighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyLightConfig {
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Intensity (candela-like; attenuated by 1/d²).
    pub intensity: f32,
    /// Inner cone half-angle (radians), full intensity inside.
    pub inner_cone: f32,
    /// Outer cone half-angle (radians), zero intensity outside.
    pub outer_cone: f32,
    /// Rotation basis, row-major.
    pub basis: [[f32; 3]; 3],
    /// Offset from the centroid in units of the standoff distance.
    pub offset: [f32; 3],
}

/// Offscreen render target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffscreenConfig {
    /// Base width before supersampling.
    pub base_width: u32,
    /// Base height before supersampling.
    pub base_height: u32,
    /// Supersampling factor.
    pub scale: u32,
    /// Render spot-light shadows.
    pub shadows: bool,
}

/// Interactive viewer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    /// Light attached to the camera instead of the scene lights.
    pub use_direct_lighting: bool,
    /// Cull back faces.
    pub cull_faces: bool,
    pub shadows: bool,
    pub show_world_axis: bool,
    /// Rotation per frame in rotation mode (radians).
    pub rotate_rate: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ambient_light: c::AMBIENT_LIGHT,
            background: c::BACKGROUND_RGB,
            mesh_color: c::MESH_RGB,
            smooth: true,
            camera: CameraConfig::default(),
            key_light: KeyLightConfig::default(),
            offscreen: OffscreenConfig::default(),
            viewer: ViewerConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yfov: c::CAMERA_YFOV,
            znear: c::CAMERA_ZNEAR,
            framing_scale: c::CAMERA_FRAMING_SCALE,
            half_fov: c::CAMERA_HALF_FOV,
            basis: c::CAMERA_BASIS,
            offset: c::CAMERA_OFFSET,
        }
    }
}

impl Default for KeyLightConfig {
    fn default() -> Self {
        Self {
            color: c::KEY_LIGHT_COLOR,
            intensity: c::KEY_LIGHT_INTENSITY,
            inner_cone: c::KEY_LIGHT_INNER_CONE,
            outer_cone: c::KEY_LIGHT_OUTER_CONE,
            basis: c::KEY_LIGHT_BASIS,
            offset: c::KEY_LIGHT_OFFSET,
        }
    }
}

impl Default for OffscreenConfig {
    fn default() -> Self {
        Self {
            base_width: c::OFFSCREEN_BASE_SIZE.0,
            base_height: c::OFFSCREEN_BASE_SIZE.1,
            scale: c::OFFSCREEN_SCALE,
            shadows: true,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: c::VIEWER_SIZE.0,
            height: c::VIEWER_SIZE.1,
            use_direct_lighting: true,
            cull_faces: false,
            shadows: false,
            show_world_axis: false,
            rotate_rate: c::VIEWER_ROTATE_RATE,
        }
    }
}

impl OffscreenConfig {
    /// Final render size (base size × supersampling factor).
    ///
    /// Saturates on overflow; `SceneConfig::validate` rejects such sizes.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.base_width.saturating_mul(self.scale),
            self.base_height.saturating_mul(self.scale),
        )
    }

    /// Render flags for this target.
    pub fn flags(&self) -> RenderFlags {
        if self.shadows {
            RenderFlags::SHADOWS_SPOT
        } else {
            RenderFlags::NONE
        }
    }
}

impl SceneConfig {
    /// Creates a config for quick previews (no supersampling, no shadows).
    pub fn preview() -> Self {
        Self {
            offscreen: OffscreenConfig {
                scale: 1,
                shadows: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Parses a TOML document and validates it.
    pub fn from_toml_str(text: &str) -> ReliefResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ReliefError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ReliefResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> ReliefResult<String> {
        toml::to_string_pretty(self).map_err(|e| ReliefError::Serialization(e.to_string()))
    }

    /// Checks that every value is usable by the composer.
    pub fn validate(&self) -> ReliefResult<()> {
        let cam = &self.camera;
        if !(cam.yfov > 0.0 && cam.yfov < std::f32::consts::PI) {
            return Err(ReliefError::InvalidConfig(format!(
                "camera.yfov must be in (0, pi), got {}",
                cam.yfov
            )));
        }
        if !(cam.half_fov > 0.0 && cam.half_fov < std::f32::consts::FRAC_PI_2) {
            return Err(ReliefError::InvalidConfig(format!(
                "camera.half_fov must be in (0, pi/2), got {}",
                cam.half_fov
            )));
        }
        if !(cam.framing_scale > 0.0) {
            return Err(ReliefError::InvalidConfig(
                "camera.framing_scale must be positive".into(),
            ));
        }
        if !(cam.znear > 0.0) {
            return Err(ReliefError::InvalidConfig("camera.znear must be positive".into()));
        }

        let light = &self.key_light;
        if !(light.intensity >= 0.0) {
            return Err(ReliefError::InvalidConfig(
                "key_light.intensity must be non-negative".into(),
            ));
        }
        if !(0.0..=std::f32::consts::FRAC_PI_2).contains(&light.outer_cone)
            || !(0.0..=light.outer_cone).contains(&light.inner_cone)
        {
            return Err(ReliefError::InvalidConfig(format!(
                "key_light cones must satisfy 0 <= inner <= outer <= pi/2, got inner {} outer {}",
                light.inner_cone, light.outer_cone
            )));
        }

        let off = &self.offscreen;
        if off.base_width == 0 || off.base_height == 0 || off.scale == 0 {
            return Err(ReliefError::InvalidConfig(
                "offscreen size and scale must be >= 1".into(),
            ));
        }
        for (name, base) in [("width", off.base_width), ("height", off.base_height)] {
            match base.checked_mul(off.scale) {
                Some(side) if side <= c::MAX_VIEWPORT_SIDE => {}
                _ => {
                    return Err(ReliefError::InvalidConfig(format!(
                        "offscreen {name} {base} x scale {} exceeds {} pixels",
                        off.scale,
                        c::MAX_VIEWPORT_SIDE
                    )))
                }
            }
        }

        let viewer = &self.viewer;
        if viewer.width == 0 || viewer.height == 0 {
            return Err(ReliefError::InvalidConfig("viewer size must be >= 1".into()));
        }
        if viewer.width > c::MAX_VIEWPORT_SIDE || viewer.height > c::MAX_VIEWPORT_SIDE {
            return Err(ReliefError::InvalidConfig(format!(
                "viewer size {}x{} exceeds {} pixels per side",
                viewer.width,
                viewer.height,
                c::MAX_VIEWPORT_SIDE
            )));
        }
        if !viewer.rotate_rate.is_finite() {
            return Err(ReliefError::InvalidConfig(
                "viewer.rotate_rate must be finite".into(),
            ));
        }

        Ok(())
    }

    /// Background as linear RGBA in 0..1.
    pub fn background_rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.background;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    /// Mesh base colour as RGBA in 0..1.
    pub fn mesh_rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.mesh_color;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}
