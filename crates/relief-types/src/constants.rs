//! Named constants for meshing, camera framing and lighting.
//!
//! These are the defaults surfaced through `SceneConfig`; geometry code
//! never hard-codes them.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

/// Skirt floor sits this fraction of the elevation range below the minimum.
pub const SKIRT_DEPTH_FRACTION: f32 = 0.05;

/// Smallest accepted grid extent along either axis.
pub const MIN_GRID_EXTENT: usize = 2;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;

// ─── Scene ────────────────────────────────────────────────────

/// Ambient light colour and intensity (RGBA).
pub const AMBIENT_LIGHT: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

/// Background colour (8-bit RGB).
pub const BACKGROUND_RGB: [u8; 3] = [15, 15, 15];

/// Base colour of terrain meshes (8-bit RGB).
pub const MESH_RGB: [u8; 3] = [102, 102, 102];

// ─── Offscreen camera ─────────────────────────────────────────

/// Vertical field of view of the offscreen perspective camera.
pub const CAMERA_YFOV: f32 = PI / 3.0;

/// Scale of the framed region used to derive the standoff distance.
pub const CAMERA_FRAMING_SCALE: f32 = 0.9;

/// Target horizontal half field of view used to derive the standoff distance.
pub const CAMERA_HALF_FOV: f32 = PI / 6.0;

/// Camera rotation basis, row-major. Looks diagonally down along -(1, 0, 1).
pub const CAMERA_BASIS: [[f32; 3]; 3] = [
    [0.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2],
    [1.0, 0.0, 0.0],
    [0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2],
];

/// Camera offset from the centroid, in units of the standoff distance.
pub const CAMERA_OFFSET: [f32; 3] = [1.0, 0.0, 1.0];

/// Near clip plane of the perspective camera.
pub const CAMERA_ZNEAR: f32 = 0.05;

// ─── Key light ────────────────────────────────────────────────

/// Spot light colour.
pub const KEY_LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Spot light intensity.
pub const KEY_LIGHT_INTENSITY: f32 = 15.0;

/// Spot light inner cone half-angle.
pub const KEY_LIGHT_INNER_CONE: f32 = PI / 2.5;

/// Spot light outer cone half-angle.
pub const KEY_LIGHT_OUTER_CONE: f32 = PI / 2.0;

/// Key light rotation basis for a 45° tilt, row-major.
pub const KEY_LIGHT_BASIS: [[f32; 3]; 3] = [
    [0.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
    [-FRAC_1_SQRT_2, 0.0, 0.0],
    [0.0, 1.0, FRAC_1_SQRT_2],
];

/// Key light offset from the centroid, in units of the standoff distance.
pub const KEY_LIGHT_OFFSET: [f32; 3] = [0.0, -1.5, 1.5];

// ─── Viewports ────────────────────────────────────────────────

/// Base offscreen viewport (width, height) before supersampling.
pub const OFFSCREEN_BASE_SIZE: (u32, u32) = (640, 480);

/// Offscreen supersampling factor applied to the base viewport.
pub const OFFSCREEN_SCALE: u32 = 2;

/// Interactive viewer viewport (width, height).
pub const VIEWER_SIZE: (u32, u32) = (800, 600);

/// Continuous rotation rate of the interactive viewer (radians per frame).
pub const VIEWER_ROTATE_RATE: f32 = PI / 20.0;

/// Largest viewport side accepted by the software rasterizer.
pub const MAX_VIEWPORT_SIDE: u32 = 16_384;

// ─── Shadows ──────────────────────────────────────────────────

/// Side length of the spot light shadow map (texels).
pub const SHADOW_MAP_SIZE: u32 = 1024;

/// Widest field of view of the shadow map camera (radians, 170°).
pub const SHADOW_MAX_FOV: f32 = 170.0 * PI / 180.0;
