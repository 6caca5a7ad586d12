//! CPU offscreen backend.
//!
//! Scan-converts every mesh node through the scene camera into a colour
//! buffer and a linear depth buffer. One pass, no supersampling beyond
//! the viewport size the composer asks for.

use relief_math::{Vec3, Vec4};
use relief_scene::{
    DepthBuffer, PixelBuffer, RenderBackend, RenderFlags, RenderOutput, Scene, Viewport,
};
use relief_types::constants::{MAX_VIEWPORT_SIDE, SHADOW_MAP_SIZE};
use relief_types::{ReliefError, ReliefResult};

use crate::raster::{project, rasterize_triangle};
use crate::shading::{encode_rgb, to_rgb8, Lighting};
use crate::shadow::ShadowMap;

/// Software rasterizer implementing [`RenderBackend`].
///
/// Always available; needs neither a GPU nor a display.
#[derive(Debug)]
pub struct SoftwareRasterizer {
    viewport: Option<Viewport>,
    shadow_resolution: u32,
    frames: u32,
}

impl SoftwareRasterizer {
    /// Creates a new rasterizer with the default shadow map size.
    pub fn new() -> Self {
        Self {
            viewport: None,
            shadow_resolution: SHADOW_MAP_SIZE,
            frames: 0,
        }
    }

    /// Sets the shadow map side length in texels, clamped to
    /// `1..=MAX_VIEWPORT_SIDE`.
    pub fn with_shadow_resolution(mut self, resolution: u32) -> Self {
        self.shadow_resolution = resolution.clamp(1, MAX_VIEWPORT_SIDE);
        self
    }

    /// Viewport set by the last successful `init`, if not yet released.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Shadow map side length in texels.
    pub fn shadow_resolution(&self) -> u32 {
        self.shadow_resolution
    }

    /// Returns the number of frames rendered.
    pub fn frame_count(&self) -> u32 {
        self.frames
    }
}

impl Default for SoftwareRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for SoftwareRasterizer {
    fn init(&mut self, viewport: Viewport) -> ReliefResult<()> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(ReliefError::RenderBackend(format!(
                "cannot create a {}x{} render target",
                viewport.width, viewport.height
            )));
        }
        if viewport.width > MAX_VIEWPORT_SIDE || viewport.height > MAX_VIEWPORT_SIDE {
            return Err(ReliefError::RenderBackend(format!(
                "render target {}x{} exceeds {MAX_VIEWPORT_SIDE} pixels per side",
                viewport.width, viewport.height
            )));
        }
        self.viewport = Some(viewport);
        Ok(())
    }

    fn render(&mut self, scene: &Scene<'_>, flags: RenderFlags) -> ReliefResult<RenderOutput> {
        let viewport = self.viewport.ok_or_else(|| {
            ReliefError::RenderBackend("render called before init".into())
        })?;
        let camera = scene
            .camera()
            .ok_or_else(|| ReliefError::RenderBackend("scene has no camera".into()))?;
        for node in scene.meshes() {
            node.mesh.validate()?;
        }

        let (width, height) = (viewport.width, viewport.height);
        let view_proj = camera.camera.projection(viewport.aspect()) * camera.view_matrix();
        let znear = camera.camera.znear;

        let lighting = Lighting::from_scene(scene);
        let shadow = if flags.contains(RenderFlags::SHADOWS_SPOT) {
            scene
                .light()
                .and_then(|light| ShadowMap::build(scene, light, self.shadow_resolution))
        } else {
            None
        };

        let mut color = PixelBuffer::filled_rgb(width, height, to_rgb8(scene.bg_color));
        let mut zbuf = vec![f32::INFINITY; viewport.area()];
        let cull = !flags.contains(RenderFlags::SKIP_CULL_FACES);
        let flat = flags.contains(RenderFlags::FLAT);

        let mut drawn = 0usize;
        let mut rejected = 0usize;
        for node in scene.meshes() {
            let mesh = node.mesh;
            let [r, g, b, _] = node.material.base_color;
            let base = Vec3::new(r, g, b);
            let cull_back = cull && !node.material.double_sided;
            let smooth = node.material.smooth && !flat;

            let clip: Vec<Vec4> = (0..mesh.vertex_count())
                .map(|i| view_proj * mesh.position_vec3(i).extend(1.0))
                .collect();

            for t in 0..mesh.triangle_count() {
                let ids = mesh.triangle(t).map(|i| i as usize);
                if ids.iter().any(|&i| clip[i].w < znear) {
                    rejected += 1;
                    continue;
                }
                let screen = ids.map(|i| project(clip[i], width, height));
                let world = mesh.triangle_positions(t);
                let face_normal = (world[1] - world[0])
                    .cross(world[2] - world[0])
                    .try_normalize()
                    .unwrap_or(Vec3::Z);
                let normals = ids.map(|i| mesh.normal_vec3(i));
                drawn += 1;

                rasterize_triangle(&screen, width, height, cull_back, |f| {
                    let idx = f.row as usize * width as usize + f.x as usize;
                    if f.depth >= zbuf[idx] {
                        return;
                    }
                    zbuf[idx] = f.depth;

                    let [b0, b1, b2] = f.bary;
                    let pos = world[0] * b0 + world[1] * b1 + world[2] * b2;
                    let mut normal = if smooth {
                        (normals[0] * b0 + normals[1] * b1 + normals[2] * b2)
                            .try_normalize()
                            .unwrap_or(face_normal)
                    } else {
                        face_normal
                    };
                    if !f.front_facing {
                        normal = -normal;
                    }

                    let rgb = lighting.shade(base, pos, normal, shadow.as_ref());
                    color.set_pixel(f.x, f.row, &encode_rgb(rgb));
                });
            }
        }

        let mut depth = DepthBuffer::new(width, height);
        for row in 0..height {
            for x in 0..width {
                let d = zbuf[row as usize * width as usize + x as usize];
                if d.is_finite() {
                    depth.set(x, row, d);
                }
            }
        }

        self.frames += 1;
        tracing::debug!(
            width,
            height,
            triangles = drawn,
            rejected,
            shadows = shadow.is_some(),
            "software render complete"
        );

        Ok(RenderOutput { color, depth })
    }

    fn release(&mut self) {
        self.viewport = None;
    }

    fn name(&self) -> &str {
        "software"
    }
}
