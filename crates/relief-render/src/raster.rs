//! Triangle scan conversion shared by the colour and shadow passes.
//!
//! Works in pixel space with the origin at the bottom-left corner and Y
//! up, so counter-clockwise triangles in NDC keep a positive signed area.
//! Fragments are reported with a top-down row index.

use relief_math::{Vec2, Vec4};

/// A projected vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// Pixel-space position, Y up.
    pub pos: Vec2,
    /// Clip-space w (linear view depth for perspective projections).
    pub w: f32,
}

/// Projects a clip-space position onto a `width × height` target.
///
/// `clip.w` must be positive.
#[inline]
pub fn project(clip: Vec4, width: u32, height: u32) -> ScreenVertex {
    let inv_w = 1.0 / clip.w;
    let ndc = Vec2::new(clip.x * inv_w, clip.y * inv_w);
    ScreenVertex {
        pos: Vec2::new(
            (ndc.x * 0.5 + 0.5) * width as f32,
            (ndc.y * 0.5 + 0.5) * height as f32,
        ),
        w: clip.w,
    }
}

/// One covered pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: u32,
    /// Row index counted from the top of the target.
    pub row: u32,
    /// Perspective-correct barycentric weights.
    pub bary: [f32; 3],
    /// Interpolated linear depth.
    pub depth: f32,
    /// Counter-clockwise on screen.
    pub front_facing: bool,
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Signed area (times two) of the projected triangle; positive when
/// counter-clockwise.
#[inline]
pub fn signed_area(v: &[ScreenVertex; 3]) -> f32 {
    edge(v[0].pos, v[1].pos, v[2].pos)
}

/// Calls `emit` for every pixel centre inside the triangle.
///
/// Clockwise triangles are skipped when `cull_back` is set. Degenerate
/// and non-finite triangles produce nothing.
pub fn rasterize_triangle(
    v: &[ScreenVertex; 3],
    width: u32,
    height: u32,
    cull_back: bool,
    mut emit: impl FnMut(Fragment),
) {
    let area = signed_area(v);
    if !area.is_finite() || area.abs() < f32::EPSILON {
        return;
    }
    let front_facing = area > 0.0;
    if cull_back && !front_facing {
        return;
    }

    let min = v[0].pos.min(v[1].pos).min(v[2].pos);
    let max = v[0].pos.max(v[1].pos).max(v[2].pos);
    let x0 = min.x.floor().max(0.0) as u32;
    let y0 = min.y.floor().max(0.0) as u32;
    let x1 = max.x.ceil().min(width as f32) as u32;
    let y1 = max.y.ceil().min(height as f32) as u32;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let inv_area = 1.0 / area;
    let inv_w = [1.0 / v[0].w, 1.0 / v[1].w, 1.0 / v[2].w];

    for yi in y0..y1 {
        let py = yi as f32 + 0.5;
        for xi in x0..x1 {
            let p = Vec2::new(xi as f32 + 0.5, py);
            let b0 = edge(v[1].pos, v[2].pos, p) * inv_area;
            let b1 = edge(v[2].pos, v[0].pos, p) * inv_area;
            let b2 = edge(v[0].pos, v[1].pos, p) * inv_area;
            if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                continue;
            }

            let q = [b0 * inv_w[0], b1 * inv_w[1], b2 * inv_w[2]];
            let depth = 1.0 / (q[0] + q[1] + q[2]);
            emit(Fragment {
                x: xi,
                row: height - 1 - yi,
                bary: [q[0] * depth, q[1] * depth, q[2] * depth],
                depth,
                front_facing,
            });
        }
    }
}
