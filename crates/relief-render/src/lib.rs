//! # relief-render
//!
//! Offscreen rendering for Relief.
//!
//! Provides [`SoftwareRasterizer`], a CPU implementation of
//! [`relief_scene::RenderBackend`]. It needs no GPU or display and
//! produces the same `height × width × 3` buffers as any other backend,
//! which makes it the default for the CLI and for tests.

pub mod raster;
pub mod rasterizer;
pub mod shading;
pub mod shadow;

pub use rasterizer::SoftwareRasterizer;
pub use shadow::ShadowMap;
