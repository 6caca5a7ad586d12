//! Rendering collaborator traits and the buffers they exchange.
//!
//! The composer never rasterizes or opens windows itself. It submits a
//! [`Scene`] to one of two collaborators:
//!
//! - [`RenderBackend`]: offscreen, `init` then `render` then `release`.
//! - [`InteractiveSession`]: blocking viewer loop, returns when the user quits.
//!
//! # Implementations
//! - `SoftwareRasterizer` (relief-render): CPU offscreen backend
//! - `BevyViewer` (relief-viewer): windowed interactive session
//! - [`HeadlessSession`]: records sessions without opening a window

use relief_types::ReliefResult;

use crate::scene::Scene;

bitflags::bitflags! {
    /// Render feature flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u32 {
        /// Cast shadows from the spot light.
        const SHADOWS_SPOT = 0b0000_0001;
        /// Render back faces instead of culling them.
        const SKIP_CULL_FACES = 0b0000_0010;
        /// Shade with face normals instead of interpolated vertex normals.
        const FLAT = 0b0000_0100;
    }
}

impl RenderFlags {
    /// No flags set.
    pub const NONE: Self = Self::empty();
}

/// Size of a render target in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Number of pixels.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// An 8-bit colour image, row-major from the top-left pixel.
///
/// Indexed as `height × width × channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a zeroed buffer.
    pub fn new(width: u32, height: u32, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width as usize * height as usize * channels],
        }
    }

    /// Creates an RGB buffer filled with one colour.
    pub fn filled_rgb(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            channels: 3,
            data,
        }
    }

    /// `(height, width, channels)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, self.channels)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Channel values of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Overwrites pixel `(x, y)`; `value` must hold `channels` entries.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) {
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        self.data[start..start + self.channels].copy_from_slice(value);
    }

    /// Raw interleaved channel data.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns the raw channel data.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Per-pixel view-space depth; 0 where nothing was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    /// `(height, width)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height as usize, self.width as usize)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, depth: f32) {
        self.data[y as usize * self.width as usize + x as usize] = depth;
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Result of one offscreen render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub color: PixelBuffer,
    pub depth: DepthBuffer,
}

/// Offscreen rendering collaborator.
pub trait RenderBackend: Send {
    /// Prepare a render target of the given size.
    ///
    /// Fails with `RenderBackend` when no context can be created.
    fn init(&mut self, viewport: Viewport) -> ReliefResult<()>;

    /// Render the scene once with its camera and light.
    fn render(&mut self, scene: &Scene<'_>, flags: RenderFlags) -> ReliefResult<RenderOutput>;

    /// Release the render target. Safe to call more than once.
    fn release(&mut self);

    /// Returns the backend name.
    fn name(&self) -> &str;
}

/// Settings handed to an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    pub title: String,
    pub viewport: Viewport,
    pub use_direct_lighting: bool,
    pub cull_faces: bool,
    pub shadows: bool,
    pub show_world_axis: bool,
    /// Rotation per frame in rotation mode (radians).
    pub rotate_rate: f32,
}

/// Interactive viewer collaborator.
pub trait InteractiveSession {
    /// Display the scene and block until the user quits.
    fn run(&mut self, scene: &Scene<'_>, settings: &ViewerSettings) -> ReliefResult<()>;

    /// Returns the session name.
    fn name(&self) -> &str;
}

/// Displays an offscreen render to the user (e.g. opens an image viewer).
pub trait ImagePresenter {
    fn present(&mut self, image: &PixelBuffer) -> ReliefResult<()>;
}

/// Interactive session that returns immediately.
///
/// Records what it was asked to show; used where no display exists.
#[derive(Debug, Default)]
pub struct HeadlessSession {
    sessions: u32,
    last_mesh_count: usize,
    last_settings: Option<ViewerSettings>,
}

impl HeadlessSession {
    /// Creates a new headless session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions run so far.
    pub fn session_count(&self) -> u32 {
        self.sessions
    }

    /// Mesh count of the most recent scene.
    pub fn last_mesh_count(&self) -> usize {
        self.last_mesh_count
    }

    /// Settings of the most recent session.
    pub fn last_settings(&self) -> Option<&ViewerSettings> {
        self.last_settings.as_ref()
    }
}

impl InteractiveSession for HeadlessSession {
    fn run(&mut self, scene: &Scene<'_>, settings: &ViewerSettings) -> ReliefResult<()> {
        self.sessions += 1;
        self.last_mesh_count = scene.mesh_count();
        self.last_settings = Some(settings.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }
}
