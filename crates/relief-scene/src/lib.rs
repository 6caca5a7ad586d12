//! # relief-scene
//!
//! Scene composition for Relief.
//!
//! Builds a [`Scene`] from one or more meshes, frames the combined
//! centroid with a perspective camera, places a key light, and hands the
//! result to a rendering collaborator:
//!
//! - [`RenderBackend`]: offscreen, returns a pixel buffer.
//! - [`InteractiveSession`]: blocking viewer loop.
//!
//! [`SceneComposer`] is the entry point; all placement constants come
//! from [`SceneConfig`].

pub mod backend;
pub mod composer;
pub mod config;
pub mod framing;
pub mod help;
pub mod scene;

pub use backend::{
    DepthBuffer, HeadlessSession, ImagePresenter, InteractiveSession, PixelBuffer, RenderBackend,
    RenderFlags, RenderOutput, ViewerSettings, Viewport,
};
pub use composer::{RenderOptions, RenderTargets, SceneComposer};
pub use config::{CameraConfig, KeyLightConfig, OffscreenConfig, SceneConfig, ViewerConfig};
pub use scene::{CameraNode, LightNode, Material, MeshNode, PerspectiveCamera, Scene, SpotLight};
