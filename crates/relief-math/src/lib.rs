//! # relief-math
//!
//! Math primitives for Relief.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat4`, etc.)
//! - Rigid pose construction from row-major rotation bases
//! - 1D/2D lattice helpers (`linspace`, `meshgrid_ij`)
//! - Range statistics over elevation samples

pub mod lattice;
pub mod pose;
pub mod stats;

// Re-export glam types as the canonical math types for Relief.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
