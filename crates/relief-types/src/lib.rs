//! # relief-types
//!
//! Shared types, identifiers, error types, and named constants
//! for the Relief heightmap mesher and renderer.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other Relief crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{ReliefError, ReliefResult};
pub use ids::{MeshId, NodeId};
