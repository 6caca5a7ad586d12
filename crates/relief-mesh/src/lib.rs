//! # relief-mesh
//!
//! Converts rectangular grids of elevation samples into triangle meshes.
//!
//! ## Key Types
//!
//! - [`HeightGrid`]: Row-major 2D grid of f32 elevations, shape `(nx, ny)`.
//! - [`Coordinates`]: How X/Y are obtained: synthesized lattice, 1D axes,
//!   or full coordinate grids.
//! - [`TriangleMesh`]: The mesh type. Stores positions, normals and UVs
//!   in contiguous SoA buffers plus a flat index list.
//! - [`Topology`]: Edge adjacency queries used to check manifoldness
//!   and winding.
//!
//! The entry point is [`build_mesh`].

pub mod coords;
pub mod grid;
pub mod heightmap;
pub mod mesh;
pub mod normals;
pub mod topology;

pub use coords::Coordinates;
pub use grid::{HeightGrid, ScalarGrid};
pub use heightmap::{apply_skirt, build_mesh, grid_faces, heightmap_to_mesh, skirt_floor, HeightMesh};
pub use mesh::TriangleMesh;
pub use topology::Topology;
