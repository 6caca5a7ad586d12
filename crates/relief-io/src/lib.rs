//! # relief-io
//!
//! File formats and validation at the edges of Relief.
//!
//! - [`raw`]: flat little-endian `f32` heightmaps
//! - [`obj`]: Wavefront OBJ export
//! - [`png`]: PNG output and the plotting presenter
//! - [`report`]: serializable heightmap summaries
//! - [`validator`]: grid and mesh checks run before rendering or export

pub mod obj;
pub mod png;
pub mod raw;
pub mod report;
pub mod validator;

pub use obj::{export_wavefront_obj, write_obj};
pub use png::{save_png, PngPresenter};
pub use raw::{decode_raw_heightmap, read_raw_heightmap, write_raw_heightmap};
pub use report::HeightmapReport;
pub use validator::{validate_grid, validate_height_mesh};
