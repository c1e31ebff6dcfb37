//! Scene module - mesh sources and camera setup that feed the rasterizer
//!
//! - Meshes in the interleaved wire format, with optional per-mesh settings
//! - Look-at camera with perspective projection
//! - RON scene files

mod geometry;
mod file;

pub use geometry::*;
pub use file::*;
