//! CSR: a CPU-only software rasterizer
//!
//! Turns a column-major transform plus flat vertex and index buffers into a
//! color image with correct occlusion, without any GPU or OS drawing API:
//! - `rasterizer`: render target, clear, vertex stage, visibility tests and
//!   the barycentric fill
//! - `scene`: RON scene files, camera setup and mesh sources
//! - `export`: PNG/PPM output of a finished frame

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod export;
pub mod logging;
pub mod rasterizer;
pub mod scene;

pub use rasterizer::{
    render, render_vertices, Color, CullMode, Mat4, RasterSettings, RenderError, RenderMode,
    RenderStats, RenderTarget, TargetError, Vec3, Vertex, VertexLayout,
};
