//! CPU triangle rasterizer
//!
//! Features:
//! - Column-major 4x4 vertex transform with perspective divide
//! - Coarse near-plane rejection (whole triangles, no clipping)
//! - Screen-space backface culling (counter-clockwise front faces)
//! - Incremental barycentric fill with Z-buffer and color interpolation
//! - Optional wireframe mode

mod error;
mod math;
mod render;
mod target;
mod types;

pub use error::*;
pub use math::*;
pub use render::*;
pub use target::*;
pub use types::*;
