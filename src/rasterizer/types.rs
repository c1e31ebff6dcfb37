//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::Vec3;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Weighted sum of three colors, each channel truncated toward zero
    pub fn interpolate(c0: Color, c1: Color, c2: Color, w0: f32, w1: f32, w2: f32) -> Self {
        let mix = |a: u8, b: u8, c: u8| {
            (a as f32 * w0 + b as f32 * w1 + c as f32 * w2) as u8
        };
        Self {
            r: mix(c0.r, c1.r, c2.r),
            g: mix(c0.g, c1.g, c2.g),
            b: mix(c0.b, c1.b, c2.b),
        }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to [u8; 4] with opaque alpha, for display surfaces
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Interleaved layout of the flat vertex buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexLayout {
    /// x, y, z, r, g, b
    #[default]
    PositionColor,
    /// x, y, z (color comes from `RasterSettings::default_color`)
    PositionOnly,
}

impl VertexLayout {
    /// Number of scalars per vertex
    pub fn stride(self) -> usize {
        match self {
            VertexLayout::PositionColor => 6,
            VertexLayout::PositionOnly => 3,
        }
    }
}

/// A decoded vertex: object-space position and color
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Color,
}

impl Vertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }

    /// Decode vertex `index` from the flat wire format.
    ///
    /// The caller guarantees `(index + 1) * layout.stride() <= data.len()`.
    /// Color scalars are converted with `as u8`, which truncates and
    /// saturates to 0..=255.
    pub fn decode(data: &[f32], index: usize, layout: VertexLayout, default_color: Color) -> Self {
        let base = index * layout.stride();
        let position = Vec3::new(data[base], data[base + 1], data[base + 2]);
        let color = match layout {
            VertexLayout::PositionColor => Color::new(
                data[base + 3] as u8,
                data[base + 4] as u8,
                data[base + 5] as u8,
            ),
            VertexLayout::PositionOnly => default_color,
        };
        Self { position, color }
    }

    /// Append this vertex to a flat buffer in `PositionColor` layout
    pub fn encode_into(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&[
            self.position.x,
            self.position.y,
            self.position.z,
            self.color.r as f32,
            self.color.g as f32,
            self.color.b as f32,
        ]);
    }
}

/// How accepted triangles are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Filled, depth tested, color interpolated
    #[default]
    Solid,
    /// Edges only, no depth test
    Wireframe,
}

/// Which triangles the visibility stage discards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullMode {
    /// Discard triangles with non-positive screen-space signed area
    #[default]
    Backface,
    /// Draw both windings
    Disabled,
}

/// Rasterizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    pub mode: RenderMode,
    pub culling: CullMode,
    pub layout: VertexLayout,
    /// Vertex color used with `VertexLayout::PositionOnly`
    pub default_color: Color,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Solid,
            culling: CullMode::Backface,
            layout: VertexLayout::PositionColor,
            default_color: Color::WHITE,
        }
    }
}

/// Per-call counters returned by the render driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Index triples visited
    pub triangles: usize,
    /// Dropped because a vertex had w <= 0
    pub near_rejected: usize,
    /// Dropped by backface culling
    pub backface_culled: usize,
    /// Zero-area triangles skipped by the rasterizer
    pub degenerate: usize,
    /// Triangles handed to the fill or wireframe stage
    pub rasterized: usize,
    /// Color writes
    pub pixels_written: usize,
}

impl std::ops::AddAssign for RenderStats {
    fn add_assign(&mut self, other: RenderStats) {
        self.triangles += other.triangles;
        self.near_rejected += other.near_rejected;
        self.backface_culled += other.backface_culled;
        self.degenerate += other.degenerate;
        self.rasterized += other.rasterized;
        self.pixels_written += other.pixels_written;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_position_color() {
        let data = [
            0.0, 0.0, 0.0, 1.0, 2.0, 3.0,
            -0.5, 0.25, 1.0, 255.0, 128.9, 0.0,
        ];
        let v = Vertex::decode(&data, 1, VertexLayout::PositionColor, Color::WHITE);
        assert_eq!(v.position, Vec3::new(-0.5, 0.25, 1.0));
        assert_eq!(v.color, Color::new(255, 128, 0));
    }

    #[test]
    fn test_decode_position_only_uses_default_color() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let v = Vertex::decode(&data, 1, VertexLayout::PositionOnly, Color::GREEN);
        assert_eq!(v.position, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(v.color, Color::GREEN);
    }

    #[test]
    fn test_decode_saturates_color() {
        let data = [0.0, 0.0, 0.0, 300.0, -5.0, 12.0];
        let v = Vertex::decode(&data, 0, VertexLayout::PositionColor, Color::WHITE);
        assert_eq!(v.color, Color::new(255, 0, 12));
    }

    #[test]
    fn test_encode_matches_decode() {
        let v = Vertex::new(Vec3::new(0.5, -0.5, 0.25), Color::new(10, 20, 30));
        let mut buf = Vec::new();
        v.encode_into(&mut buf);
        assert_eq!(buf.len(), VertexLayout::PositionColor.stride());
        assert_eq!(Vertex::decode(&buf, 0, VertexLayout::PositionColor, Color::BLACK), v);
    }

    #[test]
    fn test_interpolate_truncates() {
        let c = Color::interpolate(Color::RED, Color::GREEN, Color::BLUE, 0.5, 0.5, 0.0);
        assert_eq!(c, Color::new(127, 127, 0));
    }
}
