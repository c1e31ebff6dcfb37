//! Render target: paired color and depth buffers

use super::error::TargetError;
use super::types::Color;

/// Depth value meaning "nothing drawn here yet"
pub const FAR_DEPTH: f32 = 1.0;

/// Color and depth buffers for one frame, row-major with the origin at the
/// top-left. Both buffers always hold exactly `width * height` cells.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) clear_color: Color,
    pub(super) color: Vec<Color>,
    pub(super) depth: Vec<f32>,
}

impl RenderTarget {
    /// Bytes needed for a `width` x `height` target (color plus depth),
    /// or `None` if the size overflows.
    pub fn memory_size(width: usize, height: usize) -> Option<usize> {
        let pixels = width.checked_mul(height)?;
        let per_pixel = std::mem::size_of::<Color>() + std::mem::size_of::<f32>();
        pixels.checked_mul(per_pixel)
    }

    /// Allocate a cleared target
    pub fn new(width: usize, height: usize, clear_color: Color) -> Result<Self, TargetError> {
        let required = Self::memory_size(width, height).unwrap_or(usize::MAX);
        Self::with_memory_budget(required, width, height, clear_color)
    }

    /// Allocate a cleared target, refusing if it would need more than
    /// `budget` bytes. Nothing is allocated on failure.
    pub fn with_memory_budget(
        budget: usize,
        width: usize,
        height: usize,
        clear_color: Color,
    ) -> Result<Self, TargetError> {
        if width == 0 || height == 0 {
            log::warn!("rejected render target {}x{}", width, height);
            return Err(TargetError::InvalidDimensions { width, height });
        }

        let required = Self::memory_size(width, height).ok_or(TargetError::InsufficientMemory {
            required: usize::MAX,
            available: budget,
        })?;

        if budget < required {
            log::warn!("render target {}x{} needs {} bytes, budget is {}", width, height, required, budget);
            return Err(TargetError::InsufficientMemory { required, available: budget });
        }

        log::debug!("render target {}x{} ({} bytes)", width, height, required);

        Ok(Self {
            width,
            height,
            clear_color,
            color: vec![clear_color; width * height],
            depth: vec![FAR_DEPTH; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Reset every color cell to the clear color and every depth cell to
    /// `FAR_DEPTH`
    pub fn clear(&mut self) {
        self.color.fill(self.clear_color);
        self.depth.fill(FAR_DEPTH);
    }

    pub fn colors(&self) -> &[Color] {
        &self.color
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Packed RGB bytes, 3 per pixel, ready for an image encoder
    pub fn color_bytes(&self) -> Vec<u8> {
        self.color.iter().flat_map(|c| c.to_bytes()).collect()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Write a color without touching depth. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> bool {
        if x >= 0 && y >= 0 {
            if let Some(i) = self.index(x as usize, y as usize) {
                self.color[i] = color;
                return true;
            }
        }
        false
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm.
    /// Returns the number of pixels written.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> usize {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;
        let mut written = 0;

        loop {
            if self.set_pixel(x, y, color) {
                written += 1;
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }

        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_size() {
        assert_eq!(RenderTarget::memory_size(4, 4), Some(16 * 3 + 16 * 4));
        assert_eq!(RenderTarget::memory_size(usize::MAX, 2), None);
    }

    #[test]
    fn test_new_is_cleared() {
        let t = RenderTarget::new(3, 2, Color::new(40, 40, 40)).unwrap();
        assert!(t.colors().iter().all(|&c| c == Color::new(40, 40, 40)));
        assert!(t.depths().iter().all(|&d| d == FAR_DEPTH));
        assert_eq!(t.colors().len(), 6);
    }

    #[test]
    fn test_budget_too_small() {
        let need = RenderTarget::memory_size(8, 8).unwrap();
        let err = RenderTarget::with_memory_budget(need - 1, 8, 8, Color::BLACK).unwrap_err();
        assert_eq!(err, TargetError::InsufficientMemory { required: need, available: need - 1 });
        assert!(RenderTarget::with_memory_budget(need, 8, 8, Color::BLACK).is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            RenderTarget::new(0, 10, Color::BLACK),
            Err(TargetError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            RenderTarget::new(10, 0, Color::BLACK),
            Err(TargetError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_clear_resets_both_buffers() {
        let mut t = RenderTarget::new(5, 3, Color::BLACK).unwrap();
        t.draw_line(0, 0, 4, 2, Color::RED);
        t.depth[7] = 0.25;
        t.set_clear_color(Color::BLUE);
        t.clear();
        assert!(t.colors().iter().all(|&c| c == Color::BLUE));
        assert!(t.depths().iter().all(|&d| d == FAR_DEPTH));
    }

    #[test]
    fn test_draw_line_clips_to_bounds() {
        let mut t = RenderTarget::new(4, 4, Color::BLACK).unwrap();
        let written = t.draw_line(-2, 1, 6, 1, Color::WHITE);
        assert_eq!(written, 4);
        for x in 0..4 {
            assert_eq!(t.color_at(x, 1), Some(Color::WHITE));
        }
        assert_eq!(t.color_at(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_color_bytes_row_major() {
        let mut t = RenderTarget::new(2, 2, Color::BLACK).unwrap();
        t.set_pixel(1, 0, Color::new(1, 2, 3));
        let bytes = t.color_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[3..6], &[1, 2, 3]);
    }
}
