//! Frame export
//!
//! Writes a render target's color buffer through the `image` crate.

use std::path::Path;
use image::{ImageBuffer, ImageError, ImageFormat, Rgb, RgbImage};
use crate::rasterizer::RenderTarget;

/// Copy the color buffer into an `RgbImage`
pub fn to_rgb_image(target: &RenderTarget) -> RgbImage {
    ImageBuffer::<Rgb<u8>, Vec<u8>>::from_fn(target.width() as u32, target.height() as u32, |x, y| {
        let c = target.color_at(x as usize, y as usize).unwrap_or_default();
        Rgb(c.to_bytes())
    })
}

/// RGBA bytes with opaque alpha, for display surfaces
pub fn to_rgba8(target: &RenderTarget) -> Vec<u8> {
    target.colors().iter().flat_map(|c| c.to_rgba()).collect()
}

/// Image file format for saved frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameFormat {
    #[default]
    Png,
    /// Binary PPM (P6)
    Ppm,
}

impl FrameFormat {
    /// Parse a file extension such as "png" or "ppm" (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(FrameFormat::Png),
            "ppm" | "pnm" => Some(FrameFormat::Ppm),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FrameFormat::Png => "png",
            FrameFormat::Ppm => "ppm",
        }
    }
}

/// Write the color buffer in `format`
pub fn save_frame<P: AsRef<Path>>(target: &RenderTarget, path: P, format: FrameFormat) -> Result<(), ImageError> {
    match format {
        FrameFormat::Png => save_png(target, path),
        FrameFormat::Ppm => save_ppm(target, path),
    }
}

/// Target size as texture dimensions, or `None` if a side exceeds `u16`
pub fn texture_size(target: &RenderTarget) -> Option<(u16, u16)> {
    let w = u16::try_from(target.width()).ok()?;
    let h = u16::try_from(target.height()).ok()?;
    Some((w, h))
}

pub fn save_png<P: AsRef<Path>>(target: &RenderTarget, path: P) -> Result<(), ImageError> {
    to_rgb_image(target).save_with_format(path, ImageFormat::Png)
}

/// Binary PPM (P6)
pub fn save_ppm<P: AsRef<Path>>(target: &RenderTarget, path: P) -> Result<(), ImageError> {
    to_rgb_image(target).save_with_format(path, ImageFormat::Pnm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_to_rgb_image_matches_buffer() {
        let mut t = RenderTarget::new(3, 2, Color::new(9, 8, 7)).unwrap();
        t.set_pixel(2, 1, Color::RED);
        let img = to_rgb_image(&t);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.as_raw(), &t.color_bytes());
        assert_eq!(img.get_pixel(2, 1), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_to_rgba8_is_opaque() {
        let t = RenderTarget::new(2, 2, Color::new(1, 2, 3)).unwrap();
        let rgba = to_rgba8(&t);
        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_save_and_reload_png() {
        let mut t = RenderTarget::new(4, 4, Color::BLACK).unwrap();
        t.draw_line(0, 0, 3, 3, Color::GREEN);
        let path = std::env::temp_dir().join(format!("csr_export_{}.png", std::process::id()));
        save_png(&t, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.as_raw(), &t.color_bytes());
    }

    #[test]
    fn test_save_and_reload_ppm() {
        let mut t = RenderTarget::new(5, 3, Color::new(40, 40, 40)).unwrap();
        t.draw_line(0, 2, 4, 0, Color::new(200, 100, 50));
        let path = std::env::temp_dir().join(format!("csr_export_{}.ppm", std::process::id()));
        save_frame(&t, &path, FrameFormat::Ppm).unwrap();

        let raw = std::fs::read(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();

        assert!(raw.starts_with(b"P6"));
        assert_eq!(loaded.dimensions(), (5, 3));
        assert_eq!(loaded.as_raw(), &t.color_bytes());
    }

    #[test]
    fn test_frame_format_from_extension() {
        assert_eq!(FrameFormat::from_extension("PPM"), Some(FrameFormat::Ppm));
        assert_eq!(FrameFormat::from_extension("png"), Some(FrameFormat::Png));
        assert_eq!(FrameFormat::from_extension("jpg"), None);
        assert_eq!(FrameFormat::Ppm.extension(), "ppm");
    }

    #[test]
    fn test_texture_size_limits() {
        let small = RenderTarget::new(320, 240, Color::BLACK).unwrap();
        assert_eq!(texture_size(&small), Some((320, 240)));

        let wide = RenderTarget::new(70_000, 1, Color::BLACK).unwrap();
        assert_eq!(texture_size(&wide), None);
    }
}
