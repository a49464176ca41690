use crate::error::{Error, Result};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::fs;
use std::path::Path;

/// A loaded font at a fixed pixel size.
pub struct Typeface {
    font: Font<'static>,
    scale: Scale,
}

impl Typeface {
    pub fn load(path: &Path, size: f32) -> Result<Self> {
        let data = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_vec(data, size).ok_or_else(|| Error::InvalidFont(path.to_path_buf()))
    }

    pub fn from_vec(data: Vec<u8>, size: f32) -> Option<Self> {
        let font = Font::try_from_vec(data)?;

        Some(Self {
            font,
            scale: Scale::uniform(size),
        })
    }

    /// Lays `text` out on a single line over a transparent background.
    pub fn rasterize(&self, text: &str, color: [u8; 3]) -> RgbaImage {
        if text.is_empty() {
            return RgbaImage::new(1, 1);
        }

        let v_metrics = self.font.v_metrics(self.scale);
        let glyphs: Vec<_> = self
            .font
            .layout(text, self.scale, point(0.0, v_metrics.ascent))
            .collect();

        let width = glyphs
            .iter()
            .rev()
            .find_map(|g| g.pixel_bounding_box().map(|bb| bb.max.x))
            .unwrap_or(0)
            .max(1) as u32;
        let height = (v_metrics.ascent - v_metrics.descent).ceil().max(1.0) as u32;

        let mut image = RgbaImage::new(width, height);

        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;

                    if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                        let alpha = (v * 255.0) as u8;
                        image.put_pixel(
                            px as u32,
                            py as u32,
                            Rgba([color[0], color[1], color[2], alpha]),
                        );
                    }
                });
            }
        }

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 3] = [0xff, 0xff, 0xff];

    fn typeface() -> Typeface {
        let data = include_bytes!("../tests/fonts/DejaVuSans.ttf").to_vec();

        Typeface::from_vec(data, 12.0).unwrap()
    }

    #[test]
    fn empty_text_is_a_single_pixel() {
        let image = typeface().rasterize("", WHITE);

        assert_eq!(image.dimensions(), (1, 1));
    }

    #[test]
    fn text_fits_one_line() {
        let image = typeface().rasterize("Initialized", WHITE);
        let (width, height) = image.dimensions();

        assert!(width > 20 && width < 200, "width {}", width);
        assert!((10..=16).contains(&height), "height {}", height);
        assert!(image.pixels().any(|p| p.0[3] == 0));
        assert!(image.pixels().any(|p| p.0[3] > 0));
        assert!(image
            .pixels()
            .filter(|p| p.0[3] > 0)
            .all(|p| p.0[..3] == WHITE));
    }

    #[test]
    fn longer_text_is_wider() {
        let typeface = typeface();
        let short = typeface.rasterize("quit", WHITE);
        let long = typeface.rasterize("key down: left", WHITE);

        assert!(long.width() > short.width());
        assert_eq!(long.height(), short.height());
    }

    #[test]
    fn rejects_non_font_data() {
        assert!(Typeface::from_vec(b"not a font".to_vec(), 12.0).is_none());
    }
}
