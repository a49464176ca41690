use super::{Renderer, TEXT_COLOR};
use crate::error::{Error, Result};
use crate::grid::Size;
use crate::message::Message;
use crate::text::Typeface;
use crate::tile::{Tile, TileSet};

use image::{Rgba, RgbaImage};
use log::debug;
use std::path::Path;

/// Software renderer compositing into an in-memory RGBA frame.
pub struct ImageRenderer {
    frame: RgbaImage,
    presented: Option<RgbaImage>,
    tiles: Vec<RgbaImage>,
    typeface: Option<Typeface>,
    message: Option<(u64, RgbaImage)>,
    frames: usize,
    message_rasters: usize,
}

impl ImageRenderer {
    /// Without a typeface the status line is tracked but never drawn.
    pub fn new(screen: Size, typeface: Option<Typeface>) -> Result<Self> {
        let (width, height) = match (u32::try_from(screen.width), u32::try_from(screen.height)) {
            (Ok(width), Ok(height)) => (width, height),
            _ => {
                return Err(Error::Render(format!(
                    "frame {}x{} is too large",
                    screen.width, screen.height
                )))
            }
        };

        Ok(Self {
            frame: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            presented: None,
            tiles: Vec::new(),
            typeface,
            message: None,
            frames: 0,
            message_rasters: 0,
        })
    }

    /// The last presented frame.
    pub fn frame(&self) -> Option<&RgbaImage> {
        self.presented.as_ref()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// How many times the status line was rasterized.
    pub fn message_rasters(&self) -> usize {
        self.message_rasters
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let frame = self
            .presented
            .as_ref()
            .ok_or_else(|| Error::Render("no frame was presented".to_string()))?;

        frame.save(path).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Saved frame {} to {}", self.frames, path.display());
        Ok(())
    }
}

impl Renderer for ImageRenderer {
    type Error = Error;

    fn load_tile_types(&mut self, tiles: &TileSet) -> Result<()> {
        self.tiles = tiles
            .iter()
            .map(|(_, tile_type)| tile_type.sprite.to_rgba8())
            .collect();

        Ok(())
    }

    fn clear(&mut self) {
        for pixel in self.frame.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 255]);
        }
    }

    fn draw_tile(&mut self, tile: &Tile) -> Result<()> {
        let image = self
            .tiles
            .get(tile.tile_type().index())
            .ok_or_else(|| Error::Render(format!("missing image for {:?}", tile.tile_type())))?;
        let rect = tile.rect();

        image::imageops::overlay(&mut self.frame, image, rect.x as i64, rect.y as i64);
        Ok(())
    }

    fn draw_message(&mut self, message: &Message) -> Result<()> {
        let Some(typeface) = &self.typeface else {
            return Ok(());
        };

        let stale = self
            .message
            .as_ref()
            .map_or(true, |(generation, _)| *generation != message.generation());

        if stale {
            self.message = None;
            self.message = Some((
                message.generation(),
                typeface.rasterize(message.text(), TEXT_COLOR),
            ));
            self.message_rasters += 1;
        }

        if let Some((_, raster)) = &self.message {
            image::imageops::overlay(&mut self.frame, raster, 0, 0);
        }

        Ok(())
    }

    fn present(&mut self) {
        self.presented = Some(self.frame.clone());
        self.frames += 1;
    }
}
