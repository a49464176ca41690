#[cfg(feature = "sdl2")]
pub mod sdl_renderer;

pub mod image_renderer;

pub use image_renderer::ImageRenderer;

#[cfg(feature = "sdl2")]
pub use sdl_renderer::{SdlConfig, SdlEvents, SdlRenderer};

use crate::message::Message;
use crate::tile::{Tile, TileSet};

/// Colour used for the status line, white like the classic SDL_ttf demos.
pub const TEXT_COLOR: [u8; 3] = [0xff, 0xff, 0xff];

/// A display backend the game draws into, back to front.
pub trait Renderer {
    type Error;

    /// Prepare backend resources for every tile type before the first frame.
    fn load_tile_types(&mut self, tiles: &TileSet) -> Result<(), Self::Error>;

    fn clear(&mut self);

    /// Blit the tile's image with its top-left corner at the tile's rectangle.
    fn draw_tile(&mut self, tile: &Tile) -> Result<(), Self::Error>;

    /// Blit the status line at the top-left corner of the frame.
    ///
    /// Implementations keep one raster of the text and rebuild it only when
    /// the message generation changed, releasing the old raster first.
    fn draw_message(&mut self, message: &Message) -> Result<(), Self::Error>;

    fn present(&mut self);
}
