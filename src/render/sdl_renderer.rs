use super::{Renderer, TEXT_COLOR};
use crate::grid::Size;
use crate::input::{EventSource, InputEvent, Key, MouseButton};
use crate::message::Message;
use crate::text::Typeface;
use crate::tile::{Tile, TileSet};

use image::RgbaImage;
use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton as SdlMouseButton;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, Sdl};

#[derive(Debug, Clone)]
pub struct SdlConfig {
    pub title: String,
    pub window_size: Size,
    pub vsync: bool,
}

/// A texture destroyed when dropped. Must not outlive the canvas it came from.
struct OwnedTexture {
    texture: Option<Texture>,
    width: u32,
    height: u32,
}

impl OwnedTexture {
    fn upload(creator: &TextureCreator<WindowContext>, image: &RgbaImage) -> Result<Self, String> {
        let (width, height) = image.dimensions();
        let texture = creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, width, height)
            .map_err(|e| e.to_string())?;

        // Owned from here on, so a failed lock still destroys the texture.
        let mut owned = Self {
            texture: Some(texture),
            width,
            height,
        };
        let texture = owned.texture_mut()?;

        let row = width as usize * 4;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (y, source) in image.as_raw().chunks_exact(row).enumerate() {
                buffer[y * pitch..y * pitch + row].copy_from_slice(source);
            }
        })?;
        texture.set_blend_mode(BlendMode::Blend);

        Ok(owned)
    }

    fn texture_mut(&mut self) -> Result<&mut Texture, String> {
        self.texture.as_mut().ok_or_else(|| "texture already destroyed".to_string())
    }

    fn texture(&self) -> Result<&Texture, String> {
        self.texture.as_ref().ok_or_else(|| "texture already destroyed".to_string())
    }
}

impl Drop for OwnedTexture {
    fn drop(&mut self) {
        if let Some(texture) = self.texture.take() {
            unsafe { texture.destroy() }
        }
    }
}

/// SDL2 window renderer.
pub struct SdlRenderer {
    // Textures are declared before the canvas so they are destroyed first.
    message: Option<(u64, OwnedTexture)>,
    textures: Vec<OwnedTexture>,
    typeface: Option<Typeface>,
    texture_creator: TextureCreator<WindowContext>,
    canvas: Canvas<Window>,
    context: Sdl,
}

impl SdlRenderer {
    pub fn new(config: &SdlConfig, typeface: Option<Typeface>) -> Result<Self, String> {
        let size = config.window_size;
        let (width, height) = match (u32::try_from(size.width), u32::try_from(size.height)) {
            (Ok(width), Ok(height)) => (width, height),
            _ => return Err(format!("window {}x{} is too large", size.width, size.height)),
        };

        let context = sdl2::init()?;
        let video = context.video()?;

        let window = video
            .window(&config.title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut builder = window.into_canvas();

        if config.vsync {
            builder = builder.present_vsync();
        }

        let canvas = builder.build().map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();

        debug!(
            "SDL window {}x{} ready",
            config.window_size.width, config.window_size.height
        );

        Ok(Self {
            message: None,
            textures: Vec::new(),
            typeface,
            texture_creator,
            canvas,
            context,
        })
    }

    /// The window's event queue. SDL allows only one to exist at a time.
    pub fn events(&self) -> Result<SdlEvents, String> {
        Ok(SdlEvents {
            pump: self.context.event_pump()?,
        })
    }
}

impl Renderer for SdlRenderer {
    type Error = String;

    fn load_tile_types(&mut self, tiles: &TileSet) -> Result<(), Self::Error> {
        self.textures.clear();

        for (_, tile_type) in tiles.iter() {
            let texture = OwnedTexture::upload(&self.texture_creator, &tile_type.sprite.to_rgba8())?;
            self.textures.push(texture);
        }

        Ok(())
    }

    fn clear(&mut self) {
        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();
    }

    fn draw_tile(&mut self, tile: &Tile) -> Result<(), Self::Error> {
        let texture = self
            .textures
            .get(tile.tile_type().index())
            .ok_or("Texture not found")?;
        let rect = tile.rect();
        let target = Rect::new(rect.x, rect.y, texture.width, texture.height);

        self.canvas.copy(texture.texture()?, None, Some(target))
    }

    fn draw_message(&mut self, message: &Message) -> Result<(), Self::Error> {
        let Some(typeface) = &self.typeface else {
            return Ok(());
        };

        let stale = self
            .message
            .as_ref()
            .map_or(true, |(generation, _)| *generation != message.generation());

        if stale {
            self.message = None;

            let raster = typeface.rasterize(message.text(), TEXT_COLOR);
            let texture = OwnedTexture::upload(&self.texture_creator, &raster)?;

            self.message = Some((message.generation(), texture));
        }

        if let Some((_, texture)) = &self.message {
            let target = Rect::new(0, 0, texture.width, texture.height);
            self.canvas.copy(texture.texture()?, None, Some(target))?;
        }

        Ok(())
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}

/// Pending SDL input, translated into [`InputEvent`]s.
pub struct SdlEvents {
    pump: EventPump,
}

impl SdlEvents {
    fn translate(event: Event) -> Option<InputEvent> {
        match event {
            Event::Quit { .. } => Some(InputEvent::Quit),
            Event::KeyDown {
                keycode: Some(keycode),
                ..
            } => Some(InputEvent::KeyDown(translate_key(keycode))),
            Event::KeyUp {
                keycode: Some(keycode),
                ..
            } => Some(InputEvent::KeyUp(translate_key(keycode))),
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => Some(InputEvent::MouseButtonDown {
                button: translate_button(mouse_btn),
                x,
                y,
            }),
            _ => None,
        }
    }
}

impl EventSource for SdlEvents {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.pump.poll_iter().filter_map(SdlEvents::translate).collect()
    }
}

fn translate_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Escape => Key::Escape,
        _ => {
            let name = keycode.name();
            let mut chars = name.chars();

            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                _ => Key::Other(name),
            }
        }
    }
}

fn translate_button(button: SdlMouseButton) -> MouseButton {
    match button {
        SdlMouseButton::Left => MouseButton::Left,
        SdlMouseButton::Middle => MouseButton::Middle,
        SdlMouseButton::Right => MouseButton::Right,
        SdlMouseButton::X1 => MouseButton::Other(4),
        SdlMouseButton::X2 => MouseButton::Other(5),
        SdlMouseButton::Unknown => MouseButton::Other(0),
    }
}
