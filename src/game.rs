use crate::input::{EventSource, InputEvent, Key};
use crate::message::Message;
use crate::player::Player;
use crate::render::Renderer;
use crate::tile::Tile;

use enum_map::{Enum, EnumMap};
use log::{debug, info, trace};

/// Drawing layers, painted in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Layer {
    Background,
    Decor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Quit,
}

pub struct Game {
    layers: EnumMap<Layer, Vec<Tile>>,
    player: Player,
    message: Message,
    state: GameState,
}

impl Game {
    pub fn new(player: Player) -> Self {
        Self {
            layers: EnumMap::default(),
            player,
            message: Message::new("Initialized"),
            state: GameState::Running,
        }
    }

    pub fn place(&mut self, layer: Layer, tile: Tile) {
        self.layers[layer].push(tile);
    }

    pub fn layer(&self, layer: Layer) -> &[Tile] {
        &self.layers[layer]
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    /// Applies one input event and replaces the status line with its description.
    pub fn handle_event(&mut self, event: &InputEvent) {
        debug!("Received {}", event);

        match event {
            InputEvent::Quit => self.state = GameState::Quit,
            InputEvent::KeyDown(key) => match key {
                Key::Left => {
                    self.player.move_left();
                }
                Key::Right => {
                    self.player.move_right();
                }
                Key::Up => {
                    self.player.move_up();
                }
                Key::Down => {
                    self.player.move_down();
                }
                Key::Escape | Key::Char('q') => self.state = GameState::Quit,
                Key::Char(_) | Key::Other(_) => {}
            },
            InputEvent::KeyUp(_) => {}
            InputEvent::MouseButtonDown { .. } => {}
        }

        self.message.replace(event.to_string());
    }

    /// Draws background, decor, player and status line, then presents.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        renderer.clear();

        for tile in self.layers.values().flatten() {
            let rect = tile.rect();
            trace!(
                "Blitting {} {} ({},{})",
                tile.x(),
                tile.y(),
                rect.x,
                rect.y
            );
            renderer.draw_tile(tile)?;
        }

        let player = self.player.tile();
        let rect = player.rect();
        trace!(
            "Blitting player {} {} ({},{})",
            player.x(),
            player.y(),
            rect.x,
            rect.y
        );
        renderer.draw_tile(player)?;

        renderer.draw_message(&self.message)?;
        renderer.present();

        Ok(())
    }

    /// Renders and drains input until a quit event arrives. Returns the number
    /// of frames drawn.
    pub fn run<R, E>(&mut self, renderer: &mut R, events: &mut E) -> Result<usize, R::Error>
    where
        R: Renderer,
        E: EventSource,
    {
        let mut frames = 0;

        while self.is_running() {
            self.render(renderer)?;
            frames += 1;

            for event in events.poll_events() {
                self.handle_event(&event);
            }
        }

        info!("Quit after {} frames", frames);
        Ok(frames)
    }
}
