use crate::grid::{Direction, Position, Size};
use crate::tile::{Tile, TileTypeId};
use log::debug;

/// The movable token. Its position never leaves `[0, width-1] x [0, height-1]`.
#[derive(Debug, Clone)]
pub struct Player {
    tile: Tile,
    bounds: Size,
}

impl Player {
    /// `start` is clamped into `bounds`.
    pub fn new(sprite: TileTypeId, start: Position, bounds: Size, tile_size: Size) -> Self {
        let start = (
            start.0.min(bounds.width.saturating_sub(1)),
            start.1.min(bounds.height.saturating_sub(1)),
        );

        Self {
            tile: Tile::new(sprite, start, tile_size),
            bounds,
        }
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    pub fn position(&self) -> Position {
        self.tile.position()
    }

    /// Returns whether the player moved. Steps past the edge are dropped.
    pub fn step(&mut self, direction: Direction) -> bool {
        match self.bounds.neighbor(self.tile.position(), direction) {
            Some(position) => {
                self.tile.set_position(position);
                debug!("player moved {:?} to {:?}", direction, position);
                true
            }
            None => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.step(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.step(Direction::Right)
    }

    pub fn move_up(&mut self) -> bool {
        self.step(Direction::Up)
    }

    pub fn move_down(&mut self) -> bool {
        self.step(Direction::Down)
    }
}
