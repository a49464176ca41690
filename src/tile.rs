use crate::grid::{Position, Size};
use crate::sprite::Sprite;
use std::collections::HashMap;

/// Index of a [`TileType`] inside the [`TileSet`] that loaded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileTypeId(usize);

impl TileTypeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct TileType {
    pub name: String,
    pub sprite: Sprite,
}

/// Owns every decoded tile image. Tiles refer into it by [`TileTypeId`].
#[derive(Debug, Default)]
pub struct TileSet {
    types: Vec<TileType>,
    names: HashMap<String, TileTypeId>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tile type. Re-using a name replaces what the name resolves to,
    /// tiles already holding the old id keep drawing the old image.
    pub fn insert(&mut self, name: &str, sprite: Sprite) -> TileTypeId {
        let id = TileTypeId(self.types.len());

        self.types.push(TileType {
            name: name.to_string(),
            sprite,
        });
        self.names.insert(name.to_string(), id);

        id
    }

    pub fn get(&self, id: TileTypeId) -> Option<&TileType> {
        self.types.get(id.0)
    }

    pub fn id(&self, name: &str) -> Option<TileTypeId> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileTypeId, &TileType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, tile_type)| (TileTypeId(index), tile_type))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A placement of a tile type on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    tile_type: TileTypeId,
    tile_size: Size,
    x: usize,
    y: usize,
    rect: Rect,
}

impl Tile {
    pub fn new(tile_type: TileTypeId, (x, y): Position, tile_size: Size) -> Self {
        let mut tile = Self {
            tile_type,
            tile_size,
            x,
            y,
            rect: Rect {
                x: 0,
                y: 0,
                width: u32::try_from(tile_size.width).unwrap_or(u32::MAX),
                height: u32::try_from(tile_size.height).unwrap_or(u32::MAX),
            },
        };

        tile.set_position((x, y));
        tile
    }

    pub fn tile_type(&self) -> TileTypeId {
        self.tile_type
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn position(&self) -> Position {
        (self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_x(&mut self, x: usize) {
        self.set_position((x, self.y));
    }

    pub fn set_y(&mut self, y: usize) {
        self.set_position((self.x, y));
    }

    /// Moves the tile to a cell. Pixel offsets past `i32::MAX` saturate,
    /// which leaves the tile off screen.
    pub fn set_position(&mut self, (x, y): Position) {
        self.x = x;
        self.y = y;
        self.rect.x = pixel_offset(x, self.tile_size.width);
        self.rect.y = pixel_offset(y, self.tile_size.height);
    }
}

fn pixel_offset(cell: usize, extent: usize) -> i32 {
    cell.checked_mul(extent)
        .and_then(|offset| i32::try_from(offset).ok())
        .unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn rect_follows_grid_position() {
        let mut set = TileSet::new();
        let id = set.insert("lawn", Sprite::from(RgbaImage::new(94, 94)));
        let mut tile = Tile::new(id, (2, 1), Size::new(94, 94));

        assert_eq!(
            tile.rect(),
            Rect {
                x: 188,
                y: 94,
                width: 94,
                height: 94
            }
        );

        tile.set_x(3);
        tile.set_y(4);

        assert_eq!(tile.position(), (3, 4));
        assert_eq!((tile.rect().x, tile.rect().y), (282, 376));
    }

    #[test]
    fn far_positions_saturate_off_screen() {
        let mut set = TileSet::new();
        let id = set.insert("lawn", Sprite::from(RgbaImage::new(94, 94)));
        let mut tile = Tile::new(id, (30_000_000, 0), Size::new(94, 94));

        assert_eq!(tile.rect().x, i32::MAX);
        assert_eq!(tile.rect().y, 0);

        tile.set_position((1, usize::MAX));

        assert_eq!((tile.rect().x, tile.rect().y), (94, i32::MAX));
    }

    #[test]
    fn tile_types_are_shared_by_id() {
        let mut set = TileSet::new();
        let wood = set.insert("wood", Sprite::from(RgbaImage::new(4, 4)));
        let tiles: Vec<Tile> = (0..5)
            .map(|x| Tile::new(wood, (x, 1), Size::new(4, 4)))
            .collect();

        assert_eq!(set.len(), 1);
        assert!(tiles.iter().all(|t| t.tile_type() == wood));
        assert_eq!(set.id("wood"), Some(wood));
        assert_eq!(set.get(wood).map(|t| t.name.as_str()), Some("wood"));
        assert!(set.id("aqua").is_none());
    }
}
