use crate::error::{Error, Result};
use crate::game::{Game, Layer};
use crate::grid::Size;
use crate::player::Player;
use crate::sprite::Sprite;
use crate::text::Typeface;
use crate::tile::{Tile, TileSet, TileTypeId};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileTypeConfig {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub tile: String,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub tile: String,
    #[serde(default)]
    pub x: usize,
    #[serde(default)]
    pub y: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub path: PathBuf,
    pub size: f32,
}

/// Everything needed to set up a game: assets, layout and window geometry.
///
/// Missing fields fall back to the tile demo: a 640x480 window of 94 pixel
/// tiles, a lawn background, a row of sample tiles, a row of wood and the
/// player in the top left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub title: String,
    pub screen: Size,
    pub tile_size: Size,
    /// Overrides the grid derived from `screen / tile_size`.
    pub grid: Option<Size>,
    pub tile_types: Vec<TileTypeConfig>,
    /// Tile type filling every cell underneath the decor.
    pub background: Option<String>,
    pub decor: Vec<Placement>,
    pub player: PlayerConfig,
    pub font: FontConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let tile_type = |name: &str, path: &str| TileTypeConfig {
            name: name.to_string(),
            path: PathBuf::from(path),
        };
        let place = |tile: &str, x, y| Placement {
            tile: tile.to_string(),
            x,
            y,
        };

        let mut decor = vec![
            place("aqua", 0, 0),
            place("lawn", 1, 0),
            place("marble", 2, 0),
            place("wall", 3, 0),
        ];
        decor.extend((0..5).map(|x| place("wood", x, 1)));

        Self {
            title: "Tile Walk".to_string(),
            screen: Size::new(640, 480),
            tile_size: Size::new(94, 94),
            grid: None,
            tile_types: vec![
                tile_type("aqua", "aqua.jpg"),
                tile_type("lawn", "lawn.jpg"),
                tile_type("marble", "marble_dark.jpg"),
                tile_type("wall", "wall-grey.jpg"),
                tile_type("wood", "wood.jpg"),
                tile_type("player", "player.png"),
            ],
            background: Some("lawn".to_string()),
            decor,
            player: PlayerConfig {
                tile: "player".to_string(),
                x: 0,
                y: 0,
            },
            font: FontConfig {
                path: PathBuf::from("LucidaTypewriterRegular.ttf"),
                size: 12.0,
            },
        }
    }
}

impl SceneConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// The grid of cells, checked to have at least one cell and a pixel
    /// extent that fits window coordinates.
    pub fn grid_size(&self) -> Result<Size> {
        if self.tile_size.width == 0 || self.tile_size.height == 0 {
            return Err(Error::Scene(format!(
                "tile size {}x{} is empty",
                self.tile_size.width, self.tile_size.height
            )));
        }

        let grid = self.grid.unwrap_or(Size::new(
            self.screen.width / self.tile_size.width,
            self.screen.height / self.tile_size.height,
        ));

        if grid.width == 0 || grid.height == 0 {
            return Err(Error::Scene(format!(
                "grid {}x{} has no cells",
                grid.width, grid.height
            )));
        }

        self.pixel_extent(grid)?;
        Ok(grid)
    }

    /// The screen, or the grid's pixel extent when the grid is overridden.
    pub fn window_size(&self) -> Result<Size> {
        let grid = self.grid_size()?;

        match self.grid {
            Some(_) => self.pixel_extent(grid),
            None => self.screen.scaled(Size::new(1, 1)).ok_or_else(|| {
                Error::Scene(format!(
                    "screen {}x{} is too large",
                    self.screen.width, self.screen.height
                ))
            }),
        }
    }

    fn pixel_extent(&self, grid: Size) -> Result<Size> {
        grid.scaled(self.tile_size).ok_or_else(|| {
            Error::Scene(format!(
                "grid {}x{} of {}x{} tiles is too large",
                grid.width, grid.height, self.tile_size.width, self.tile_size.height
            ))
        })
    }

    /// Decodes every tile type image found under `assets`.
    pub fn load_tile_set(&self, assets: &Path) -> Result<TileSet> {
        let mut tiles = TileSet::new();

        for tile_type in &self.tile_types {
            let sprite = Sprite::load(&assets.join(&tile_type.path))?;
            let (width, height) = sprite.dimensions();

            if width as usize != self.tile_size.width || height as usize != self.tile_size.height {
                warn!(
                    "{} is {}x{}, tiles are {}x{}",
                    tile_type.name, width, height, self.tile_size.width, self.tile_size.height
                );
            }

            tiles.insert(&tile_type.name, sprite);
        }

        info!("{} tile types loaded", tiles.len());
        Ok(tiles)
    }

    pub fn load_typeface(&self, assets: &Path) -> Result<Typeface> {
        Typeface::load(&assets.join(&self.font.path), self.font.size)
    }

    /// Lays the scene out over `tiles`. Unknown tile names and positions
    /// outside the grid are rejected.
    pub fn build_game(&self, tiles: &TileSet) -> Result<Game> {
        let grid = self.grid_size()?;
        let lookup = |name: &str| -> Result<TileTypeId> {
            tiles
                .id(name)
                .ok_or_else(|| Error::Scene(format!("unknown tile type: {}", name)))
        };
        let check = |what: &str, x: usize, y: usize| -> Result<()> {
            if grid.contains((x, y)) {
                Ok(())
            } else {
                Err(Error::Scene(format!(
                    "{} at ({}, {}) is outside the {}x{} grid",
                    what, x, y, grid.width, grid.height
                )))
            }
        };

        check("player", self.player.x, self.player.y)?;
        let player = Player::new(
            lookup(&self.player.tile)?,
            (self.player.x, self.player.y),
            grid,
            self.tile_size,
        );
        let mut game = Game::new(player);

        if let Some(background) = &self.background {
            let id = lookup(background)?;

            for position in grid.positions() {
                game.place(Layer::Background, Tile::new(id, position, self.tile_size));
            }
        }

        let mut occupied = HashSet::new();

        for placement in &self.decor {
            check(&placement.tile, placement.x, placement.y)?;

            if !occupied.insert((placement.x, placement.y)) {
                warn!(
                    "more than one decor tile at ({}, {}), the last one wins",
                    placement.x, placement.y
                );
            }

            let id = lookup(&placement.tile)?;
            game.place(
                Layer::Decor,
                Tile::new(id, (placement.x, placement.y), self.tile_size),
            );
        }

        info!(
            "Scene laid out on a {}x{} grid with {} decor tiles",
            grid.width,
            grid.height,
            self.decor.len()
        );

        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn tile_set(config: &SceneConfig) -> TileSet {
        let mut tiles = TileSet::new();

        for tile_type in &config.tile_types {
            tiles.insert(&tile_type.name, Sprite::from(RgbaImage::new(94, 94)));
        }

        tiles
    }

    #[test]
    fn default_scene_is_six_by_five() {
        let config = SceneConfig::default();

        assert_eq!(config.grid_size().unwrap(), Size::new(6, 5));
        assert_eq!(config.window_size().unwrap(), Size::new(640, 480));
    }

    #[test]
    fn default_scene_builds() {
        let config = SceneConfig::default();
        let game = config.build_game(&tile_set(&config)).unwrap();

        assert_eq!(game.layer(Layer::Background).len(), 30);
        assert_eq!(game.layer(Layer::Decor).len(), 9);
        assert_eq!(game.player().position(), (0, 0));
        assert_eq!(game.message().text(), "Initialized");
    }

    #[test]
    fn grid_override_resizes_window() {
        let config = SceneConfig {
            grid: Some(Size::new(3, 2)),
            ..SceneConfig::default()
        };

        assert_eq!(config.window_size().unwrap(), Size::new(282, 188));
    }

    #[test]
    fn rejects_out_of_bounds_decor() {
        let mut config = SceneConfig::default();
        config.decor.push(Placement {
            tile: "wood".to_string(),
            x: 6,
            y: 0,
        });

        assert!(matches!(
            config.build_game(&tile_set(&config)),
            Err(Error::Scene(_))
        ));
    }

    #[test]
    fn rejects_unknown_tile_names() {
        let mut config = SceneConfig::default();
        config.background = Some("lava".to_string());

        assert!(matches!(
            config.build_game(&tile_set(&config)),
            Err(Error::Scene(_))
        ));
    }

    #[test]
    fn rejects_empty_tiles() {
        let config = SceneConfig {
            tile_size: Size::new(0, 94),
            ..SceneConfig::default()
        };

        assert!(config.grid_size().is_err());
    }

    #[test]
    fn rejects_oversized_grid() {
        for grid in [Size::new(usize::MAX / 2, 1), Size::new(1, 30_000_000)] {
            let config = SceneConfig {
                grid: Some(grid),
                ..SceneConfig::default()
            };

            assert!(matches!(config.grid_size(), Err(Error::Scene(_))));
            assert!(matches!(config.window_size(), Err(Error::Scene(_))));
            assert!(matches!(
                config.build_game(&tile_set(&config)),
                Err(Error::Scene(_))
            ));
        }
    }

    #[test]
    fn rejects_oversized_screen() {
        let config = SceneConfig {
            screen: Size::new(usize::MAX, 480),
            ..SceneConfig::default()
        };

        assert!(matches!(config.window_size(), Err(Error::Scene(_))));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "title": "Mouse", "grid": { "width": 4, "height": 4 } }"#)
                .unwrap();

        assert_eq!(config.title, "Mouse");
        assert_eq!(config.grid_size().unwrap(), Size::new(4, 4));
        assert_eq!(config.tile_types, SceneConfig::default().tile_types);
    }

    #[test]
    fn loads_scene_files() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes/tiles.json");
        let config = SceneConfig::from_file(&path).unwrap();
        let game = config.build_game(&tile_set(&config)).unwrap();

        assert_eq!(config.title, "Tiles");
        assert!(game.layer(Layer::Background).is_empty());
        assert_eq!(game.layer(Layer::Decor).len(), 5);
    }

    #[test]
    fn missing_asset_is_an_error() {
        let config = SceneConfig::default();

        assert!(config
            .load_tile_set(Path::new("/nonexistent/assets"))
            .is_err());
        assert!(config
            .load_typeface(Path::new("/nonexistent/assets"))
            .is_err());
    }
}
