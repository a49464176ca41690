use crate::error::Result;
use crate::input::ScriptedEvents;
use crate::render::{ImageRenderer, Renderer};
use crate::scene::SceneConfig;

#[cfg(feature = "sdl2")]
use crate::render::{SdlConfig, SdlRenderer};

use log::info;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Mode {
    /// Open a window and read input from it.
    Window { vsync: bool },
    /// Replay a script into a software frame, optionally saving the last frame.
    Headless {
        script: ScriptedEvents,
        output: Option<PathBuf>,
    },
}

#[derive(Debug)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub assets: PathBuf,
    pub mode: Mode,
}

pub struct TileWalkApp {
    config: AppConfig,
}

impl TileWalkApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(self) -> Result<()> {
        let AppConfig {
            scene,
            assets,
            mode,
        } = self.config;

        // Every asset is loaded up front; any failure aborts before a frame is drawn.
        let window_size = scene.window_size()?;
        let tiles = scene.load_tile_set(&assets)?;
        let typeface = scene.load_typeface(&assets)?;
        let mut game = scene.build_game(&tiles)?;

        match mode {
            Mode::Headless { mut script, output } => {
                let mut renderer = ImageRenderer::new(window_size, Some(typeface))?;

                renderer.load_tile_types(&tiles)?;
                game.run(&mut renderer, &mut script)?;

                if let Some(path) = output {
                    renderer.save(&path)?;
                    info!("Last frame written to {}", path.display());
                }
            }
            #[cfg(feature = "sdl2")]
            Mode::Window { vsync } => {
                let sdl_config = SdlConfig {
                    title: scene.title.clone(),
                    window_size,
                    vsync,
                };
                let mut renderer = SdlRenderer::new(&sdl_config, Some(typeface))?;
                let mut events = renderer.events()?;

                renderer.load_tile_types(&tiles)?;
                game.run(&mut renderer, &mut events)?;
            }
            #[cfg(not(feature = "sdl2"))]
            Mode::Window { .. } => {
                return Err(crate::error::Error::Render(
                    "built without the sdl2 feature, use --headless".to_string(),
                ));
            }
        }

        info!("Game finished");
        Ok(())
    }
}
