use crate::app::{AppConfig, Mode};
use crate::error::Result;
use crate::grid::Size;
use crate::input::ScriptedEvents;
use crate::scene::SceneConfig;
use std::path::PathBuf;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;

fn load_scene(s: &str) -> Result<SceneConfig> {
    SceneConfig::from_file(&PathBuf::from(s))
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Tile Walk",
    about = "Walk a player sprite across a grid of tiles"
)]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(
        parse(from_os_str),
        short,
        long,
        default_value = ".",
        help = "Directory holding the images and the font"
    )]
    assets: PathBuf,

    #[structopt(
        parse(try_from_str = load_scene),
        short,
        long,
        help = "Scene description (JSON), defaults to the built-in tile demo"
    )]
    scene: Option<SceneConfig>,

    #[structopt(parse(try_from_str), short, long, help = "Grid size in tiles, e.g. 6x5")]
    grid: Option<Size>,

    #[structopt(long, help = "Render into memory instead of opening a window")]
    headless: bool,

    #[structopt(
        long,
        requires = "headless",
        help = "Comma separated events to replay, e.g. right,right,down,click:left:120:80,q"
    )]
    script: Option<String>,

    #[structopt(
        parse(from_os_str),
        short,
        long,
        requires = "headless",
        help = "Save the last frame as an image"
    )]
    output: Option<PathBuf>,

    #[structopt(long, help = "Turns on vsync")]
    vsync: bool,
}

impl Opt {
    pub fn to_app_config(self) -> Result<AppConfig> {
        let mut scene = self.scene.unwrap_or_default();

        if self.grid.is_some() {
            scene.grid = self.grid;
        }

        let mode = if self.headless {
            Mode::Headless {
                script: ScriptedEvents::parse(self.script.as_deref().unwrap_or(""))?,
                output: self.output,
            }
        } else {
            Mode::Window { vsync: self.vsync }
        };

        Ok(AppConfig {
            scene,
            assets: self.assets,
            mode,
        })
    }
}
