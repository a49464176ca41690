use log::error;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use structopt::StructOpt;
use structopt_flags::LogLevel;

use tile_walk::app::TileWalkApp;
use tile_walk::cli::Opt;

fn main() {
    let opt: Opt = Opt::from_args();

    TermLogger::init(
        opt.verbose.get_level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    let result = opt
        .to_app_config()
        .and_then(|config| TileWalkApp::new(config).run());

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
