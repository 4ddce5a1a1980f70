use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use jmenu::app;
use jmenu::assets::AssetCache;
use jmenu::audio::{AudioContext, MENU_THEME};
use jmenu::cli::Cli;
use jmenu::config::ConfigStore;
use jmenu::logging;
use jmenu::menu::MenuController;
use jmenu::paths::Paths;
use jmenu::saves::SaveBook;

const MUSIC_FADE_IN: Duration = Duration::from_millis(800);

fn main() -> ExitCode {
    let cli = Cli::parse();

    let paths = Paths::new(&cli.root);
    if let Err(e) = paths.ensure_dirs() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = logging::init(&paths, cli.log_level) {
        eprintln!("cannot install logger: {e}");
    }
    info!("[main] Starting in {}", paths.root().display());

    let config = ConfigStore::open(paths.config_file());
    let saves = SaveBook::open(paths.saves_file());
    let assets = AssetCache::new(&paths);

    let mut audio = AudioContext::new(config.volume());
    audio.load_menu_sounds(&paths.assets_dir());
    audio.play_music(MENU_THEME, MUSIC_FADE_IN);

    let controller = MenuController::new(config, saves, assets);
    match app::run(controller, audio) {
        Ok(()) => {
            info!("[main] Menu closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("[main] Event loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
