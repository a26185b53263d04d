mod app;
mod config;
mod grid;
mod input;
mod model;
mod preset;
mod render;
mod sim;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use config::{init_logging, load_settings, project_paths, Args, Settings};
use grid::Grid;
use sim::Simulation;
use tracing::info;

/// Exit status after printing usage.
const USAGE_EXIT: i32 = 255;

fn main() -> Result<()> {
    let args = Args::parse();
    if args.help {
        Args::command().print_help()?;
        println!();
        std::process::exit(USAGE_EXIT);
    }

    // no resolvable home directory means no settings file and no log
    let settings = match project_paths() {
        Ok(paths) => {
            init_logging(&paths.log_path)?;
            load_settings(&paths.settings_path)
        }
        Err(_) => Settings::default(),
    };

    let grid = match &args.preset {
        Some(path) => {
            let origin = args.origin();
            let grid = preset::load(path, origin)?;
            info!(
                path = %path.display(),
                x = origin.x,
                y = origin.y,
                alive = grid.population(),
                "loaded preset"
            );
            grid
        }
        None => Grid::default(),
    };

    let interval = args.interval(&settings);
    info!(
        interval_ms = interval.millis(),
        speed = interval.speed_level(),
        "starting"
    );

    app::run(Simulation::new(grid, interval), settings)
}
