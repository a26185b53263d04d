use crate::model::{TickInterval, SPEED_DEFAULT, SPEED_MAX, SPEED_MIN};
use crate::preset::Origin;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(
    name = "termlife",
    about = "Conway's Game of Life in the terminal",
    disable_help_flag = true
)]
pub(crate) struct Args {
    /// preset file of 0's and 1's to start from
    #[arg(short = 'p', long = "preset")]
    pub(crate) preset: Option<PathBuf>,

    /// column the preset is read into
    #[arg(short = 'x', requires = "preset")]
    pub(crate) x: Option<usize>,

    /// row the preset is read into
    #[arg(short = 'y', requires = "preset")]
    pub(crate) y: Option<usize>,

    /// initial speed level (1 = slowest, 100 = fastest)
    #[arg(short = 's', long = "speed", value_parser = clap::value_parser!(u32).range(SPEED_MIN as i64..=SPEED_MAX as i64))]
    pub(crate) speed: Option<u32>,

    /// print usage and exit
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub(crate) help: bool,
}

impl Args {
    pub(crate) fn origin(&self) -> Origin {
        Origin {
            x: self.x.unwrap_or(0),
            y: self.y.unwrap_or(0),
        }
    }

    pub(crate) fn interval(&self, settings: &Settings) -> TickInterval {
        TickInterval::from_speed_level(self.speed.unwrap_or(settings.speed))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) fps_cap: u32,
    pub(crate) live_glyph: char,
    pub(crate) dead_glyph: char,
    pub(crate) enable_color: bool,
    pub(crate) speed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 60,
            live_glyph: 'X',
            dead_glyph: '.',
            enable_color: true,
            speed: SPEED_DEFAULT,
        }
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "termlife", "TermLife")
        .context("could not resolve project directories")?;
    let config_dir = proj.config_dir().to_path_buf();
    let data_dir = proj.data_local_dir().to_path_buf();
    Ok(Paths {
        settings_path: config_dir.join("settings.json"),
        log_path: data_dir.join("termlife.log"),
    })
}

/// A missing file is the normal case; a malformed one is reported and ignored.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed settings file, using defaults");
            Settings::default()
        }
    }
}

/// Installs a file-backed subscriber when `RUST_LOG` is set; stdout belongs to the board.
pub(crate) fn init_logging(log_path: &Path) -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create log directory {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("could not open log file {}", log_path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
