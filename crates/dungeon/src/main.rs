//! Dungeon layout generator
//!
//! Builds a generator config from an optional config file plus flag
//! overrides, generates one layout and prints it.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use thiserror::Error;

use dg_assets::{AssetError, RoomAssetTable};
use dg_core::{ConfigError, GenerationError, GeneratorConfig};

/// Procedural dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "dungeon")]
#[command(author, version, about = "Generate a dungeon room layout", long_about = None)]
struct Args {
    /// Config file (OPTIONS= lines, or JSON when the name ends in .json)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long = "width")]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long = "height")]
    height: Option<i32>,

    /// Start cell column
    #[arg(long = "start-x")]
    start_x: Option<i32>,

    /// Start cell row
    #[arg(long = "start-y")]
    start_y: Option<i32>,

    /// Upper bound on generated rooms
    #[arg(short = 'n', long = "max-rooms")]
    max_rooms: Option<i32>,

    /// Seed for a reproducible layout
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Print the layout as JSON instead of a map
    #[arg(long = "json")]
    json: bool,

    /// Room asset table (JSON); prints each room's asset key
    #[arg(short = 'a', long = "assets")]
    assets: Option<PathBuf>,

    /// Verbose output (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("config {path}: {source}")]
    ConfigJson {
        path: String,
        source: serde_json::Error,
    },
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("assets: {0}")]
    Assets(#[from] AssetError),
    #[error("output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dungeon: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = build_config(args)?;
    debug!("config: {config:?}");

    let layout = dg_core::generate(&config)?;
    info!("generated {} rooms with seed {}", layout.len(), layout.seed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout.snapshot())?);
    } else {
        print!("{}", render::render_map(&layout));
        println!("{}", render::render_summary(&layout));
    }

    if let Some(path) = &args.assets {
        let table = RoomAssetTable::load_from_file(path)?;
        for (cell, asset) in table.assets_for_layout(&layout) {
            println!("{cell} {asset}");
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<GeneratorConfig, CliError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Ok(GeneratorConfig::load_from_file(path)?);
    }
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|source| CliError::ConfigJson {
        path: path.display().to_string(),
        source,
    })
}

/// Config file (or defaults) with command-line overrides applied
fn build_config(args: &Args) -> Result<GeneratorConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(width) = args.width {
        config.grid_width = width;
    }
    if let Some(height) = args.height {
        config.grid_height = height;
    }
    if let Some(x) = args.start_x {
        config.start.x = x;
    }
    if let Some(y) = args.start_y {
        config.start.y = y;
    }
    if let Some(max_rooms) = args.max_rooms {
        config.max_rooms = max_rooms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}
