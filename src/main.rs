use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, GameEngine, SpawnPolicy};
use grid_snake::modes::HumanMode;
use grid_snake::results::{FileResultsSink, NoopResultsSink};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed-step grid engine")]
struct Cli {
    /// Player name written to the results log
    #[arg(long)]
    player: Option<String>,

    /// Start from a preset instead of the defaults
    #[arg(long)]
    preset: Option<Preset>,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Field height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Cell size in pixels
    #[arg(long)]
    grid_size: Option<i32>,

    /// Snake steps per second
    #[arg(long)]
    speed: Option<u32>,

    /// Frame rate cap
    #[arg(long)]
    fps: Option<u32>,

    /// Never respawn the apple under the snake
    #[arg(long)]
    avoid_snake: bool,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Results log, one line per finished game
    #[arg(long, default_value = "results.txt")]
    results: PathBuf,

    /// Do not write a results log
    #[arg(long)]
    no_results: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Easy,
    Medium,
    Hard,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match (&self.config, self.preset) {
            (Some(path), _) => GameConfig::from_file(path)?,
            (None, Some(Preset::Easy)) => GameConfig::easy(),
            (None, Some(Preset::Medium)) => GameConfig::medium(),
            (None, Some(Preset::Hard)) => GameConfig::hard(),
            (None, None) => GameConfig::default(),
        };

        if let Some(player) = &self.player {
            config.player_name = player.clone();
        }
        if let Some(width) = self.width {
            config.field_width = width;
        }
        if let Some(height) = self.height {
            config.field_height = height;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(speed) = self.speed {
            config.moves_per_second = speed;
        }
        if let Some(fps) = self.fps {
            config.fps_cap = fps;
        }
        if self.avoid_snake {
            config.spawn_policy = SpawnPolicy::AvoidSnake;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "grid_snake=info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Stderr belongs to the terminal UI, so logs only go to a file.
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;

    let engine = if cli.no_results {
        GameEngine::new(config, NoopResultsSink)
    } else {
        GameEngine::new(config, FileResultsSink::new(&cli.results))
    }
    .context("Invalid game configuration")?;

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await?;

    Ok(())
}
