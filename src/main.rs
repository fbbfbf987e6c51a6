use anyhow::Result;
use clap::{Parser, ValueEnum};
use gesture_snake::flavor::Oracle;
use gesture_snake::game::GameConfig;
use gesture_snake::modes::{GestureMode, HumanMode};
use gesture_snake::recognition::ProfileStore;
use gesture_snake::tracker::FrameSource;
use std::path::PathBuf;

/// Smallest grid side on which the reset cells stay distinct and in bounds.
const MIN_GRID_SIDE: usize = 3;

#[derive(Parser)]
#[command(name = "gesture_snake")]
#[command(version, about = "Snake steered by hand gestures")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Milliseconds per game tick
    #[arg(long, default_value = "200")]
    tick_ms: u64,

    /// Hand tracker command printing NDJSON frames on stdout (gesture mode)
    #[arg(long)]
    tracker_cmd: Option<String>,

    /// Recorded NDJSON frames to replay instead of a live tracker (gesture mode)
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Flavor generator command; gets a prompt argument, prints one line
    #[arg(long)]
    oracle_cmd: Option<String>,

    /// Disable flavor lines entirely
    #[arg(long)]
    no_flavor: bool,

    /// Directory of NDJSON hand recordings for player recognition (gesture mode)
    #[arg(long)]
    profiles: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Steer with hand gestures from a tracker
    Gesture,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_snake=info".into()),
        )
        .init();

    // Create game configuration from CLI arguments
    let config = game_config(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
        Mode::Gesture => {
            let source = frame_source(&cli)?;
            let profiles = match &cli.profiles {
                Some(dir) => Some(ProfileStore::load(dir).await?),
                None => None,
            };
            let mut gesture_mode = GestureMode::new(config, source, oracle(&cli), profiles);
            gesture_mode.run().await?;
        }
    }

    Ok(())
}

fn game_config(cli: &Cli) -> Result<GameConfig> {
    if cli.width < MIN_GRID_SIDE || cli.height < MIN_GRID_SIDE {
        anyhow::bail!("grid must be at least {}x{}", MIN_GRID_SIDE, MIN_GRID_SIDE);
    }
    if cli.tick_ms == 0 {
        anyhow::bail!("tick period must be at least 1ms");
    }

    Ok(GameConfig {
        grid_width: cli.width,
        grid_height: cli.height,
        tick_ms: cli.tick_ms,
        ..GameConfig::default()
    })
}

fn frame_source(cli: &Cli) -> Result<FrameSource> {
    match (&cli.tracker_cmd, &cli.replay) {
        (Some(cmd), None) => Ok(FrameSource::Command(cmd.clone())),
        (None, Some(path)) => Ok(FrameSource::Replay(path.clone())),
        (Some(_), Some(_)) => anyhow::bail!("--tracker-cmd and --replay are mutually exclusive"),
        (None, None) => anyhow::bail!("gesture mode needs --tracker-cmd or --replay"),
    }
}

fn oracle(cli: &Cli) -> Option<Oracle> {
    if cli.no_flavor {
        return None;
    }
    match &cli.oracle_cmd {
        Some(cmd) => Some(Oracle::Command(cmd.clone())),
        None => Some(Oracle::Canned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_snake::game::GameEngine;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["gesture_snake"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_degenerate_grids_are_rejected() {
        assert!(game_config(&cli(&["--width", "2", "--height", "2"])).is_err());
        assert!(game_config(&cli(&["--width", "0", "--height", "0"])).is_err());
        assert!(game_config(&cli(&["--width", "20", "--height", "2"])).is_err());
        assert!(game_config(&cli(&["--tick-ms", "0"])).is_err());
        assert!(game_config(&cli(&[])).is_ok());
    }

    #[test]
    fn test_smallest_grid_keeps_start_and_food_apart() {
        let config = game_config(&cli(&["--width", "3", "--height", "3"])).unwrap();
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        assert_ne!(state.food, state.snake.head());
        assert!(state.is_in_bounds(state.snake.head()));
        assert!(state.is_in_bounds(state.food));
    }
}
