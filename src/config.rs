use crate::prize::{DEFAULT_REWARD, DEFAULT_SECRET_PHRASE};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_GRID_W: usize = 21;
pub const DEFAULT_GRID_H: usize = 21;
pub const DEFAULT_DASH_STEPS: u32 = 3;
pub const DEFAULT_RENDER_FPS: u64 = 60;

#[derive(Parser, Debug, Clone)]
#[command(name = "maze-prize")]
#[command(about = "Walk a freshly carved maze to the heart and unlock the prize")]
pub struct Config {
    /// Maze width in cells (odd, at least 5)
    #[arg(long, env = "MAZE_WIDTH", default_value_t = DEFAULT_GRID_W)]
    pub width: usize,

    /// Maze height in cells (odd, at least 5)
    #[arg(long, env = "MAZE_HEIGHT", default_value_t = DEFAULT_GRID_H)]
    pub height: usize,

    /// Seed for a reproducible maze sequence
    #[arg(long, env = "MAZE_SEED")]
    pub seed: Option<u64>,

    /// Play a hand-made level (`#` wall, `.` path) instead of a carved one;
    /// its size replaces --width/--height
    #[arg(long, env = "MAZE_LAYOUT", conflicts_with_all = ["width", "height"])]
    pub layout: Option<PathBuf>,

    /// Secret phrase that unlocks the prize (case and surrounding spaces ignored)
    #[arg(long, env = "MAZE_PHRASE", default_value = DEFAULT_SECRET_PHRASE)]
    pub phrase: String,

    /// Prize code shown once the phrase matches
    #[arg(long, env = "MAZE_REWARD", default_value = DEFAULT_REWARD)]
    pub reward: String,

    /// Cells covered by a shifted move
    #[arg(long, env = "MAZE_DASH_STEPS", default_value_t = DEFAULT_DASH_STEPS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub dash_steps: u32,

    /// Frames drawn per second
    #[arg(long, env = "MAZE_FPS", default_value_t = DEFAULT_RENDER_FPS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub fps: u64,
}
