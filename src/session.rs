use crate::error::Result;
use crate::maze::{self, Dir, Grid, Pos};
use crate::navigation::{MoveResult, Player};
use rand::Rng;
use tracing::{debug, info};

/// Owns one maze, the player walking it and the source of randomness used
/// to build the next one.
pub struct MazeSession<R: Rng> {
    rng: R,
    grid: Grid,
    goal: Pos,
    player: Player,
    generation: u32,
}

impl<R: Rng> MazeSession<R> {
    pub fn new(width: usize, height: usize, mut rng: R) -> Result<Self> {
        let grid = maze::generate(width, height, &mut rng)?;
        Ok(Self::from_grid(grid, rng))
    }

    pub fn from_grid(grid: Grid, rng: R) -> Self {
        let goal = grid.goal();
        Self {
            rng,
            grid,
            goal,
            player: Player::default(),
            generation: 0,
        }
    }

    /// Throws the current maze away and carves a new one of the same size.
    pub fn regenerate(&mut self) -> Result<()> {
        let grid = maze::generate(self.grid.width(), self.grid.height(), &mut self.rng)?;
        self.goal = grid.goal();
        self.grid = grid;
        self.player = Player::default();
        self.generation = self.generation.wrapping_add(1);
        info!(generation = self.generation, "maze regenerated");
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Pos {
        self.player.pos
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn attempt_move(&mut self, dir: Dir, steps: u32) -> MoveResult {
        let result = self.player.try_move(&self.grid, self.goal, dir, steps);
        debug!(?dir, steps, ?result, x = self.player.pos.x, y = self.player.pos.y, "move");
        if result == MoveResult::Arrived {
            info!(generation = self.generation, "goal reached");
        }
        result
    }
}
